//! Auction House - interactive console entry point.

use std::io::{stdin, stdout};

use auction_house::config::MarketConfig;
use auction_house::error::{MarketError, MarketResult};
use auction_house::{AuctionHouse, Console, Shell};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logs go to stderr; stdout carries the menus.
fn init_logging(config: &MarketConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> MarketResult<()> {
    let config = MarketConfig::from_env();
    init_logging(&config);
    info!("Starting auction house ({:?})", config);

    let house = AuctionHouse::new(&config);
    let console = Console::new(stdin().lock(), stdout().lock());
    let mut shell = Shell::new(house, console);

    match shell.run() {
        Ok(()) => {
            info!("Goodbye");
            Ok(())
        }
        Err(MarketError::EndOfInput) => {
            error!("Input closed before the session ended");
            Err(MarketError::EndOfInput)
        }
        Err(e) => {
            error!("Console session failed: {}", e);
            Err(e)
        }
    }
}

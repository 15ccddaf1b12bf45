//! Headless auction house for scripted testing.
//!
//! JSON-over-stdio IPC: one command per stdin line, one response per
//! stdout line. Logging goes to stderr; stdout is reserved for the protocol.
//!
//! On startup, emits a `Ready` JSON line to stdout.

use auction_house::config::MarketConfig;
use auction_house::error::MarketResult;
use auction_house::headless::serve;
use auction_house::AuctionHouse;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging_stderr(config: &MarketConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .init();
}

fn main() -> MarketResult<()> {
    let config = MarketConfig::from_env();
    init_logging_stderr(&config);
    info!("auction-headless starting");

    let house = AuctionHouse::new(&config);
    serve(&house, std::io::stdin().lock(), std::io::stdout().lock())
        .inspect_err(|e| error!("Headless session failed: {:#}", e))
}

use std::io::{BufRead, Write};

use tracing::{error, info};

use super::{corrective_message, Console};
use crate::actions::Session;
use crate::error::{MarketError, MarketResult};
use crate::shared_state::AuctionHouse;

/// What a menu does after an action finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    Continue,
    Exit,
}

const MAIN_MENU: [(&str, &str); 3] = [("1", "Register"), ("2", "Sign in"), ("3", "Exit")];

const CLIENT_MENU: [(&str, &str); 6] = [
    ("1", "Advertise product"),
    ("2", "List my advertised products"),
    ("3", "Search for products to buy"),
    ("4", "Display bids for my products"),
    ("5", "Show my purchases"),
    ("6", "Log out"),
];

/// Interactive session driving one [`AuctionHouse`].
pub struct Shell<R, W> {
    pub(super) house: AuctionHouse,
    pub(super) console: Console<R, W>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub const fn new(house: AuctionHouse, console: Console<R, W>) -> Self {
        Self { house, console }
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Run the main menu until the user exits.
    pub fn run(&mut self) -> MarketResult<()> {
        loop {
            let key = self.choose("Welcome to the Auction House", &MAIN_MENU)?;
            let outcome = match key {
                "1" => self.guard(Self::register),
                "2" => self.guard(Self::sign_in),
                _ => Ok(MenuOutcome::Exit),
            }?;
            if outcome == MenuOutcome::Exit {
                info!("Main menu exited");
                return Ok(());
            }
        }
    }

    /// The client menu for a signed-in customer. Returns on log out.
    pub(super) fn client_menu(&mut self, session: &Session) -> MarketResult<MenuOutcome> {
        loop {
            let key = self.choose("Client Menu", &CLIENT_MENU)?;
            let outcome = match key {
                "1" => self.guard(|s| s.advertise(session)),
                "2" => self.guard(|s| s.list_advertised(session)),
                "3" => self.guard(|s| s.search(session)),
                "4" => self.guard(|s| s.list_bids(session)),
                "5" => self.guard(|s| s.list_purchases(session)),
                _ => Ok(MenuOutcome::Exit),
            }?;
            if outcome == MenuOutcome::Exit {
                info!("{} logged out", session.email);
                // Logging out only leaves the client menu.
                return Ok(MenuOutcome::Continue);
            }
        }
    }

    /// Print a menu and read keys until one matches. Returns the matched key.
    fn choose(
        &mut self,
        title: &str,
        items: &[(&'static str, &'static str)],
    ) -> MarketResult<&'static str> {
        loop {
            self.console.banner(title)?;
            self.console.blank()?;
            self.console
                .line("Please select an option from the following list:")?;
            self.console.blank()?;
            for (key, text) in items {
                self.console.line(format!("{key}         : {text}"))?;
            }
            self.console.blank()?;
            self.console.inline("? ")?;

            let input = self.console.read_line()?;
            let input = input.trim();
            if let Some((key, _)) = items.iter().find(|(k, _)| k.eq_ignore_ascii_case(input)) {
                return Ok(*key);
            }
            self.console.line("Please choose a valid option.")?;
        }
    }

    /// Run an action, reporting failures that leave the session usable.
    fn guard(
        &mut self,
        action: impl FnOnce(&mut Self) -> MarketResult<MenuOutcome>,
    ) -> MarketResult<MenuOutcome> {
        match action(self) {
            Err(e @ (MarketError::EndOfInput | MarketError::Io(_))) => Err(e),
            // Invariant violations abort the step silently.
            Err(e @ MarketError::PreconditionFailed(_)) => {
                error!("Menu action aborted: {}", e);
                Ok(MenuOutcome::Continue)
            }
            Err(e) => {
                error!("Menu action failed: {}", e);
                self.console.line(corrective_message(&e))?;
                self.console.blank()?;
                Ok(MenuOutcome::Continue)
            }
            ok => ok,
        }
    }
}

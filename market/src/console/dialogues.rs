//! The individual menu actions.

use std::io::{BufRead, Write};

use tracing::debug;

use super::menu::{MenuOutcome, Shell};
use super::table::{product_table, purchase_table};
use super::corrective_message;
use crate::actions::{ProductView, Session};
use crate::error::{MarketError, MarketResult};
use crate::marketplace::address::{validate_postcode, validate_street_number};
use crate::marketplace::currency::CURRENCY_FORMAT_HINT;
use crate::marketplace::identity::{EMAIL_FORMAT_HINT, NAME_FORMAT_HINT, PASSWORD_FORMAT_HINT};
use crate::marketplace::{
    parse_local_datetime, Address, CollectionTime, Currency, DeliveryMethod, EmailAddress, Name,
    Password, ProductId, State, StreetType, Unit,
};

fn parse_positive(raw: &str, error: &str) -> MarketResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| MarketError::Validation(error.to_string()))
}

impl<R: BufRead, W: Write> Shell<R, W> {
    // ── Main menu ────────────────────────────────────────────────────

    pub(super) fn register(&mut self) -> MarketResult<MenuOutcome> {
        self.console.blank()?;
        self.console.banner("Register Customer")?;
        self.console.blank()?;

        let name: Name = self.console.read("Name:", NAME_FORMAT_HINT)?;
        let email: EmailAddress = self.console.read("Email address:", EMAIL_FORMAT_HINT)?;
        let password: Password = self.console.read("Password:", PASSWORD_FORMAT_HINT)?;

        match self.house.register(name, email, password) {
            Ok(customer) => {
                self.console.blank()?;
                self.console.line("Successfully registered as:")?;
                self.console
                    .line(format!("\t{} ({}).", customer.name, customer.email))?;
                self.console.blank()?;
                self.console.line("Returning to the main menu to sign in.")?;
            }
            Err(MarketError::Duplicate(_)) => {
                self.console
                    .line("Email already in use. Operation cancelled.")?;
                self.console.blank()?;
                self.console.line("Returning to Main Menu.")?;
            }
            Err(e) => return Err(e),
        }
        self.console.blank()?;
        Ok(MenuOutcome::Continue)
    }

    pub(super) fn sign_in(&mut self) -> MarketResult<MenuOutcome> {
        self.console.blank()?;
        self.console.banner("Customer Sign In")?;
        self.console.blank()?;

        let email: EmailAddress = self.console.read("Email address:", EMAIL_FORMAT_HINT)?;
        let password: Password = self.console.read("Password:", PASSWORD_FORMAT_HINT)?;

        let session = match self.house.sign_in(&email, &password) {
            Ok(session) => session,
            Err(MarketError::Authentication) => {
                self.console.line("Wrong email or password.")?;
                self.console.blank()?;
                self.console.line("Returning to Main Menu.")?;
                self.console.blank()?;
                return Ok(MenuOutcome::Continue);
            }
            Err(e) => return Err(e),
        };

        self.console.blank()?;
        self.console
            .line(format!("Successfully signed in as {session}"))?;
        self.console.blank()?;

        if session.needs_home_address {
            self.console.banner("home delivery address")?;
            self.console.blank()?;
            let address = self.read_address()?;
            self.house
                .set_home_address(&session.email, address.clone())?;
            self.console.blank()?;
            self.console.line("Address successfully recorded as:")?;
            self.console.line(format!("\t{address}"))?;
            self.console.blank()?;
            self.console.line("Continuing to Client Menu.")?;
            self.console.blank()?;
        }

        self.client_menu(&session)
    }

    // ── Client menu ──────────────────────────────────────────────────

    pub(super) fn advertise(&mut self, session: &Session) -> MarketResult<MenuOutcome> {
        self.console.blank()?;
        self.console.banner("Advertise Product")?;
        self.console.blank()?;

        let name = self
            .console
            .read_non_blank("Product name:", "Name cannot be empty")?;
        let description = loop {
            let description = self
                .console
                .read_non_blank("Product description:", "Description cannot be empty")?;
            if description != name {
                break description;
            }
            self.console
                .line("Product description cannot be the same as the name")?;
        };
        let price: Currency = self.console.read("Sale price:", CURRENCY_FORMAT_HINT)?;

        let product = self
            .house
            .advertise(&session.email, &name, &description, price)?;

        self.console.blank()?;
        self.console.line("Successfully created advertisement:")?;
        self.console.line(format!(
            "\t{} - {} {}",
            product.name, product.description, product.price
        ))?;
        self.console.blank()?;
        self.console.line("Returning to the Client Menu.")?;
        self.console.blank()?;
        Ok(MenuOutcome::Continue)
    }

    pub(super) fn list_advertised(&mut self, session: &Session) -> MarketResult<MenuOutcome> {
        self.console.blank()?;
        self.console.banner("Product List")?;
        self.console.blank()?;

        let products = self.house.advertised_products(&session.email)?;
        if products.is_empty() {
            self.console
                .line("You have no advertised products at this time.")?;
        } else {
            self.print_rows(product_table(&products))?;
            self.console.blank()?;
            self.console.line("Product list complete.")?;
        }
        self.finish_client_action()
    }

    pub(super) fn search(&mut self, session: &Session) -> MarketResult<MenuOutcome> {
        self.console.blank()?;
        self.console.banner("Product Search")?;
        self.console.blank()?;

        let phrase = self.console.read_non_blank(
            "Search phrase (ALL to match all products):",
            "Invalid input cannot be blank",
        )?;
        let products = self.house.search(&session.email, &phrase)?;

        if products.is_empty() {
            self.console.blank()?;
            self.console.line("No products match the search phrase.")?;
        } else {
            self.print_rows(product_table(&products))?;
            self.console.blank()?;
            self.console.line("Product search complete.")?;
            self.console.blank()?;
            self.bid_dialogue(session, &products)?;
        }
        self.finish_client_action()
    }

    pub(super) fn list_bids(&mut self, session: &Session) -> MarketResult<MenuOutcome> {
        self.console.banner("Product Bids")?;

        let products = self.house.bid_products(&session.email)?;
        if products.is_empty() {
            self.console.blank()?;
            self.console
                .line("You have no products with bids at this time.")?;
        } else {
            self.print_rows(product_table(&products))?;
            self.console.line("Bid list complete.")?;
            self.console.blank()?;
            self.sell_dialogue(session, &products)?;
        }
        self.finish_client_action()
    }

    pub(super) fn list_purchases(&mut self, session: &Session) -> MarketResult<MenuOutcome> {
        self.console.banner("Purchased Products")?;
        self.console.blank()?;

        let products = self.house.purchases(&session.email)?;
        if products.is_empty() {
            self.console
                .line("You have not purchased any items so far.")?;
        } else {
            self.print_rows(purchase_table(&products))?;
            self.console.line("Purchase list complete.")?;
        }
        self.finish_client_action()
    }

    // ── Sub-dialogues ────────────────────────────────────────────────

    fn bid_dialogue(&mut self, session: &Session, products: &[ProductView]) -> MarketResult<()> {
        if !self
            .console
            .read_yes_no("Would you like to place a bid (yes or no)?")?
        {
            self.console.blank()?;
            self.console.line("Bid postponed.")?;
            return Ok(());
        }

        let index = self.console.read_selection(
            &format!(
                "Which product would you like to bid for (1..{})?",
                products.len()
            ),
            products.len(),
        )?;
        let id = products[index].id;
        let amount = self.read_bid_amount(session, id)?;
        let method = self.read_delivery(session)?;

        let receipt = self
            .house
            .place_bid_with_delivery(&session.email, id, amount, method)?;
        self.console.blank()?;
        self.console.line("Bid successfully placed:")?;
        self.console.line(format!(
            "\t{}\t{}\t{}\t{}",
            receipt.amount,
            receipt.bidder_name,
            receipt.bidder_email,
            receipt.delivery.as_deref().unwrap_or_default()
        ))
    }

    /// Prompt until the amount would beat the current bid on `id`.
    fn read_bid_amount(&mut self, session: &Session, id: ProductId) -> MarketResult<Currency> {
        loop {
            let amount: Currency = self
                .console
                .read("Please enter the bid amount:", CURRENCY_FORMAT_HINT)?;
            match self.house.check_bid(&session.email, id, amount) {
                Ok(()) => return Ok(amount),
                Err(MarketError::BidTooLow { current }) => {
                    debug!("Bid {} below current {}", amount, current);
                    self.console
                        .line("Bid amount must be greater than the existing bid")?;
                }
                Err(e) if e.is_recoverable() => self.console.line(corrective_message(&e))?,
                Err(e) => return Err(e),
            }
        }
    }

    fn read_delivery(&mut self, session: &Session) -> MarketResult<DeliveryMethod> {
        let choice = self.console.read_choice(
            "How would you like to receive the item (collect or deliver)?",
            &["collect", "deliver"],
            "Please input \"collect\" or \"deliver\" only",
        )?;
        if choice == "collect" {
            return Ok(self.read_collection_window()?.into());
        }

        if self
            .console
            .read_yes_no("Deliver to your home address (yes or no)?")?
        {
            if let Some(home) = self.house.home_address(&session.email)? {
                return Ok(home.into());
            }
            self.console.line("No home address is recorded.")?;
        }
        self.console.blank()?;
        self.console.banner("delivery")?;
        self.console.blank()?;
        Ok(self.read_address()?.into())
    }

    fn sell_dialogue(&mut self, session: &Session, products: &[ProductView]) -> MarketResult<()> {
        if !self
            .console
            .read_yes_no("Would you like to sell a product to the highest bidder?")?
        {
            return self.console.line("Sale postponed");
        }

        let index = self.console.read_selection(
            &format!("Item number  (1..{})", products.len()),
            products.len(),
        )?;
        let receipt = self.house.settle_sale(&session.email, products[index].id)?;
        self.console.line(&receipt)?;
        self.console.blank()
    }

    /// Prompt for every address field, re-prompting each until valid.
    fn read_address(&mut self) -> MarketResult<Address> {
        let console = &mut self.console;
        let unit: Unit = console.read(
            "Unit number (leave blank if none):",
            "Unit must be a non-zero integer, try again",
        )?;
        let street_number = console.read_with("Street number:", |raw| {
            parse_positive(raw, "Please input a non-zero positive integer")
                .and_then(validate_street_number)
        })?;
        let street_name = console.read_non_blank("Street name:", "Cannot be blank")?;
        let street_type: StreetType = console.read(
            "Street type (St, Rd, Ave, Blvd, Dr, Ln, Ct, Pl, Ter, Way):",
            "Must be one of the mentioned street types",
        )?;
        let city = console.read_non_blank("City:", "Cannot be blank")?;
        let postcode = console.read_with("Postcode (1000..9999):", |raw| {
            parse_positive(raw, "Invalid input").and_then(validate_postcode)
        })?;
        let state: State = console.read(
            "State (QLD, NSW, VIC, TAS, SA, WA, NT, ACT):",
            "Must be one of the mentioned states",
        )?;

        Address::builder()
            .unit(unit)
            .street_number(street_number)
            .street_name(street_name)
            .street_type(street_type)
            .city(city)
            .postcode(postcode)
            .state(state)
            .build()
    }

    /// Prompt for a collection window until both endpoints satisfy the rules.
    fn read_collection_window(&mut self) -> MarketResult<CollectionTime> {
        let house = &self.house;
        let console = &mut self.console;
        let rules = house.collection_rules();
        loop {
            let start = console.read_with("Delivery window start:", |raw| {
                parse_local_datetime(raw).and_then(|start| rules.validate_start(start, house.time()))
            })?;
            let end = console.read_with("Delivery window end:", |raw| {
                parse_local_datetime(raw).and_then(|end| rules.validate_end(start, end))
            })?;
            // The clock keeps moving while the user types; recheck both.
            match house.collection_window(start, end) {
                Ok(window) => return Ok(window),
                Err(e) => console.line(corrective_message(&e))?,
            }
        }
    }

    fn print_rows(&mut self, rows: Vec<String>) -> MarketResult<()> {
        rows.into_iter().try_for_each(|row| self.console.line(row))
    }

    fn finish_client_action(&mut self) -> MarketResult<MenuOutcome> {
        self.console.blank()?;
        self.console.line("Returning to Client Menu.")?;
        self.console.blank()?;
        Ok(MenuOutcome::Continue)
    }
}

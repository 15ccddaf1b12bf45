//! Shared fixture for marketplace integration tests.
//!
//! Wraps an `AuctionHouse` on a `MockTime` clock and provides shorthands for
//! the setup steps most scenarios repeat.

use std::io::Cursor;

use auction_house::marketplace::{State, StreetType};
use auction_house::mocks::MockTime;
use auction_house::{
    Address, AuctionHouse, BidReceipt, Console, Currency, DeliveryMethod, EmailAddress,
    MarketConfig, MarketResult, ProductId, Shell, TimeProvider,
};
use chrono::Duration;

pub const PASSWORD: &str = "Secret1!";

pub fn email(raw: &str) -> EmailAddress {
    raw.parse().expect("valid email")
}

pub fn amount(raw: &str) -> Currency {
    raw.parse().expect("valid amount")
}

pub struct MarketHarness {
    house: AuctionHouse,
    time: MockTime,
}

#[allow(dead_code)]
impl MarketHarness {
    pub fn new() -> Self {
        Self::with_config(&MarketConfig::default())
    }

    pub fn with_config(config: &MarketConfig) -> Self {
        let time = MockTime::default();
        Self {
            house: AuctionHouse::with_time(config, time.clone()),
            time,
        }
    }

    pub fn house(&self) -> &AuctionHouse {
        &self.house
    }

    pub fn time(&self) -> &MockTime {
        &self.time
    }

    /// Register a customer with the shared test password.
    pub fn register(&self, name: &str, mail: &str) -> EmailAddress {
        let address = email(mail);
        self.house
            .register(
                name.parse().expect("valid name"),
                address.clone(),
                PASSWORD.parse().expect("valid password"),
            )
            .expect("registration");
        address
    }

    /// Register a customer and record their home address.
    pub fn register_with_home(&self, name: &str, mail: &str) -> EmailAddress {
        let address = self.register(name, mail);
        self.house
            .set_home_address(&address, Self::sample_address(12))
            .expect("home address");
        address
    }

    pub fn advertise(&self, seller: &EmailAddress, name: &str, price: &str) -> ProductId {
        self.house
            .advertise(seller, name, &format!("{name} for sale"), amount(price))
            .expect("advertise")
            .id
    }

    pub fn bid(&self, bidder: &EmailAddress, id: ProductId, price: &str) -> MarketResult<BidReceipt> {
        self.house.place_bid(bidder, id, amount(price))
    }

    /// A collection window starting `hours` from now and lasting two hours.
    pub fn collection(&self, hours: i64) -> DeliveryMethod {
        let start = self.time.now() + Duration::hours(hours);
        self.house
            .collection_window(start, start + Duration::hours(2))
            .expect("valid window")
            .into()
    }

    /// Bid and commit to a collection window in one step.
    pub fn bid_and_collect(&self, bidder: &EmailAddress, id: ProductId, price: &str) -> BidReceipt {
        self.house
            .place_bid_with_delivery(bidder, id, amount(price), self.collection(3))
            .expect("bid with delivery")
    }

    pub fn sample_address(street_number: u32) -> Address {
        Address::builder()
            .street_number(street_number)
            .street_name("Queen")
            .street_type(StreetType::St)
            .city("Brisbane")
            .postcode(4000)
            .state(State::Qld)
            .build()
            .expect("valid address")
    }

    /// Run the console shell over `script` and return everything it printed.
    pub fn run_console(&self, script: &str) -> (MarketResult<()>, String) {
        let console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        let mut shell = Shell::new(self.house.clone(), console);
        let result = shell.run();
        let output = String::from_utf8(shell.into_console().into_output()).expect("utf-8 output");
        (result, output)
    }
}

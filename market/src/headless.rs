//! JSON-over-stdio command protocol for scripted drivers.
//!
//! One [`Command`] per input line, one [`Response`] per output line.
//! [`serve`] runs the loop over any reader/writer pair; the
//! `auction-headless` binary hands it stdin and stdout.

use std::io::{BufRead, Write};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{MarketError, MarketResult};
use crate::marketplace::{
    parse_local_datetime, Address, Currency, DeliveryMethod, EmailAddress, Name, Password,
    ProductId, State, StreetType, Unit,
};
use crate::shared_state::AuctionHouse;

#[derive(Debug, Serialize)]
pub struct ReadyEvent {
    pub event: &'static str,
}

impl Default for ReadyEvent {
    fn default() -> Self {
        Self { event: "Ready" }
    }
}

/// Address fields as plain JSON values.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressInput {
    #[serde(default)]
    pub unit: Option<u32>,
    pub street_number: u32,
    pub street_name: String,
    pub street_type: String,
    pub city: String,
    pub postcode: u32,
    pub state: String,
}

impl AddressInput {
    fn into_address(self) -> MarketResult<Address> {
        let unit: Unit = self
            .unit
            .map_or_else(String::new, |n| n.to_string())
            .parse()?;
        Address::builder()
            .unit(unit)
            .street_number(self.street_number)
            .street_name(self.street_name)
            .street_type(self.street_type.parse::<StreetType>()?)
            .city(self.city)
            .postcode(self.postcode)
            .state(self.state.parse::<State>()?)
            .build()
    }
}

/// How the bidder wants the product.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "method")]
pub enum DeliveryInput {
    /// The bidder's recorded home address.
    Home,
    Address { address: AddressInput },
    Collect { start: String, end: String },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "cmd")]
pub enum Command {
    Register {
        name: String,
        email: String,
        password: String,
    },
    SignIn {
        email: String,
        password: String,
    },
    SetHomeAddress {
        email: String,
        address: AddressInput,
    },
    Advertise {
        email: String,
        name: String,
        description: String,
        price: String,
    },
    ListAdvertised {
        email: String,
    },
    Search {
        email: String,
        phrase: String,
    },
    PlaceBid {
        email: String,
        product_id: u64,
        amount: String,
        #[serde(default)]
        delivery: Option<DeliveryInput>,
    },
    AttachDelivery {
        email: String,
        product_id: u64,
        delivery: DeliveryInput,
    },
    ListBids {
        email: String,
    },
    Sell {
        email: String,
        product_id: u64,
    },
    ListPurchases {
        email: String,
    },
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status")]
pub enum Response {
    Ok { data: Option<Value> },
    Err { message: String },
}

fn parse<T>(raw: &str) -> MarketResult<T>
where
    T: std::str::FromStr<Err = MarketError>,
{
    raw.parse()
}

fn delivery_method(
    house: &AuctionHouse,
    email: &EmailAddress,
    input: DeliveryInput,
) -> MarketResult<DeliveryMethod> {
    match input {
        DeliveryInput::Home => house
            .home_address(email)?
            .map(DeliveryMethod::from)
            .ok_or_else(|| MarketError::InvalidState(format!("{email} has no home address"))),
        DeliveryInput::Address { address } => Ok(address.into_address()?.into()),
        DeliveryInput::Collect { start, end } => Ok(house
            .collection_window(parse_local_datetime(&start)?, parse_local_datetime(&end)?)?
            .into()),
    }
}

/// Execute one command against the marketplace.
pub fn dispatch(house: &AuctionHouse, command: Command) -> MarketResult<Option<Value>> {
    let data = match command {
        Command::Register {
            name,
            email,
            password,
        } => {
            let name: Name = parse(&name)?;
            let password: Password = parse(&password)?;
            serde_json::to_value(house.register(name, parse(&email)?, password)?)?
        }
        Command::SignIn { email, password } => {
            let session = house.sign_in(&parse(&email)?, &parse(&password)?)?;
            serde_json::json!({
                "name": session.name.as_str(),
                "email": session.email,
                "needs_home_address": session.needs_home_address,
            })
        }
        Command::SetHomeAddress { email, address } => {
            let address = address.into_address()?;
            let rendered = address.to_string();
            house.set_home_address(&parse(&email)?, address)?;
            serde_json::json!({ "address": rendered })
        }
        Command::Advertise {
            email,
            name,
            description,
            price,
        } => {
            let price: Currency = parse(&price)?;
            serde_json::to_value(house.advertise(&parse(&email)?, &name, &description, price)?)?
        }
        Command::ListAdvertised { email } => {
            serde_json::to_value(house.advertised_products(&parse(&email)?)?)?
        }
        Command::Search { email, phrase } => {
            serde_json::to_value(house.search(&parse(&email)?, &phrase)?)?
        }
        Command::PlaceBid {
            email,
            product_id,
            amount,
            delivery,
        } => {
            let email: EmailAddress = parse(&email)?;
            let amount: Currency = parse(&amount)?;
            let id = ProductId(product_id);
            let receipt = match delivery {
                Some(input) => {
                    let method = delivery_method(house, &email, input)?;
                    house.place_bid_with_delivery(&email, id, amount, method)?
                }
                None => house.place_bid(&email, id, amount)?,
            };
            serde_json::to_value(receipt)?
        }
        Command::AttachDelivery {
            email,
            product_id,
            delivery,
        } => {
            let email: EmailAddress = parse(&email)?;
            let method = delivery_method(house, &email, delivery)?;
            serde_json::to_value(house.attach_delivery(&email, ProductId(product_id), method)?)?
        }
        Command::ListBids { email } => serde_json::to_value(house.bid_products(&parse(&email)?)?)?,
        Command::Sell { email, product_id } => {
            let receipt = house.settle_sale(&parse(&email)?, ProductId(product_id))?;
            serde_json::json!({
                "receipt": receipt,
                "message": receipt.to_string(),
            })
        }
        Command::ListPurchases { email } => {
            serde_json::to_value(house.purchases(&parse(&email)?)?)?
        }
        Command::Shutdown => return Ok(None),
    };
    Ok(Some(data))
}

/// Dispatch and wrap the outcome for the wire.
pub fn respond(house: &AuctionHouse, command: Command) -> Response {
    match dispatch(house, command) {
        Ok(data) => Response::Ok { data },
        Err(e) => {
            warn!("Command failed: {}", e);
            Response::Err {
                message: e.to_string(),
            }
        }
    }
}

/// Parse one input line and respond to it. Malformed JSON is an error response.
pub fn handle_line(house: &AuctionHouse, line: &str) -> (Response, bool) {
    match serde_json::from_str::<Command>(line) {
        Ok(Command::Shutdown) => (Response::Ok { data: None }, true),
        Ok(command) => (respond(house, command), false),
        Err(e) => (
            Response::Err {
                message: format!("Invalid command JSON: {e}"),
            },
            false,
        ),
    }
}

fn emit_json(out: &mut impl Write, value: &impl Serialize) -> MarketResult<()> {
    let line = serde_json::to_string(value)?;
    writeln!(out, "{line}")?;
    out.flush()?;
    Ok(())
}

/// Emit the ready event, then answer commands until `Shutdown` or end of input.
///
/// Blank lines are skipped. Read and write failures end the loop as
/// [`MarketError::Other`] naming the failed step.
pub fn serve(house: &AuctionHouse, input: impl BufRead, mut output: impl Write) -> MarketResult<()> {
    emit_json(&mut output, &ReadyEvent::default()).context("emitting ready event")?;
    info!("Ready event emitted");

    for line in input.lines() {
        let line = line.context("reading command line")?;
        if line.trim().is_empty() {
            continue;
        }

        let (response, shutdown) = handle_line(house, &line);
        emit_json(&mut output, &response).context("writing response")?;
        if shutdown {
            info!("Shutdown command received");
            return Ok(());
        }
    }

    info!("Input closed, shutting down");
    Ok(())
}

//! Delivery commitments attached to a bid.

use chrono::{DateTime, Duration, Local, NaiveDateTime};
use std::fmt;

use super::address::Address;
use crate::config::MarketConfig;
use crate::error::{MarketError, MarketResult};
use crate::traits::TimeProvider;

/// Display format for collection window endpoints.
pub const COLLECTION_TIME_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Accepted input formats for collection window endpoints, tried in order.
const INPUT_FORMATS: [&str; 4] = [
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parse a local wall-clock time such as `25/12/2026 14:30` or `2026-12-25 14:30`.
pub fn parse_local_datetime(raw: &str) -> MarketResult<DateTime<Local>> {
    let raw = raw.trim();
    let naive = INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| MarketError::Validation(format!("'{raw}' is not a valid date and time")))?;
    // Ambiguous (DST fold) picks the earlier instant; skipped times are invalid.
    naive
        .and_local_timezone(Local)
        .earliest()
        .ok_or_else(|| MarketError::Validation(format!("'{raw}' does not exist in local time")))
}

/// Anything that can describe how a sold product reaches its buyer.
pub trait DeliveryOption {
    fn delivery_option_message(&self) -> String;
}

impl DeliveryOption for Address {
    fn delivery_option_message(&self) -> String {
        format!("Deliver to {self}")
    }
}

/// Bounds applied when validating a collection window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionRules {
    pub lead: Duration,
    pub min_window: Duration,
}

impl CollectionRules {
    pub fn from_config(config: &MarketConfig) -> Self {
        let secs = |s: u64| Duration::seconds(i64::try_from(s).unwrap_or(i64::MAX / 1000));
        Self {
            lead: secs(config.collection_lead_secs),
            min_window: secs(config.collection_min_window_secs),
        }
    }

    /// Earliest acceptable start relative to the clock.
    pub fn earliest_start<T: TimeProvider + ?Sized>(&self, time: &T) -> DateTime<Local> {
        time.now() + self.lead
    }

    /// Check a proposed start time.
    pub fn validate_start<T: TimeProvider + ?Sized>(
        &self,
        start: DateTime<Local>,
        time: &T,
    ) -> MarketResult<DateTime<Local>> {
        let earliest = self.earliest_start(time);
        if start < earliest {
            return Err(MarketError::Validation(format!(
                "Start time must be 1 hour later than {}",
                time.now().format(COLLECTION_TIME_FORMAT)
            )));
        }
        Ok(start)
    }

    /// Check a proposed end time against an already accepted start.
    pub fn validate_end(
        &self,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> MarketResult<DateTime<Local>> {
        if end < start + self.min_window {
            return Err(MarketError::Validation(format!(
                "End time must be 1 hour later than {}",
                start.format(COLLECTION_TIME_FORMAT)
            )));
        }
        Ok(end)
    }
}

impl Default for CollectionRules {
    fn default() -> Self {
        Self::from_config(&MarketConfig::default())
    }
}

/// A pick-up window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionTime {
    start: DateTime<Local>,
    end: DateTime<Local>,
}

impl CollectionTime {
    /// Validate both endpoints against `rules` and the clock.
    pub fn new<T: TimeProvider + ?Sized>(
        start: DateTime<Local>,
        end: DateTime<Local>,
        rules: &CollectionRules,
        time: &T,
    ) -> MarketResult<Self> {
        let start = rules.validate_start(start, time)?;
        let end = rules.validate_end(start, end)?;
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> DateTime<Local> {
        self.start
    }

    pub const fn end(&self) -> DateTime<Local> {
        self.end
    }
}

impl fmt::Display for CollectionTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} and {}",
            self.start.format(COLLECTION_TIME_FORMAT),
            self.end.format(COLLECTION_TIME_FORMAT)
        )
    }
}

impl DeliveryOption for CollectionTime {
    fn delivery_option_message(&self) -> String {
        format!("Pick up between {self}")
    }
}

/// How a product will reach the winning bidder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryMethod {
    Deliver(Address),
    Collect(CollectionTime),
}

impl DeliveryOption for DeliveryMethod {
    fn delivery_option_message(&self) -> String {
        match self {
            Self::Deliver(address) => address.delivery_option_message(),
            Self::Collect(window) => window.delivery_option_message(),
        }
    }
}

impl From<Address> for DeliveryMethod {
    fn from(address: Address) -> Self {
        Self::Deliver(address)
    }
}

impl From<CollectionTime> for DeliveryMethod {
    fn from(window: CollectionTime) -> Self {
        Self::Collect(window)
    }
}

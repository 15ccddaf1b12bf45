use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::MarketError;

/// Corrective message printed when a currency amount fails to parse.
pub const CURRENCY_FORMAT_HINT: &str = "Must start with '$' is followed by a whole dollar amount, \
with no intervening spaces followed by '.' and exactly two decimal digits";

/// An exact dollar amount.
///
/// Whole dollars and cents are kept separately; the derived ordering compares
/// `whole` first, then `cents`, which is the numeric order of the amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Currency {
    whole: u64,
    cents: u8,
}

impl Currency {
    pub const ZERO: Self = Self { whole: 0, cents: 0 };

    /// Build an amount from components. Returns `None` if `cents > 99`.
    pub const fn new(whole: u64, cents: u8) -> Option<Self> {
        if cents > 99 {
            None
        } else {
            Some(Self { whole, cents })
        }
    }

    pub const fn whole(&self) -> u64 {
        self.whole
    }

    pub const fn cents(&self) -> u8 {
        self.cents
    }

    pub const fn is_zero(&self) -> bool {
        self.whole == 0 && self.cents == 0
    }
}

impl FromStr for Currency {
    type Err = MarketError;

    /// Parse `$<digits>.<two digits>`. No sign, separators or inner whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MarketError::Validation(format!("'{s}' is not a valid amount"));

        let body = s.strip_prefix('$').ok_or_else(invalid)?;
        let (whole, cents) = body.split_once('.').ok_or_else(invalid)?;

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if cents.len() != 2 || !cents.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole: u64 = whole.parse().map_err(|_| invalid())?;
        let cents: u8 = cents.parse().map_err(|_| invalid())?;
        Ok(Self { whole, cents })
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.whole, self.cents)
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

//! Configuration constants for the auction house.
//!
//! This module centralizes magic numbers and the environment overrides
//! read by the binaries.

/// Minimum lead time between "now" and the start of a collection window.
pub const COLLECTION_LEAD_SECS: u64 = 3600;

/// Minimum length of a collection window.
pub const COLLECTION_MIN_WINDOW_SECS: u64 = 3600;

/// Inclusive postcode range accepted for addresses.
pub const POSTCODE_MIN: u32 = 1000;
pub const POSTCODE_MAX: u32 = 9999;

/// Minimum password length.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Search phrase that matches every available product.
pub const MATCH_ALL_PHRASE: &str = "all";

/// Default tracing filter when neither `RUST_LOG` nor `AUCTION_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Environment variable for the tracing filter.
pub const LOG_FILTER_ENV: &str = "AUCTION_LOG";

/// Environment variable overriding [`COLLECTION_LEAD_SECS`].
pub const COLLECTION_LEAD_ENV: &str = "AUCTION_COLLECTION_LEAD_SECS";

/// Environment variable overriding [`COLLECTION_MIN_WINDOW_SECS`].
pub const COLLECTION_MIN_WINDOW_ENV: &str = "AUCTION_COLLECTION_MIN_WINDOW_SECS";

/// Runtime configuration for an [`AuctionHouse`](crate::AuctionHouse).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketConfig {
    pub collection_lead_secs: u64,
    pub collection_min_window_secs: u64,
    pub log_filter: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            collection_lead_secs: COLLECTION_LEAD_SECS,
            collection_min_window_secs: COLLECTION_MIN_WINDOW_SECS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl MarketConfig {
    /// Build a config from the defaults plus any environment overrides.
    ///
    /// Unparseable numeric overrides are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(filter) = lookup(LOG_FILTER_ENV) {
            config.log_filter = filter;
        }
        if let Some(secs) = parse_secs(&lookup, COLLECTION_LEAD_ENV) {
            config.collection_lead_secs = secs;
        }
        if let Some(secs) = parse_secs(&lookup, COLLECTION_MIN_WINDOW_ENV) {
            config.collection_min_window_secs = secs;
        }
        config
    }
}

fn parse_secs(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u64> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(secs) => Some(secs),
        Err(e) => {
            tracing::warn!("Ignoring {key}={raw:?}: {e}");
            None
        }
    }
}

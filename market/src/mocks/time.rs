//! Controllable clock for collection-window tests.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Local};

use crate::error::MarketResult;
use crate::marketplace::parse_local_datetime;
use crate::traits::TimeProvider;

/// 2024-01-01 00:00:00 UTC
const EPOCH_2024: i64 = 1_704_067_200;

/// A clock that only moves when told to. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct MockTime {
    unix_secs: Arc<AtomicI64>,
}

impl MockTime {
    pub fn new(unix_secs: i64) -> Self {
        Self {
            unix_secs: Arc::new(AtomicI64::new(unix_secs)),
        }
    }

    /// A clock pinned to a local wall-clock time such as `25/12/2030 09:00`.
    pub fn at_local(raw: &str) -> MarketResult<Self> {
        Ok(Self::new(parse_local_datetime(raw)?.timestamp()))
    }

    pub fn set(&self, instant: DateTime<Local>) {
        self.unix_secs.store(instant.timestamp(), Ordering::SeqCst);
    }

    /// Move the clock by `delta` (negative moves it back).
    pub fn advance(&self, delta: Duration) {
        self.unix_secs.fetch_add(delta.num_seconds(), Ordering::SeqCst);
    }
}

impl Default for MockTime {
    fn default() -> Self {
        Self::new(EPOCH_2024)
    }
}

impl TimeProvider for MockTime {
    fn now_unix(&self) -> u64 {
        u64::try_from(self.unix_secs.load(Ordering::SeqCst)).unwrap_or(0)
    }
}

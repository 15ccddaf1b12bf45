//! Time provider abstraction for testable time-dependent code.

use chrono::{DateTime, Local};
use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for providing the current time.
///
/// Collection windows are validated against "now", so the clock is injected
/// to keep those checks deterministic under test.
pub trait TimeProvider: Send + Sync {
    /// Returns the current Unix timestamp in seconds.
    fn now_unix(&self) -> u64;

    /// Returns the current time in the local timezone.
    fn now(&self) -> DateTime<Local> {
        let secs = i64::try_from(self.now_unix()).unwrap_or(i64::MAX);
        DateTime::from_timestamp(secs, 0)
            .map(|utc| utc.with_timezone(&Local))
            .unwrap_or_else(Local::now)
    }
}

/// Production implementation that uses the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_unix(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

impl SystemTimeProvider {
    pub const fn new() -> Self {
        Self
    }
}

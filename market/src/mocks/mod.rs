//! Mock implementations for testing.

pub mod time;

pub use time::MockTime;

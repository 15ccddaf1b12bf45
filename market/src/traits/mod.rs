//! Trait abstractions for dependency injection and testability.
//!
//! The marketplace reads the clock only through [`TimeProvider`], so tests
//! can pin "now" when validating collection windows.

pub mod time;

pub use time::{SystemTimeProvider, TimeProvider};

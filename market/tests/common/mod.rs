pub mod harness;

pub use harness::{amount, email, MarketHarness, PASSWORD};

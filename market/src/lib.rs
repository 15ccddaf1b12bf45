pub mod actions;
pub mod config;
pub mod console;
pub mod error;
pub mod headless;
pub mod marketplace;
pub mod shared_state;
pub mod traits;

#[cfg(any(test, feature = "test-support"))]
pub mod mocks;

pub use actions::{BidReceipt, CustomerView, ProductView, SaleReceipt, Session};
pub use config::MarketConfig;
pub use console::{Console, MenuOutcome, Shell};
pub use error::{MarketError, MarketResult};
pub use marketplace::{
    Address, Bid, CollectionTime, Currency, Customer, CustomerRegistry, DeliveryMethod,
    DeliveryOption, EmailAddress, Name, Password, Product, ProductHandle, ProductId,
    ProductRegistry, ProductStatus,
};
pub use shared_state::{AuctionHouse, MarketState};
pub use traits::{SystemTimeProvider, TimeProvider};

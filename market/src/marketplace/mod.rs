pub mod address;
pub mod bid;
pub mod currency;
pub mod customer;
pub mod delivery;
pub mod identity;
pub mod product;
pub mod registry;

pub use address::{Address, AddressBuilder, State, StreetType, Unit};
pub use bid::Bid;
pub use currency::Currency;
pub use customer::{Customer, CustomerRegistry};
pub use delivery::{
    parse_local_datetime, CollectionRules, CollectionTime, DeliveryMethod, DeliveryOption,
};
pub use identity::{EmailAddress, Name, Password};
pub use product::{Product, ProductHandle, ProductId, ProductStatus};
pub use registry::ProductRegistry;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use super::bid::Bid;
use super::currency::Currency;
use super::delivery::DeliveryMethod;
use super::identity::EmailAddress;
use crate::error::{MarketError, MarketResult};

/// Unique product identifier, assigned by the auction house in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a product is in its sale lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    /// Listed, nobody has bid yet
    Advertised,
    /// At least one bid has been accepted
    BidInProgress,
    /// Settled to the highest bidder
    Sold,
}

/// A product advertised in the auction house.
#[derive(Debug, Clone)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    price: Currency,
    seller: EmailAddress,
    bid: Option<Bid>,
    status: ProductStatus,
}

impl Product {
    /// Create a product. Name and description must be non-blank and differ.
    pub fn new(
        id: ProductId,
        name: &str,
        description: &str,
        price: Currency,
        seller: EmailAddress,
    ) -> MarketResult<Self> {
        let name = name.trim();
        let description = description.trim();
        if name.is_empty() {
            return Err(MarketError::Validation("Name cannot be empty".into()));
        }
        if description.is_empty() {
            return Err(MarketError::Validation("Description cannot be empty".into()));
        }
        if name == description {
            return Err(MarketError::Validation(
                "Product description cannot be the same as the name".into(),
            ));
        }
        Ok(Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            price,
            seller,
            bid: None,
            status: ProductStatus::Advertised,
        })
    }

    pub const fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub const fn price(&self) -> Currency {
        self.price
    }

    pub const fn seller(&self) -> &EmailAddress {
        &self.seller
    }

    pub const fn bid(&self) -> Option<&Bid> {
        self.bid.as_ref()
    }

    /// Delivery commitment of the current bid, if its bidder attached one.
    pub fn delivery_method(&self) -> Option<&DeliveryMethod> {
        self.bid.as_ref().and_then(Bid::delivery)
    }

    pub const fn status(&self) -> ProductStatus {
        self.status
    }

    /// Check whether `amount` would be accepted, without changing anything.
    pub fn check_bid(&self, amount: Currency) -> MarketResult<()> {
        if self.status == ProductStatus::Sold {
            return Err(MarketError::InvalidState(format!(
                "{} has already been sold",
                self.name
            )));
        }
        if amount.is_zero() {
            return Err(MarketError::Validation(
                "Bid amount must be greater than $0.00".into(),
            ));
        }
        match &self.bid {
            Some(current) if !current.is_outbid_by(amount) => Err(MarketError::BidTooLow {
                current: current.amount,
            }),
            _ => Ok(()),
        }
    }

    /// Replace the current bid if `bid` is strictly higher. Returns the displaced bid.
    ///
    /// The displaced bid takes its delivery commitment with it.
    pub fn place_bid(&mut self, bid: Bid) -> MarketResult<Option<Bid>> {
        self.check_bid(bid.amount)?;
        self.status = ProductStatus::BidInProgress;
        Ok(self.bid.replace(bid))
    }

    /// Attach or replace the current bid's delivery commitment. Returns the previous one.
    pub fn set_delivery_method(
        &mut self,
        method: DeliveryMethod,
    ) -> MarketResult<Option<DeliveryMethod>> {
        match self.bid.as_mut() {
            Some(bid) => Ok(bid.set_delivery(method)),
            None => Err(MarketError::InvalidState(format!(
                "{} has no bid to attach delivery to",
                self.name
            ))),
        }
    }

    /// The bid and delivery commitment a sale needs, or the missing precondition.
    pub fn sale_terms(&self) -> MarketResult<(&Bid, &DeliveryMethod)> {
        if self.status == ProductStatus::Sold {
            return Err(MarketError::PreconditionFailed(format!(
                "{} has already been sold",
                self.name
            )));
        }
        let bid = self.bid.as_ref().ok_or_else(|| {
            MarketError::PreconditionFailed(format!("{} has no bid", self.name))
        })?;
        let delivery = bid.delivery().ok_or_else(|| {
            MarketError::PreconditionFailed(format!("{} has no delivery method", self.name))
        })?;
        Ok((bid, delivery))
    }

    pub(crate) fn mark_sold(&mut self) {
        self.status = ProductStatus::Sold;
    }

    /// Listing order: name, then description, then price.
    pub fn listing_order(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.description.cmp(&other.description))
            .then_with(|| self.price.cmp(&other.price))
    }

    /// Case-insensitive substring match on name or description.
    pub fn matches(&self, phrase: &str) -> bool {
        let phrase = phrase.to_lowercase();
        self.name.to_lowercase().contains(&phrase)
            || self.description.to_lowercase().contains(&phrase)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.name, self.description, self.price)
    }
}

/// Shared handle to one product.
///
/// Every registry that lists the product holds a clone of the same handle,
/// so a bid placed through a search result is visible in the seller's list.
/// Equality is by [`ProductId`].
#[derive(Debug, Clone)]
pub struct ProductHandle {
    id: ProductId,
    inner: Arc<RwLock<Product>>,
}

impl ProductHandle {
    pub fn new(product: Product) -> Self {
        Self {
            id: product.id(),
            inner: Arc::new(RwLock::new(product)),
        }
    }

    pub const fn id(&self) -> ProductId {
        self.id
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Product> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Product> {
        self.inner.write()
    }

    /// Clone of the current product state.
    pub fn snapshot(&self) -> Product {
        self.inner.read().clone()
    }

    /// True if both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for ProductHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ProductHandle {}

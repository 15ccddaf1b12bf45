use std::fmt;

use super::currency::Currency;
use super::delivery::DeliveryMethod;
use super::identity::{EmailAddress, Name};

/// The current highest offer on a product, with the bidder's delivery commitment.
///
/// A higher offer replaces the whole record, so a new bid never carries the
/// previous bidder's delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bid {
    pub bidder_name: Name,
    pub bidder_email: EmailAddress,
    pub amount: Currency,
    delivery: Option<DeliveryMethod>,
}

impl Bid {
    pub const fn new(bidder_name: Name, bidder_email: EmailAddress, amount: Currency) -> Self {
        Self {
            bidder_name,
            bidder_email,
            amount,
            delivery: None,
        }
    }

    pub const fn delivery(&self) -> Option<&DeliveryMethod> {
        self.delivery.as_ref()
    }

    /// Attach or replace the delivery commitment. Returns the previous one.
    pub fn set_delivery(&mut self, method: DeliveryMethod) -> Option<DeliveryMethod> {
        self.delivery.replace(method)
    }

    /// True if `amount` would replace this bid.
    pub fn is_outbid_by(&self, amount: Currency) -> bool {
        amount > self.amount
    }
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}",
            self.bidder_name, self.bidder_email, self.amount
        )
    }
}

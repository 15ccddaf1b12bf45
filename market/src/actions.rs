//! Business logic for auction operations.
//!
//! These methods drive registration, advertising, bidding, delivery and
//! sale settlement, shared by the console binary and the headless driver.
//! Each one returns plain data for the caller to print.

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::{MarketError, MarketResult};
use crate::marketplace::{
    Address, Bid, CollectionTime, Currency, Customer, DeliveryMethod, DeliveryOption,
    EmailAddress, Name, Password, Product, ProductHandle, ProductId, ProductRegistry,
    ProductStatus,
};
use crate::shared_state::{AuctionHouse, MarketState};

/// Public snapshot of a registered customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerView {
    pub name: String,
    pub email: String,
}

impl From<&Customer> for CustomerView {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name().to_string(),
            email: customer.email().to_string(),
        }
    }
}

/// A signed-in customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub name: Name,
    pub email: EmailAddress,
    /// True until the customer records a home address.
    pub needs_home_address: bool,
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.email)
    }
}

/// Point-in-time copy of a product for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Currency,
    pub seller: String,
    pub bidder_name: Option<String>,
    pub bidder_email: Option<String>,
    pub bid_amount: Option<Currency>,
    pub delivery: Option<String>,
    pub status: ProductStatus,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        let bid = product.bid();
        Self {
            id: product.id(),
            name: product.name().to_string(),
            description: product.description().to_string(),
            price: product.price(),
            seller: product.seller().to_string(),
            bidder_name: bid.map(|b| b.bidder_name.to_string()),
            bidder_email: bid.map(|b| b.bidder_email.to_string()),
            bid_amount: bid.map(|b| b.amount),
            delivery: product
                .delivery_method()
                .map(DeliveryOption::delivery_option_message),
            status: product.status(),
        }
    }
}

/// Confirmation of an accepted bid and, once attached, its delivery commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BidReceipt {
    pub product_id: ProductId,
    pub product_name: String,
    pub amount: Currency,
    pub bidder_name: String,
    pub bidder_email: String,
    pub delivery: Option<String>,
}

impl BidReceipt {
    fn from_product(product: &Product) -> MarketResult<Self> {
        let bid = product.bid().ok_or_else(|| {
            MarketError::PreconditionFailed(format!("{} has no bid", product.name()))
        })?;
        Ok(Self {
            product_id: product.id(),
            product_name: product.name().to_string(),
            amount: bid.amount,
            bidder_name: bid.bidder_name.to_string(),
            bidder_email: bid.bidder_email.to_string(),
            delivery: product
                .delivery_method()
                .map(DeliveryOption::delivery_option_message),
        })
    }
}

/// Result of a completed sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleReceipt {
    pub product_id: ProductId,
    pub product_name: String,
    pub buyer_name: String,
    pub buyer_email: String,
    pub amount: Currency,
    pub delivery: String,
}

impl std::fmt::Display for SaleReceipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Product {} sold to {} for {}",
            self.product_name, self.buyer_name, self.amount
        )?;
        write!(f, "\tCollection arrangement: {}", self.delivery)
    }
}

fn sorted_views(mut registry: ProductRegistry) -> Vec<ProductView> {
    registry.sort();
    registry
        .iter()
        .map(|p| ProductView::from(&*p.read()))
        .collect()
}

impl MarketState {
    /// The product a bidder may act on: unsold, listed, and not their own.
    fn biddable_product(
        &self,
        bidder: &EmailAddress,
        id: ProductId,
    ) -> MarketResult<(Name, ProductHandle)> {
        let customer = self.customers.get(bidder)?;
        let handle = self
            .products
            .find(id)
            .cloned()
            .ok_or_else(|| MarketError::NotFound(format!("No product {id} is for sale")))?;
        if handle.read().seller() == bidder {
            return Err(MarketError::InvalidState(
                "You cannot bid on your own product".into(),
            ));
        }
        Ok((customer.name().clone(), handle))
    }
}

impl AuctionHouse {
    // ── Customers ────────────────────────────────────────────────────

    /// Register a new customer. Emails are unique regardless of case.
    pub fn register(
        &self,
        name: Name,
        email: EmailAddress,
        password: Password,
    ) -> MarketResult<CustomerView> {
        let mut state = self.state.write();
        match state.customers.add(Customer::new(name, email, password)) {
            Ok(customer) => {
                info!("Registered customer {}", customer);
                Ok(CustomerView::from(customer))
            }
            Err(e) => {
                warn!("Registration rejected: {}", e);
                Err(e)
            }
        }
    }

    /// Check credentials and open a session.
    pub fn sign_in(&self, email: &EmailAddress, password: &Password) -> MarketResult<Session> {
        let state = self.state.read();
        let Some(customer) = state.customers.find(email) else {
            debug!("Sign-in for unknown email {}", email);
            return Err(MarketError::Authentication);
        };
        if !customer.verify_password(password) {
            debug!("Wrong password for {}", email);
            return Err(MarketError::Authentication);
        }
        info!("Signed in as {}", customer);
        Ok(Session {
            name: customer.name().clone(),
            email: customer.email().clone(),
            needs_home_address: customer.home_address().is_none(),
        })
    }

    pub fn set_home_address(&self, email: &EmailAddress, address: Address) -> MarketResult<()> {
        let mut state = self.state.write();
        let customer = state.customers.get_mut(email)?;
        info!("Home address for {} set to {}", email, address);
        customer.set_home_address(address);
        Ok(())
    }

    pub fn home_address(&self, email: &EmailAddress) -> MarketResult<Option<Address>> {
        let state = self.state.read();
        Ok(state.customers.get(email)?.home_address().cloned())
    }

    pub fn customer(&self, email: &EmailAddress) -> MarketResult<CustomerView> {
        let state = self.state.read();
        Ok(CustomerView::from(state.customers.get(email)?))
    }

    // ── Listings ─────────────────────────────────────────────────────

    /// Advertise a product. It joins both the global and the seller's registry.
    pub fn advertise(
        &self,
        seller: &EmailAddress,
        name: &str,
        description: &str,
        price: Currency,
    ) -> MarketResult<ProductView> {
        let mut state = self.state.write();
        let customer = state.customers.get_mut(seller)?;
        let product = Product::new(
            self.allocate_product_id(),
            name,
            description,
            price,
            customer.email().clone(),
        )?;
        let view = ProductView::from(&product);
        let handle = ProductHandle::new(product);

        customer.advertised.add(handle.clone());
        state.products.add(handle);
        info!(
            "{} advertised {} ({}) at {}",
            seller, view.name, view.id, view.price
        );
        Ok(view)
    }

    /// The caller's own advertisements, sorted.
    pub fn advertised_products(&self, email: &EmailAddress) -> MarketResult<Vec<ProductView>> {
        let state = self.state.read();
        Ok(sorted_views(state.customers.get(email)?.advertised.clone()))
    }

    /// Products the caller could bid on that match `phrase` (`ALL` for everything), sorted.
    pub fn search(&self, email: &EmailAddress, phrase: &str) -> MarketResult<Vec<ProductView>> {
        let state = self.state.read();
        let customer = state.customers.get(email)?;
        let results = state
            .products
            .available_to(&customer.advertised)
            .search(phrase);
        debug!("Search {:?} by {} matched {}", phrase, email, results.len());
        Ok(sorted_views(results))
    }

    /// The caller's advertisements that have at least one bid, sorted.
    pub fn bid_products(&self, seller: &EmailAddress) -> MarketResult<Vec<ProductView>> {
        let state = self.state.read();
        Ok(sorted_views(
            state.customers.get(seller)?.advertised.bid_products(),
        ))
    }

    /// Everything the caller has bought, sorted.
    pub fn purchases(&self, email: &EmailAddress) -> MarketResult<Vec<ProductView>> {
        let state = self.state.read();
        Ok(sorted_views(state.customers.get(email)?.purchased.clone()))
    }

    // ── Bidding ──────────────────────────────────────────────────────

    /// Check a proposed amount without placing it.
    pub fn check_bid(
        &self,
        bidder: &EmailAddress,
        id: ProductId,
        amount: Currency,
    ) -> MarketResult<()> {
        let state = self.state.read();
        let (_, handle) = state.biddable_product(bidder, id)?;
        let result = handle.read().check_bid(amount);
        result
    }

    /// Place a bid. With no current bid any positive amount wins; otherwise the
    /// amount must be strictly higher. The previous bid is discarded.
    pub fn place_bid(
        &self,
        bidder: &EmailAddress,
        id: ProductId,
        amount: Currency,
    ) -> MarketResult<BidReceipt> {
        let state = self.state.write();
        let (name, handle) = state.biddable_product(bidder, id)?;
        let mut product = handle.write();
        Self::accept_bid(&mut product, Bid::new(name, bidder.clone(), amount))?;
        BidReceipt::from_product(&product)
    }

    /// Attach (or replace) the delivery commitment for the caller's winning bid.
    pub fn attach_delivery(
        &self,
        bidder: &EmailAddress,
        id: ProductId,
        method: DeliveryMethod,
    ) -> MarketResult<BidReceipt> {
        let state = self.state.write();
        let (_, handle) = state.biddable_product(bidder, id)?;
        let mut product = handle.write();
        let holds_bid = product
            .bid()
            .is_some_and(|bid| &bid.bidder_email == bidder);
        if !holds_bid {
            return Err(MarketError::InvalidState(format!(
                "{bidder} does not hold the current bid on {}",
                product.name()
            )));
        }
        Self::accept_delivery(&mut product, method)?;
        BidReceipt::from_product(&product)
    }

    /// Place a bid and attach its delivery commitment as one step.
    pub fn place_bid_with_delivery(
        &self,
        bidder: &EmailAddress,
        id: ProductId,
        amount: Currency,
        method: DeliveryMethod,
    ) -> MarketResult<BidReceipt> {
        let state = self.state.write();
        let (name, handle) = state.biddable_product(bidder, id)?;
        let mut product = handle.write();
        Self::accept_bid(&mut product, Bid::new(name, bidder.clone(), amount))?;
        Self::accept_delivery(&mut product, method)?;
        BidReceipt::from_product(&product)
    }

    fn accept_bid(product: &mut Product, bid: Bid) -> MarketResult<()> {
        let bidder = bid.bidder_email.clone();
        let amount = bid.amount;
        match product.place_bid(bid) {
            Ok(previous) => {
                info!(
                    "Bid {} by {} accepted on {} (previous: {})",
                    amount,
                    bidder,
                    product.id(),
                    previous.map_or_else(|| "none".to_string(), |b| b.amount.to_string())
                );
                Ok(())
            }
            Err(e) => {
                warn!("Bid {} by {} on {} rejected: {}", amount, bidder, product.id(), e);
                Err(e)
            }
        }
    }

    fn accept_delivery(product: &mut Product, method: DeliveryMethod) -> MarketResult<()> {
        debug!(
            "Delivery for {}: {}",
            product.id(),
            method.delivery_option_message()
        );
        product.set_delivery_method(method)?;
        Ok(())
    }

    /// Build a collection window validated against this marketplace's clock.
    pub fn collection_window(
        &self,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> MarketResult<CollectionTime> {
        CollectionTime::new(start, end, self.collection_rules(), self.time())
    }

    // ── Settlement ───────────────────────────────────────────────────

    /// Sell one of the seller's products to its highest bidder.
    ///
    /// All preconditions are checked before anything changes; the buyer's
    /// purchase and both removals then happen under the same write lock.
    pub fn settle_sale(&self, seller: &EmailAddress, id: ProductId) -> MarketResult<SaleReceipt> {
        let mut state = self.state.write();
        let (receipt, buyer_email) = Self::check_sale(&state, seller, id).inspect_err(|e| {
            error!("Settlement of {} by {} refused: {}", id, seller, e);
        })?;
        let MarketState {
            customers,
            products,
        } = &mut *state;

        // check_sale already resolved the seller and the listing.
        let Some(handle) = customers
            .find_mut(seller)
            .and_then(|c| c.advertised.remove(id))
        else {
            return Err(MarketError::PreconditionFailed(format!(
                "{id} vanished during settlement"
            )));
        };
        if let Some(buyer) = customers.find_mut(&buyer_email) {
            buyer.purchased.add(handle.clone());
        }
        products.remove(id);
        handle.write().mark_sold();

        info!(
            "{} sold {} to {} for {}",
            seller, receipt.product_name, receipt.buyer_email, receipt.amount
        );
        Ok(receipt)
    }

    fn check_sale(
        state: &MarketState,
        seller: &EmailAddress,
        id: ProductId,
    ) -> MarketResult<(SaleReceipt, EmailAddress)> {
        let seller_customer = state
            .customers
            .find(seller)
            .ok_or_else(|| MarketError::PreconditionFailed(format!("Unknown seller {seller}")))?;
        let handle = seller_customer.advertised.find(id).ok_or_else(|| {
            MarketError::PreconditionFailed(format!("{id} is not advertised by {seller}"))
        })?;
        let product = handle.read();
        let (bid, delivery) = product.sale_terms()?;
        let buyer = state.customers.find(&bid.bidder_email).ok_or_else(|| {
            MarketError::PreconditionFailed(format!(
                "Bidder {} is not a registered customer",
                bid.bidder_email
            ))
        })?;
        let receipt = SaleReceipt {
            product_id: product.id(),
            product_name: product.name().to_string(),
            buyer_name: buyer.name().to_string(),
            buyer_email: buyer.email().to_string(),
            amount: bid.amount,
            delivery: delivery.delivery_option_message(),
        };
        Ok((receipt, buyer.email().clone()))
    }
}

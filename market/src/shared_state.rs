//! Shared marketplace state for both the console and headless binaries.
//!
//! `AuctionHouse` bundles every registry behind one lock. Each workflow
//! operation (see `actions.rs`) takes that lock once, so a bid check and
//! replacement, a registration check and insert, or the three-registry sale
//! commit can never interleave with another operation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::MarketConfig;
use crate::marketplace::{CollectionRules, CustomerRegistry, ProductId, ProductRegistry};
use crate::traits::{SystemTimeProvider, TimeProvider};

/// Every mutable collection in the marketplace.
#[derive(Debug, Default)]
pub struct MarketState {
    pub customers: CustomerRegistry,
    /// Every advertised product that has not been sold.
    pub products: ProductRegistry,
}

/// Cloneable handle to one marketplace.
#[derive(Clone)]
pub struct AuctionHouse {
    pub(crate) state: Arc<RwLock<MarketState>>,
    next_product_id: Arc<AtomicU64>,
    time: Arc<dyn TimeProvider>,
    rules: CollectionRules,
}

impl AuctionHouse {
    /// A marketplace on the system clock.
    pub fn new(config: &MarketConfig) -> Self {
        Self::with_time(config, SystemTimeProvider::new())
    }

    /// A marketplace on a custom clock.
    pub fn with_time<T: TimeProvider + 'static>(config: &MarketConfig, time: T) -> Self {
        Self {
            state: Arc::new(RwLock::new(MarketState::default())),
            next_product_id: Arc::new(AtomicU64::new(1)),
            time: Arc::new(time),
            rules: CollectionRules::from_config(config),
        }
    }

    pub fn time(&self) -> &dyn TimeProvider {
        self.time.as_ref()
    }

    pub const fn collection_rules(&self) -> &CollectionRules {
        &self.rules
    }

    pub(crate) fn allocate_product_id(&self) -> ProductId {
        ProductId(self.next_product_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Number of registered customers and unsold products.
    pub fn counts(&self) -> (usize, usize) {
        let state = self.state.read();
        (state.customers.len(), state.products.len())
    }
}

impl Default for AuctionHouse {
    fn default() -> Self {
        Self::new(&MarketConfig::default())
    }
}

impl std::fmt::Debug for AuctionHouse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (customers, products) = self.counts();
        f.debug_struct("AuctionHouse")
            .field("customers", &customers)
            .field("products", &products)
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

//! Ordered product collections.

use super::product::{ProductHandle, ProductId};
use crate::config::MATCH_ALL_PHRASE;

/// An ordered list of shared product handles.
///
/// The registry does not enforce uniqueness; callers avoid adding a product
/// twice. Derived registries (search results, views) share handles with the
/// registry they came from.
#[derive(Debug, Clone, Default)]
pub struct ProductRegistry {
    products: Vec<ProductHandle>,
}

impl ProductRegistry {
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn add(&mut self, product: ProductHandle) {
        self.products.push(product);
    }

    /// Append every product of `other`.
    pub fn extend(&mut self, other: &Self) {
        self.products.extend(other.products.iter().cloned());
    }

    /// Remove the first product with the given id. Returns it if present.
    pub fn remove(&mut self, id: ProductId) -> Option<ProductHandle> {
        let index = self.products.iter().position(|p| p.id() == id)?;
        Some(self.products.remove(index))
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.products.iter().any(|p| p.id() == id)
    }

    pub fn find(&self, id: ProductId) -> Option<&ProductHandle> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// Product at a zero-based position.
    pub fn get(&self, index: usize) -> Option<&ProductHandle> {
        self.products.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductHandle> {
        self.products.iter()
    }

    /// Sort by name, then description, then price.
    pub fn sort(&mut self) {
        // Keys are taken once so no two product locks are held together.
        self.products.sort_by_cached_key(|p| {
            let p = p.read();
            (p.name().to_string(), p.description().to_string(), p.price())
        });
    }

    /// Products whose name or description contains `phrase`, ignoring case,
    /// in their current order. The phrase `ALL` matches everything.
    pub fn search(&self, phrase: &str) -> Self {
        let phrase = phrase.trim();
        if phrase.eq_ignore_ascii_case(MATCH_ALL_PHRASE) {
            return self.clone();
        }
        self.filtered(|p| p.read().matches(phrase))
    }

    /// Remove every product that also appears in `other`.
    pub fn remove_overlapping(&mut self, other: &Self) {
        self.products.retain(|p| !other.contains(p.id()));
    }

    /// Products that currently carry a bid.
    pub fn bid_products(&self) -> Self {
        self.filtered(|p| p.read().bid().is_some())
    }

    /// This registry minus a customer's own advertisements.
    pub fn available_to(&self, advertised: &Self) -> Self {
        let mut available = self.clone();
        available.remove_overlapping(advertised);
        available
    }

    fn filtered(&self, keep: impl Fn(&ProductHandle) -> bool) -> Self {
        Self {
            products: self.products.iter().filter(|p| keep(p)).cloned().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ProductRegistry {
    type Item = &'a ProductHandle;
    type IntoIter = std::slice::Iter<'a, ProductHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

impl FromIterator<ProductHandle> for ProductRegistry {
    fn from_iter<I: IntoIterator<Item = ProductHandle>>(iter: I) -> Self {
        Self {
            products: iter.into_iter().collect(),
        }
    }
}

use std::collections::HashMap;
use std::fmt;

use super::address::Address;
use super::identity::{EmailAddress, Name, Password};
use super::registry::ProductRegistry;
use crate::error::{MarketError, MarketResult};

/// A registered customer and the products they sell and have bought.
#[derive(Debug, Clone)]
pub struct Customer {
    name: Name,
    email: EmailAddress,
    password: Password,
    home_address: Option<Address>,
    pub(crate) advertised: ProductRegistry,
    pub(crate) purchased: ProductRegistry,
}

impl Customer {
    pub fn new(name: Name, email: EmailAddress, password: Password) -> Self {
        Self {
            name,
            email,
            password,
            home_address: None,
            advertised: ProductRegistry::new(),
            purchased: ProductRegistry::new(),
        }
    }

    pub const fn name(&self) -> &Name {
        &self.name
    }

    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub const fn home_address(&self) -> Option<&Address> {
        self.home_address.as_ref()
    }

    /// Record or replace the home address. There is no way to clear it.
    pub fn set_home_address(&mut self, address: Address) -> Option<Address> {
        self.home_address.replace(address)
    }

    pub fn verify_password(&self, password: &Password) -> bool {
        self.password == *password
    }

    pub const fn advertised(&self) -> &ProductRegistry {
        &self.advertised
    }

    pub const fn purchased(&self) -> &ProductRegistry {
        &self.purchased
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.email)
    }
}

/// Customers keyed by case-insensitive email, in registration order.
#[derive(Debug, Clone, Default)]
pub struct CustomerRegistry {
    customers: Vec<Customer>,
    by_email: HashMap<EmailAddress, usize>,
}

impl CustomerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Add a customer, rejecting an email that is already registered.
    pub fn add(&mut self, customer: Customer) -> MarketResult<&Customer> {
        if self.by_email.contains_key(customer.email()) {
            return Err(MarketError::Duplicate(format!(
                "Email {} already in use",
                customer.email()
            )));
        }
        let index = self.customers.len();
        self.by_email.insert(customer.email().clone(), index);
        self.customers.push(customer);
        Ok(&self.customers[index])
    }

    pub fn find(&self, email: &EmailAddress) -> Option<&Customer> {
        self.by_email.get(email).map(|&i| &self.customers[i])
    }

    pub fn find_mut(&mut self, email: &EmailAddress) -> Option<&mut Customer> {
        let index = *self.by_email.get(email)?;
        self.customers.get_mut(index)
    }

    /// Like [`find`](Self::find), but a miss is an error.
    pub fn get(&self, email: &EmailAddress) -> MarketResult<&Customer> {
        self.find(email)
            .ok_or_else(|| MarketError::NotFound(format!("No customer with email {email}")))
    }

    pub fn get_mut(&mut self, email: &EmailAddress) -> MarketResult<&mut Customer> {
        self.find_mut(email)
            .ok_or_else(|| MarketError::NotFound(format!("No customer with email {email}")))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter()
    }
}

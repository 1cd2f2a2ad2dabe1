//! Order history repository.

use emporium_core::{Email, Order};

use super::RepositoryError;
use crate::storage::{self, KeyValueStore, keys};

/// Repository for per-user order histories.
pub struct OrderRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Orders placed by `email`, most recent first. Empty if none.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the history cannot be decoded.
    pub fn orders_for(&self, email: &Email) -> Result<Vec<Order>, RepositoryError> {
        let key = keys::order_history(email.as_str());
        Ok(storage::load(self.store, &key)?.unwrap_or_default())
    }

    /// Put `order` at the front of the history for `email`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the history cannot be read or written.
    pub fn append_order(&self, email: &Email, order: Order) -> Result<(), RepositoryError> {
        let key = keys::order_history(email.as_str());
        let mut orders = self.orders_for(email)?;
        orders.insert(0, order);
        storage::save(self.store, &key, &orders)?;
        Ok(())
    }
}

//! Cart store.

use emporium_core::{Cart, CartItem, Product, ProductId};
use rust_decimal::Decimal;
use thiserror::Error;
use tokio::sync::watch;

use super::Persisted;
use crate::storage::{SharedStore, keys};

/// Errors from cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Quantities must be positive; use `remove_item_completely` to drop a line.
    #[error("quantity for product {0} must be at least 1")]
    ZeroQuantity(ProductId),
}

/// The shopping cart, persisted under the `cart` key.
pub struct CartStore {
    inner: Persisted<Cart>,
}

impl CartStore {
    /// Restore the cart from storage.
    #[must_use]
    pub fn load(store: SharedStore) -> Self {
        Self {
            inner: Persisted::load(store, keys::CART),
        }
    }

    /// Add one unit of `product`.
    pub fn add_to_cart(&self, product: Product) {
        self.inner.update(|cart| cart.add(product));
    }

    /// Remove one unit. Returns `false` if the product was not in the cart.
    pub fn remove_from_cart(&self, id: ProductId) -> bool {
        self.inner.update(|cart| cart.remove_one(id))
    }

    /// Set a line's quantity. Absent ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ZeroQuantity` for a quantity of 0; the cart is
    /// left unchanged.
    pub fn update_cart_item_quantity(&self, id: ProductId, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity(id));
        }
        self.inner.update(|cart| cart.set_quantity(id, quantity));
        Ok(())
    }

    /// Drop a line regardless of quantity. Returns `false` if absent.
    pub fn remove_item_completely(&self, id: ProductId) -> bool {
        self.inner.update(|cart| cart.remove_line(id))
    }

    pub fn clear_cart(&self) {
        self.inner.update(Cart::clear);
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// A copy of the current cart.
    #[must_use]
    pub fn snapshot(&self) -> Cart {
        self.inner.snapshot()
    }

    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.inner.borrow().items().to_vec()
    }

    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.inner.borrow().total_quantity()
    }

    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.inner.borrow().total_amount()
    }

    #[must_use]
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.inner.borrow().quantity_of(id)
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.inner.borrow().get(id).is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Receive every committed cart snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.inner.subscribe()
    }
}

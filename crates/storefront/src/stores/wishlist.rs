//! Wishlist store.

use emporium_core::{Product, ProductId, Wishlist};
use tokio::sync::watch;

use super::Persisted;
use crate::storage::{SharedStore, keys};

/// Favorited products, persisted under the `wishlist` key.
pub struct WishlistStore {
    inner: Persisted<Wishlist>,
}

impl WishlistStore {
    /// Restore the wishlist from storage.
    #[must_use]
    pub fn load(store: SharedStore) -> Self {
        Self {
            inner: Persisted::load(store, keys::WISHLIST),
        }
    }

    /// Add `product` unless it is already present. Returns whether it was added.
    pub fn add_to_wishlist(&self, product: Product) -> bool {
        self.inner.update(|wishlist| wishlist.add(product))
    }

    /// Returns whether anything was removed.
    pub fn remove_from_wishlist(&self, id: ProductId) -> bool {
        self.inner.update(|wishlist| wishlist.remove(id))
    }

    pub fn clear_wishlist(&self) {
        self.inner.update(Wishlist::clear);
    }

    /// Add the product if absent, remove it if present.
    ///
    /// Returns `true` if the product is on the wishlist afterwards.
    pub fn toggle(&self, product: Product) -> bool {
        let id = product.id;
        self.inner.update(|wishlist| {
            if wishlist.contains(id) {
                wishlist.remove(id)
            } else {
                wishlist.add(product)
            }
        });
        self.contains(id)
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.inner.borrow().contains(id)
    }

    #[must_use]
    pub fn items(&self) -> Vec<Product> {
        self.inner.borrow().items().to_vec()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    #[must_use]
    pub fn snapshot(&self) -> Wishlist {
        self.inner.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Wishlist> {
        self.inner.subscribe()
    }
}

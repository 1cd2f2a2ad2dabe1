//! Wishlist: a set of favorited products, unique by id, in the order added.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::Product;

/// Favorited products. Serialized as a plain JSON array of products.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(from = "Vec<Product>")]
pub struct Wishlist {
    items: Vec<Product>,
}

impl From<Vec<Product>> for Wishlist {
    fn from(products: Vec<Product>) -> Self {
        let mut wishlist = Self::default();
        for product in products {
            wishlist.add(product);
        }
        wishlist
    }
}

impl Serialize for Wishlist {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl Wishlist {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Append a product unless it is already present.
    pub fn add(&mut self, product: Product) -> bool {
        if self.contains(product.id) {
            return false;
        }
        self.items.push(product);
        true
    }

    /// Remove a product by id if present.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Empty the wishlist.
    pub fn clear(&mut self) -> bool {
        let changed = !self.items.is_empty();
        self.items.clear();
        changed
    }
}

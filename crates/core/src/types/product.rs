//! Catalog product types.
//!
//! Field names match the remote catalog's JSON so products deserialize
//! straight from `GET /products` and persist unchanged inside cart and
//! wishlist blobs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Aggregate customer rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rating {
    /// Average score, 0.0 to 5.0.
    pub rate: f64,
    /// Number of ratings.
    pub count: u32,
}

/// A product as served by the catalog. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Non-negative unit price.
    pub price: Decimal,
    /// Catalog category key (e.g. `electronics`, `jewelery`).
    pub category: String,
    pub description: String,
    /// Image URL.
    pub image: String,
    #[serde(default)]
    pub rating: Rating,
}

impl Product {
    /// Case-insensitive substring match on the title.
    #[must_use]
    pub fn title_contains(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
    }

    /// Case-insensitive substring match on the title or description.
    #[must_use]
    pub fn text_contains(&self, needle_lower: &str) -> bool {
        self.title_contains(needle_lower) || self.description.to_lowercase().contains(needle_lower)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"{
        "id": 1,
        "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
        "price": 109.95,
        "description": "Your perfect pack for everyday use and walks in the forest.",
        "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
        "rating": { "rate": 3.9, "count": 120 }
    }"#;

    #[test]
    fn test_deserialize_catalog_product() {
        let product: Product = serde_json::from_str(CATALOG_JSON).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Decimal::new(10995, 2));
        assert_eq!(product.category, "men's clothing");
        assert_eq!(product.rating.count, 120);
    }

    #[test]
    fn test_missing_rating_defaults() {
        let json = r#"{"id":2,"title":"T","price":1,"category":"c","description":"d","image":"i"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.rating, Rating::default());
    }

    #[test]
    fn test_text_matching_is_case_insensitive() {
        let product: Product = serde_json::from_str(CATALOG_JSON).unwrap();
        assert!(product.title_contains("backpack"));
        assert!(!product.title_contains("forest"));
        assert!(product.text_contains("forest"));
    }
}

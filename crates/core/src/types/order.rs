//! Placed orders.

use core::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::{Cart, CartItem};
use super::price::with_tax;

/// Human-facing order number, `ORD-` followed by six digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Smallest six-digit suffix.
    pub const MIN_SUFFIX: u32 = 100_000;
    /// Largest six-digit suffix.
    pub const MAX_SUFFIX: u32 = 999_999;

    /// Build an order number from its numeric suffix.
    ///
    /// Returns `None` unless the suffix has exactly six digits.
    #[must_use]
    pub fn from_suffix(suffix: u32) -> Option<Self> {
        (Self::MIN_SUFFIX..=Self::MAX_SUFFIX)
            .contains(&suffix)
            .then(|| Self(format!("ORD-{suffix}")))
    }

    /// Build an order number, clamping the suffix into the six-digit range.
    #[must_use]
    pub fn from_suffix_clamped(suffix: u32) -> Self {
        Self(format!(
            "ORD-{}",
            suffix.clamp(Self::MIN_SUFFIX, Self::MAX_SUFFIX)
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An immutable record of a completed checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_number: OrderNumber,
    pub date: DateTime<Utc>,
    /// Cart lines at the moment the order was placed.
    pub items: Vec<CartItem>,
    /// Subtotal plus tax, rounded to cents.
    pub total: Decimal,
}

impl Order {
    /// Snapshot a cart into an order.
    #[must_use]
    pub fn from_cart(order_number: OrderNumber, date: DateTime<Utc>, cart: &Cart) -> Self {
        Self {
            order_number,
            date,
            items: cart.items().to_vec(),
            total: with_tax(cart.total_amount()),
        }
    }

    /// Total number of units in the order.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity())).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::id::ProductId;
    use crate::types::product::{Product, Rating};

    #[test]
    fn test_order_number_requires_six_digits() {
        assert_eq!(
            OrderNumber::from_suffix(123_456).unwrap().as_str(),
            "ORD-123456"
        );
        assert!(OrderNumber::from_suffix(99_999).is_none());
        assert!(OrderNumber::from_suffix(1_000_000).is_none());
        assert_eq!(OrderNumber::from_suffix_clamped(42).as_str(), "ORD-100000");
        assert_eq!(OrderNumber::from_suffix_clamped(5_000_000).as_str(), "ORD-999999");
    }

    #[test]
    fn test_from_cart_adds_tax_and_snapshots_items() {
        let mut cart = Cart::new();
        let product = Product {
            id: ProductId::new(1),
            title: "Ring".to_string(),
            price: Decimal::new(1050, 2),
            category: "jewelery".to_string(),
            description: String::new(),
            image: String::new(),
            rating: Rating::default(),
        };
        cart.add(product.clone());
        cart.add(product);

        let order = Order::from_cart(
            OrderNumber::from_suffix(500_000).unwrap(),
            Utc::now(),
            &cart,
        );
        assert_eq!(order.total, Decimal::new(2310, 2));
        assert_eq!(order.items, cart.items());
        assert_eq!(order.item_count(), 2);
    }
}

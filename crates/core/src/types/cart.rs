//! Shopping cart state and its transitions.
//!
//! [`Cart`] owns its line items and both aggregates. Every transition
//! recomputes `total_quantity` and `total_amount` from the full item list, so
//! a stale aggregate is never observable. Transitions return `true` when the
//! cart changed, which the storefront uses to decide whether to persist and
//! notify.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::Product;

/// A product in the cart with its quantity.
///
/// Serialized flat: the product's fields followed by `quantity` and
/// `totalPrice`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    product: Product,
    quantity: u32,
    total_price: Decimal,
}

impl CartItem {
    fn new(product: Product) -> Self {
        let total_price = product.price;
        Self {
            product,
            quantity: 1,
            total_price,
        }
    }

    fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.total_price = self.product.price * Decimal::from(quantity);
    }

    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `price * quantity`.
    #[must_use]
    pub const fn total_price(&self) -> Decimal {
        self.total_price
    }
}

/// The shopping cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", from = "StoredCart")]
pub struct Cart {
    items: Vec<CartItem>,
    total_quantity: u64,
    total_amount: Decimal,
}

/// Persisted cart shape. Aggregates in the blob are ignored and recomputed.
#[derive(Deserialize)]
struct StoredCart {
    #[serde(default)]
    items: Vec<CartItem>,
}

impl From<StoredCart> for Cart {
    fn from(stored: StoredCart) -> Self {
        let mut cart = Self::default();
        for mut item in stored.items {
            if item.quantity == 0 || cart.position(item.id()).is_some() {
                continue;
            }
            let quantity = item.quantity;
            item.set_quantity(quantity);
            cart.items.push(item);
        }
        cart.recalculate();
        cart
    }
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of item quantities.
    #[must_use]
    pub const fn total_quantity(&self) -> u64 {
        self.total_quantity
    }

    /// Sum of item totals (pre-tax subtotal).
    #[must_use]
    pub const fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find a line item by product id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Quantity of a product, 0 if absent.
    #[must_use]
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.get(id).map_or(0, CartItem::quantity)
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    fn recalculate(&mut self) {
        self.total_quantity = self.items.iter().map(|item| u64::from(item.quantity)).sum();
        self.total_amount = self.items.iter().map(CartItem::total_price).sum();
    }

    /// Add one unit of a product, inserting a new line if needed.
    pub fn add(&mut self, product: Product) -> bool {
        if let Some(item) = self.items.iter_mut().find(|item| item.id() == product.id) {
            let quantity = item.quantity.saturating_add(1);
            item.set_quantity(quantity);
        } else {
            self.items.push(CartItem::new(product));
        }
        self.recalculate();
        true
    }

    /// Remove one unit; the line disappears when its quantity was 1.
    ///
    /// Absent ids leave the cart unchanged.
    pub fn remove_one(&mut self, id: ProductId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        match self.items.get_mut(index) {
            Some(item) if item.quantity > 1 => {
                let quantity = item.quantity - 1;
                item.set_quantity(quantity);
            }
            _ => {
                self.items.remove(index);
            }
        }
        self.recalculate();
        true
    }

    /// Set a line's quantity directly.
    ///
    /// Callers must pass a positive quantity; zero is ignored here and
    /// rejected one layer up. Absent ids leave the cart unchanged.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }
        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            return false;
        };
        item.set_quantity(quantity);
        self.recalculate();
        true
    }

    /// Remove a line regardless of its quantity.
    pub fn remove_line(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        let changed = self.items.len() != before;
        if changed {
            self.recalculate();
        }
        changed
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> bool {
        let changed = !self.items.is_empty();
        self.items.clear();
        self.recalculate();
        changed
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::product::Rating;

    fn product(id: u32, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price,
            category: "electronics".to_string(),
            description: String::new(),
            image: String::new(),
            rating: Rating::default(),
        }
    }

    fn assert_consistent(cart: &Cart) {
        let quantity: u64 = cart.items().iter().map(|i| u64::from(i.quantity())).sum();
        let amount: Decimal = cart.items().iter().map(CartItem::total_price).sum();
        assert_eq!(cart.total_quantity(), quantity);
        assert_eq!(cart.total_amount(), amount);
        for item in cart.items() {
            assert!(item.quantity() >= 1);
            assert_eq!(
                item.total_price(),
                item.product().price * Decimal::from(item.quantity())
            );
        }
    }

    #[test]
    fn test_adding_same_product_twice_increments() {
        let mut cart = Cart::new();
        let p = product(1, Decimal::new(1999, 2));
        cart.add(p.clone());
        cart.add(p);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity_of(ProductId::new(1)), 2);
        assert_eq!(cart.total_amount(), Decimal::new(3998, 2));
        assert_consistent(&cart);
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add(product(3, Decimal::ONE));
        cart.add(product(1, Decimal::ONE));
        cart.add(product(3, Decimal::ONE));
        let ids: Vec<_> = cart.items().iter().map(CartItem::id).collect();
        assert_eq!(ids, vec![ProductId::new(3), ProductId::new(1)]);
    }

    #[test]
    fn test_remove_one_removes_single_unit_line() {
        let mut cart = Cart::new();
        cart.add(product(1, Decimal::TEN));
        assert!(cart.remove_one(ProductId::new(1)));
        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity(), 0);
        assert_eq!(cart.total_amount(), Decimal::ZERO);
    }

    #[test]
    fn test_remove_one_decrements() {
        let mut cart = Cart::new();
        let p = product(1, Decimal::TEN);
        cart.add(p.clone());
        cart.add(p.clone());
        cart.add(p);
        cart.remove_one(ProductId::new(1));
        assert_eq!(cart.quantity_of(ProductId::new(1)), 2);
        assert_eq!(cart.total_amount(), Decimal::from(20));
        assert_consistent(&cart);
    }

    #[test]
    fn test_remove_one_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(product(1, Decimal::TEN));
        let before = cart.clone();
        assert!(!cart.remove_one(ProductId::new(99)));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity_recomputes() {
        let mut cart = Cart::new();
        cart.add(product(1, Decimal::new(250, 2)));
        cart.add(product(2, Decimal::ONE));
        assert!(cart.set_quantity(ProductId::new(1), 4));
        assert_eq!(cart.total_quantity(), 5);
        assert_eq!(cart.total_amount(), Decimal::from(11));
        assert_consistent(&cart);
    }

    #[test]
    fn test_set_quantity_zero_is_ignored() {
        let mut cart = Cart::new();
        cart.add(product(1, Decimal::ONE));
        assert!(!cart.set_quantity(ProductId::new(1), 0));
        assert_eq!(cart.quantity_of(ProductId::new(1)), 1);
    }

    #[test]
    fn test_remove_line_ignores_quantity() {
        let mut cart = Cart::new();
        let p = product(1, Decimal::ONE);
        cart.add(p.clone());
        cart.add(p);
        cart.add(product(2, Decimal::TWO));
        assert!(cart.remove_line(ProductId::new(1)));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_amount(), Decimal::TWO);
        assert!(!cart.remove_line(ProductId::new(1)));
    }

    #[test]
    fn test_clear_zeroes_aggregates() {
        let mut cart = Cart::new();
        cart.add(product(1, Decimal::ONE));
        assert!(cart.clear());
        assert_eq!(cart, Cart::new());
        assert!(!cart.clear());
    }

    #[test]
    fn test_invariant_holds_across_operation_sequence() {
        let mut cart = Cart::new();
        let ops: [(u8, u32); 10] = [
            (0, 1), (0, 2), (0, 1), (2, 1), (0, 3), (1, 2), (1, 2), (3, 3), (0, 2), (1, 1),
        ];
        for (op, id) in ops {
            let id_typed = ProductId::new(id);
            match op {
                0 => {
                    cart.add(product(id, Decimal::new(i64::from(id) * 125, 2)));
                }
                1 => {
                    cart.remove_one(id_typed);
                }
                2 => {
                    cart.set_quantity(id_typed, 7);
                }
                _ => {
                    cart.remove_line(id_typed);
                }
            }
            assert_consistent(&cart);
        }
    }

    #[test]
    fn test_serialized_shape_is_flat() {
        let mut cart = Cart::new();
        cart.add(product(5, Decimal::new(1050, 2)));
        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json["totalQuantity"], 1);
        assert_eq!(json["items"][0]["id"], 5);
        assert_eq!(json["items"][0]["quantity"], 1);
        assert!(json["items"][0].get("totalPrice").is_some());
        assert!(json["items"][0].get("product").is_none());
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut cart = Cart::new();
        cart.add(product(1, Decimal::new(1999, 2)));
        cart.add(product(2, Decimal::new(500, 2)));
        cart.add(product(1, Decimal::new(1999, 2)));
        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_loading_recomputes_stale_aggregates() {
        let json = r#"{
            "items": [
                {"id": 1, "title": "A", "price": 10, "category": "c", "description": "",
                 "image": "", "rating": {"rate": 4.0, "count": 1},
                 "quantity": 3, "totalPrice": 999},
                {"id": 2, "title": "B", "price": 5, "category": "c", "description": "",
                 "image": "", "rating": {"rate": 4.0, "count": 1},
                 "quantity": 0, "totalPrice": 0}
            ],
            "totalQuantity": 42,
            "totalAmount": 1
        }"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.total_amount(), Decimal::from(30));
        assert_consistent(&cart);
    }
}

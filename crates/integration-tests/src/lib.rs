//! Integration tests for Emporium.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p emporium-integration-tests
//! ```
//!
//! No external services are needed. The storefront runs over an in-memory
//! key-value store with [`FakeCatalog`] and [`FakeGateway`]; relay tests bind
//! the payment relay and a stand-in processor to ephemeral local ports.
//!
//! # Test Categories
//!
//! - `cart_wishlist` - Cart and wishlist stores
//! - `catalog` - Fetching, filtering and search
//! - `auth` - Registration, login and profile edits
//! - `checkout` - The checkout state machine end to end
//! - `persistence` - Reload from the key-value store
//! - `payment_relay` - Storefront relay client against the relay server

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use emporium_core::{CurrencyCode, PaymentIntentStatus, Product, ProductId, Rating};
use emporium_storefront::Storefront;
use emporium_storefront::catalog::{CatalogError, ProductSource};
use emporium_storefront::payments::{ClientSecret, PaymentError, PaymentGateway, PaymentMethod};
use emporium_storefront::storage::{MemoryStore, SharedStore};
use rust_decimal::Decimal;

/// Storefront wired to fakes.
pub type TestStorefront = Storefront<FakeCatalog, FakeGateway>;

/// Build a catalog product with a whole-dollar or fractional price.
#[must_use]
pub fn product(id: u32, category: &str, price: Decimal, rate: f64, title: &str) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price,
        category: category.to_string(),
        description: format!("{title}, as sold in our {category} department"),
        image: format!("https://img.test/{id}.jpg"),
        rating: Rating { rate, count: 120 },
    }
}

/// A small catalog spanning the usual categories.
#[must_use]
pub fn sample_catalog() -> Vec<Product> {
    vec![
        product(1, "men's clothing", Decimal::new(10995, 2), 3.9, "Fjallraven Foldsack Backpack"),
        product(2, "electronics", Decimal::from(40), 4.1, "USB 3.0 Flash Drive"),
        product(3, "electronics", Decimal::from(60), 3.3, "Portable SSD Enclosure"),
        product(4, "jewelery", Decimal::new(16800, 2), 4.6, "Gold Dragon Bracelet"),
        product(5, "women's clothing", Decimal::new(1050, 2), 2.8, "Cotton Tee"),
    ]
}

/// In-process catalog that can be switched into failure.
#[derive(Default)]
pub struct FakeCatalog {
    products: Vec<Product>,
    failing: AtomicBool,
}

impl FakeCatalog {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), CatalogError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CatalogError::Api {
                status: 503,
                message: "catalog offline".to_string(),
            });
        }
        Ok(())
    }
}

impl ProductSource for FakeCatalog {
    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        self.check()?;
        Ok(self.products.clone())
    }

    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.check()?;
        self.products
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    async fn products_in_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        self.check()?;
        Ok(self
            .products
            .iter()
            .filter(|product| product.category == category)
            .cloned()
            .collect())
    }
}

/// Payment gateway that records charged amounts and answers with a fixed
/// confirmation status.
pub struct FakeGateway {
    status: Mutex<PaymentIntentStatus>,
    relay_error: Mutex<Option<String>>,
    charges: Mutex<Vec<(i64, CurrencyCode)>>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self {
            status: Mutex::new(PaymentIntentStatus::Succeeded),
            relay_error: Mutex::new(None),
            charges: Mutex::new(Vec::new()),
        }
    }
}

impl FakeGateway {
    pub fn set_status(&self, status: PaymentIntentStatus) {
        *self.status.lock().unwrap() = status;
    }

    pub fn fail_relay(&self, message: &str) {
        *self.relay_error.lock().unwrap() = Some(message.to_string());
    }

    /// Amounts (minor units) and currencies of every intent requested.
    #[must_use]
    pub fn charges(&self) -> Vec<(i64, CurrencyCode)> {
        self.charges.lock().unwrap().clone()
    }
}

impl PaymentGateway for FakeGateway {
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: CurrencyCode,
    ) -> Result<ClientSecret, PaymentError> {
        self.charges.lock().unwrap().push((amount, currency));
        match self.relay_error.lock().unwrap().clone() {
            Some(message) => Err(PaymentError::MissingClientSecret(message)),
            None => Ok(ClientSecret::new("pi_test_secret_test")),
        }
    }

    async fn confirm_card_payment(
        &self,
        _secret: &ClientSecret,
        _method: &PaymentMethod,
    ) -> Result<PaymentIntentStatus, PaymentError> {
        Ok(self.status.lock().unwrap().clone())
    }
}

/// A storefront over a fresh in-memory store and the sample catalog.
#[must_use]
pub fn storefront() -> (TestStorefront, Arc<MemoryStore>) {
    let memory = Arc::new(MemoryStore::new());
    (reopen(&memory), memory)
}

/// A new storefront over an existing store, as after a restart.
#[must_use]
pub fn reopen(memory: &Arc<MemoryStore>) -> TestStorefront {
    let store: SharedStore = memory.clone();
    Storefront::with_parts(
        store,
        FakeCatalog::new(sample_catalog()),
        FakeGateway::default(),
        CurrencyCode::Usd,
    )
}

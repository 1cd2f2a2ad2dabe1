//! The storefront context shared by every front end.

use std::sync::Arc;

use emporium_core::{CurrencyCode, Order};

use crate::catalog::{CatalogClient, ProductSource};
use crate::config::StorefrontConfig;
use crate::db::{OrderRepository, RepositoryError};
use crate::payments::{HttpPaymentGateway, PaymentGateway, ProcessorClient, RelayClient};
use crate::services::auth::AuthService;
use crate::services::checkout::{Blocked, Checkout, CheckoutContext};
use crate::storage::{FileStore, SharedStore, StorageError};
use crate::stores::{CartStore, CatalogStore, WishlistStore};

/// All storefront state and its collaborators.
///
/// This struct is cheaply cloneable via `Arc`. Stores restore themselves
/// from the shared key-value store on construction.
pub struct Storefront<C = CatalogClient, G = HttpPaymentGateway> {
    inner: Arc<StorefrontInner<C, G>>,
}

impl<C, G> Clone for Storefront<C, G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct StorefrontInner<C, G> {
    store: SharedStore,
    currency: CurrencyCode,
    catalog: CatalogStore<C>,
    cart: CartStore,
    wishlist: WishlistStore,
    auth: AuthService,
    gateway: G,
}

impl Storefront {
    /// Build the production storefront: file-backed storage, the REST
    /// catalog, and the HTTP payment gateway.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the data directory cannot be created.
    pub fn open(config: &StorefrontConfig) -> Result<Self, StorageError> {
        let store: SharedStore = Arc::new(FileStore::open(&config.data_dir)?);
        let catalog = CatalogClient::new(config.catalog_url.clone());
        let processor = config
            .publishable_key
            .as_ref()
            .map(|key| ProcessorClient::new(config.payment_api_url.clone(), key.clone()));
        let gateway = HttpPaymentGateway::new(
            RelayClient::new(config.payment_relay_url.clone()),
            processor,
        );
        Ok(Self::with_parts(store, catalog, gateway, config.currency))
    }
}

impl<C: ProductSource, G: PaymentGateway> Storefront<C, G> {
    /// Assemble a storefront from explicit parts.
    #[must_use]
    pub fn with_parts(store: SharedStore, source: C, gateway: G, currency: CurrencyCode) -> Self {
        Self {
            inner: Arc::new(StorefrontInner {
                catalog: CatalogStore::new(source),
                cart: CartStore::load(Arc::clone(&store)),
                wishlist: WishlistStore::load(Arc::clone(&store)),
                auth: AuthService::load(Arc::clone(&store)),
                store,
                currency,
                gateway,
            }),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogStore<C> {
        &self.inner.catalog
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    #[must_use]
    pub fn wishlist(&self) -> &WishlistStore {
        &self.inner.wishlist
    }

    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.inner.gateway
    }

    #[must_use]
    pub fn store(&self) -> &SharedStore {
        &self.inner.store
    }

    #[must_use]
    pub fn currency(&self) -> CurrencyCode {
        self.inner.currency
    }

    /// Orders for the signed-in user, most recent first.
    ///
    /// Returns an empty list without a session.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the history cannot be read.
    pub fn order_history(&self) -> Result<Vec<Order>, RepositoryError> {
        match self.inner.auth.current_user() {
            Some(user) => OrderRepository::new(self.inner.store.as_ref()).orders_for(&user.email),
            None => Ok(Vec::new()),
        }
    }

    /// Start checkout with the current cart and session.
    ///
    /// # Errors
    ///
    /// Returns the `Blocked` reason when checkout cannot start.
    pub fn begin_checkout(&self) -> Result<Checkout, Blocked> {
        Checkout::begin(
            &self.inner.cart.snapshot(),
            self.inner.auth.current_user().as_ref(),
        )
    }

    /// Collaborators for [`Checkout::submit_payment`].
    #[must_use]
    pub fn checkout_context(&self) -> CheckoutContext<'_, G> {
        CheckoutContext {
            gateway: &self.inner.gateway,
            cart: &self.inner.cart,
            store: self.inner.store.as_ref(),
            currency: self.inner.currency,
        }
    }
}

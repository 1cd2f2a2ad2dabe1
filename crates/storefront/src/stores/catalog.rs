//! Product catalog store.
//!
//! Holds the fetched catalog, the filtered view shown on listing pages, the
//! product open on a detail page, and the listing preferences. Overlapping
//! fetches are not serialized: whichever resolves last wins.

use emporium_core::{
    CategoryFilter, FilterError, FilterUpdate, Product, ProductFilter, ProductId, ViewType,
    normalize_category,
};
use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::catalog::{CatalogError, ProductSource};

/// Progress of the most recent fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// The last fetch failed with this message.
    Failed(String),
}

/// Everything the catalog store publishes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogState {
    pub products: Vec<Product>,
    pub filtered_products: Vec<Product>,
    /// Product loaded by `fetch_product_by_id`.
    pub product: Option<Product>,
    pub status: CatalogStatus,
    pub view_type: ViewType,
    pub filters: ProductFilter,
}

impl CatalogState {
    /// Error message of the last failed fetch.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            CatalogStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == CatalogStatus::Loading
    }
}

/// Bounds for the price slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBounds {
    pub min: Decimal,
    pub max: Decimal,
}

/// Observable catalog state over a [`ProductSource`].
pub struct CatalogStore<S> {
    source: S,
    state: watch::Sender<CatalogState>,
}

impl<S: ProductSource> CatalogStore<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        let (state, _) = watch::channel(CatalogState::default());
        Self { source, state }
    }

    /// The underlying product source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    fn fail(&self, err: &CatalogError) {
        warn!(error = %err, "Catalog fetch failed");
        let message = err.to_string();
        self.state.send_modify(|state| state.status = CatalogStatus::Failed(message));
    }

    // =========================================================================
    // Remote fetches
    // =========================================================================

    /// Load the full catalog. Resets filters so the filtered view is the
    /// whole catalog.
    ///
    /// # Errors
    ///
    /// Returns the `CatalogError` that was also recorded in the state.
    pub async fn fetch_products(&self) -> Result<(), CatalogError> {
        self.state.send_modify(|state| state.status = CatalogStatus::Loading);
        match self.source.products().await {
            Ok(products) => {
                info!(count = products.len(), "Catalog loaded");
                self.state.send_modify(|state| {
                    state.filtered_products.clone_from(&products);
                    state.products = products;
                    state.filters = ProductFilter::default();
                    state.status = CatalogStatus::Loaded;
                });
                Ok(())
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// Load one product into the `product` slot.
    ///
    /// # Errors
    ///
    /// Returns the `CatalogError` that was also recorded in the state.
    pub async fn fetch_product_by_id(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.state.send_modify(|state| state.status = CatalogStatus::Loading);
        match self.source.product(id).await {
            Ok(product) => {
                self.state.send_modify(|state| {
                    state.product = Some(product.clone());
                    state.status = CatalogStatus::Loaded;
                });
                Ok(product)
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// Replace the filtered view with one category as served remotely.
    ///
    /// `all` restores the full catalog without a request.
    ///
    /// # Errors
    ///
    /// Returns the `CatalogError` that was also recorded in the state.
    pub async fn fetch_products_by_category(&self, label: &str) -> Result<(), CatalogError> {
        let CategoryFilter::Only(key) = CategoryFilter::from_label(label) else {
            self.state.send_modify(|state| {
                state.filtered_products.clone_from(&state.products);
            });
            return Ok(());
        };

        self.state.send_modify(|state| state.status = CatalogStatus::Loading);
        match self.source.products_in_category(&key).await {
            Ok(products) => {
                self.state.send_modify(|state| {
                    state.filtered_products = products;
                    state.status = CatalogStatus::Loaded;
                });
                Ok(())
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    // =========================================================================
    // Local filtering
    // =========================================================================

    /// Merge `update` into the filters and recompute the filtered view.
    ///
    /// # Errors
    ///
    /// Returns `FilterError` for an out-of-range rating; nothing changes.
    pub fn set_filters(&self, update: FilterUpdate) -> Result<(), FilterError> {
        let mut result = Ok(());
        self.state.send_if_modified(|state| {
            if let Err(e) = state.filters.merge(update) {
                result = Err(e);
                return false;
            }
            state.filtered_products = state.filters.apply(&state.products);
            true
        });
        result
    }

    /// Restore default filters and the full filtered view.
    pub fn reset_filters(&self) {
        self.state.send_modify(|state| {
            state.filters = ProductFilter::default();
            state.filtered_products.clone_from(&state.products);
        });
    }

    /// Free-text search over titles and descriptions.
    ///
    /// Only the query applies here; other filters are ignored. An empty query
    /// shows the full catalog.
    pub fn search_products(&self, query: &str) {
        let query = query.to_lowercase();
        self.state.send_modify(|state| {
            state.filtered_products = if query.is_empty() {
                state.products.clone()
            } else {
                state
                    .products
                    .iter()
                    .filter(|product| product.text_contains(&query))
                    .cloned()
                    .collect()
            };
            state.filters.search_query = query;
        });
    }

    pub fn set_view_type(&self, view_type: ViewType) {
        self.state.send_if_modified(|state| {
            let changed = state.view_type != view_type;
            state.view_type = view_type;
            changed
        });
    }

    // =========================================================================
    // Reads
    // =========================================================================

    #[must_use]
    pub fn snapshot(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.state.borrow().products.clone()
    }

    #[must_use]
    pub fn filtered_products(&self) -> Vec<Product> {
        self.state.borrow().filtered_products.clone()
    }

    #[must_use]
    pub fn filters(&self) -> ProductFilter {
        self.state.borrow().filters.clone()
    }

    /// `all` followed by each distinct category in catalog order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let state = self.state.borrow();
        let mut categories = vec![CategoryFilter::All.as_key().to_string()];
        for product in &state.products {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        categories
    }

    /// The first `n` products.
    #[must_use]
    pub fn featured(&self, n: usize) -> Vec<Product> {
        self.state.borrow().products.iter().take(n).cloned().collect()
    }

    /// The first `n` products of a category label.
    #[must_use]
    pub fn top_in_category(&self, label: &str, n: usize) -> Vec<Product> {
        let key = normalize_category(label);
        self.state
            .borrow()
            .products
            .iter()
            .filter(|product| product.category == key)
            .take(n)
            .cloned()
            .collect()
    }

    /// Slider bounds: at least `[0, 1000]`, widened to cover every price.
    #[must_use]
    pub fn price_bounds(&self) -> PriceBounds {
        self.state.borrow().products.iter().fold(
            PriceBounds {
                min: Decimal::ZERO,
                max: Decimal::ONE_THOUSAND,
            },
            |bounds, product| PriceBounds {
                min: bounds.min.min(product.price),
                max: bounds.max.max(product.price),
            },
        )
    }
}

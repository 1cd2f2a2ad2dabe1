//! Product catalog sources.
//!
//! # Architecture
//!
//! - [`ProductSource`] is the seam between the catalog store and the network
//! - [`CatalogClient`] talks to a Fake-Store-style REST API
//! - Responses are cached in memory via `moka` (5 minute TTL)
//!
//! # Endpoints
//!
//! - `GET /products`
//! - `GET /products/{id}`
//! - `GET /products/category/{category}`

mod cache;
mod client;

pub use client::CatalogClient;

use std::future::Future;

use emporium_core::{Product, ProductId};
use thiserror::Error;

/// Errors that can occur when fetching catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The product does not exist.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The configured base URL cannot carry a path.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

/// Somewhere products can be fetched from.
pub trait ProductSource: Send + Sync {
    /// The full catalog.
    fn products(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// A single product.
    fn product(&self, id: ProductId) -> impl Future<Output = Result<Product, CatalogError>> + Send;

    /// Products in one category. `category` is a normalized category key.
    fn products_in_category(
        &self,
        category: &str,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;
}

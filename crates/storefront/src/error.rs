//! Unified error handling.
//!
//! Every component error folds into [`AppError`], which classifies it into
//! one of four kinds. No kind is fatal: callers surface the message and
//! carry on with the state they already have.

use core::fmt;

use emporium_core::FilterError;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::payments::PaymentError;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;
use crate::storage::StorageError;
use crate::stores::CartError;

/// Error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Catalog request failed or returned non-2xx.
    RemoteFetch,
    /// Bad input or an operation not allowed in the current state.
    Validation,
    /// Payment relay or processor failure.
    Payment,
    /// Durable storage failure.
    Storage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemoteFetch => f.write_str("remote fetch error"),
            Self::Validation => f.write_str("validation error"),
            Self::Payment => f.write_str("payment error"),
            Self::Storage => f.write_str("storage error"),
        }
    }
}

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Catalog(_) => ErrorKind::RemoteFetch,
            Self::Auth(AuthError::Repository(_)) | Self::Repository(_) | Self::Storage(_) => {
                ErrorKind::Storage
            }
            Self::Checkout(CheckoutError::Payment(_)) | Self::Payment(_) => ErrorKind::Payment,
            Self::Auth(_) | Self::Cart(_) | Self::Filter(_) | Self::Checkout(_) | Self::Config(_) => {
                ErrorKind::Validation
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

//! Typed repositories over the key-value store.
//!
//! # Keys
//!
//! - `users` - The user directory (array of `UserRecord`, passwords included)
//! - `user` - The current session (`PublicUser` or absent)
//! - `orderHistory_{email}` - Orders per user, most recent first
//!
//! Repositories borrow the store for the duration of one operation, so
//! every call reads the latest persisted state.

mod orders;
mod session;
mod users;

pub use orders::OrderRepository;
pub use session::SessionRepository;
pub use users::UserRepository;

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Storage backend error.
    #[error("storage error: {0}")]
    Storage(StorageError),

    /// Stored data failed to decode or violates an invariant.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Record not found.
    #[error("not found")]
    NotFound,

    /// Uniqueness constraint violation.
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl From<StorageError> for RepositoryError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Serialization { key, source } => {
                Self::DataCorruption(format!("invalid value under '{key}': {source}"))
            }
            other => Self::Storage(other),
        }
    }
}

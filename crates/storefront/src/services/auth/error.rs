//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] emporium_core::EmailError),

    /// No directory entry for the email.
    #[error("No user found with this email")]
    UserNotFound,

    /// Password does not match.
    #[error("Incorrect password")]
    InvalidCredentials,

    /// Email belongs to another account.
    #[error("Email is already registered")]
    DuplicateEmail,

    /// A required form field is empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Operation requires a session.
    #[error("not signed in")]
    NotAuthenticated,

    /// Repository/storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

//! Checkout error types.

use core::fmt;

use emporium_core::ShippingField;
use thiserror::Error;

use crate::payments::PaymentError;

/// Why checkout cannot start (or continue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Blocked {
    #[error("Your cart is empty")]
    EmptyCart,
    #[error("Please login to proceed to checkout")]
    NotAuthenticated,
}

impl Blocked {
    /// Where the shopper should be sent.
    #[must_use]
    pub const fn redirect(self) -> &'static str {
        match self {
            Self::EmptyCart => "/cart",
            Self::NotAuthenticated => "/login",
        }
    }

    /// Path to come back to once the block is cleared.
    #[must_use]
    pub const fn return_to(self) -> Option<&'static str> {
        match self {
            Self::EmptyCart => None,
            Self::NotAuthenticated => Some("/checkout"),
        }
    }
}

/// Checkout steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    Shipping,
    Payment,
    Completed,
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shipping => f.write_str("shipping"),
            Self::Payment => f.write_str("payment"),
            Self::Completed => f.write_str("completed"),
        }
    }
}

/// Errors that can occur while checking out.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout preconditions no longer hold.
    #[error(transparent)]
    Blocked(#[from] Blocked),

    /// Shipping form is incomplete.
    #[error("Please fill in all required fields: {}", join_fields(.0))]
    MissingShippingFields(Vec<ShippingField>),

    /// Creating or confirming the payment failed.
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// Action not available at the current step.
    #[error("cannot do that at the {actual} step (expected {expected})")]
    InvalidStep {
        expected: CheckoutStep,
        actual: CheckoutStep,
    },

    /// The order was already placed.
    #[error("order has already been placed")]
    AlreadyCompleted,
}

fn join_fields(fields: &[ShippingField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Registration, login, logout, profile edits
//! - `checkout` - The shipping/payment/confirmation flow

pub mod auth;
pub mod checkout;

//! Emporium Core - Shared commerce types.
//!
//! This crate provides the value types and pure state transitions used by the
//! Emporium components:
//! - `storefront` - Commerce state engine (catalog, cart, wishlist, auth, checkout)
//! - `payments` - Payment-intent relay service
//! - `cli` - Command-line storefront front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no storage,
//! no HTTP clients. Cart totals, wishlist membership, filter matching and
//! shipping validation all live here so they can be tested without any
//! collaborator.
//!
//! # Modules
//!
//! - [`types`] - Products, carts, filters, orders, users and their newtypes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

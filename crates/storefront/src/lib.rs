//! Emporium storefront state engine.
//!
//! Observable stores for the cart, wishlist and product catalog, an auth
//! session manager, and the checkout state machine, all persisted through a
//! pluggable key-value store. Front ends (the CLI, tests) drive the
//! [`Storefront`] context and render its snapshots.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod payments;
pub mod query;
pub mod services;
pub mod state;
pub mod storage;
pub mod stores;

pub use error::{AppError, ErrorKind};
pub use state::Storefront;

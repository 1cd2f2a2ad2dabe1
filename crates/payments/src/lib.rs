//! Emporium Payments - payment-intent relay.
//!
//! Holds the processor secret key so the browser never sees it. The
//! storefront posts an amount in minor units and receives the client secret
//! of a freshly created payment intent.
//!
//! # Modules
//!
//! - [`config`] - Environment configuration with secret validation
//! - [`error`] - Error responses (`400 {"error": ...}`)
//! - [`routes`] - Router and handlers
//! - [`state`] - Shared application state
//! - [`stripe`] - Processor API client

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod stripe;

pub use config::RelayConfig;
pub use routes::routes;
pub use state::AppState;

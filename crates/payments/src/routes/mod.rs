//! HTTP route handlers for the payment relay.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Liveness banner
//! GET  /health                 - Health check
//! POST /create-payment-intent  - Create an intent, returns {clientSecret}
//! ```

pub mod intents;

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the relay router with CORS limited to the configured origin.
pub fn routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.config().allowed_origin.clone())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/create-payment-intent", post(intents::create_payment_intent))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> &'static str {
    "Payment relay is running"
}

async fn health() -> &'static str {
    "ok"
}

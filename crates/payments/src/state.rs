//! Shared application state.

use std::sync::Arc;

use crate::config::RelayConfig;
use crate::stripe::StripeClient;

/// Shared state for route handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: RelayConfig,
    stripe: StripeClient,
}

impl AppState {
    #[must_use]
    pub fn new(config: RelayConfig) -> Self {
        let stripe = StripeClient::new(
            config.stripe_api_url.clone(),
            config.stripe_secret_key.clone(),
        );
        Self {
            inner: Arc::new(AppStateInner { config, stripe }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &RelayConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn stripe(&self) -> &StripeClient {
        &self.inner.stripe
    }
}

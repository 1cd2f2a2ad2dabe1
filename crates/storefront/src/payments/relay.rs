//! Client for the payment-intent relay.

use emporium_core::CurrencyCode;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use super::{ClientSecret, PaymentError};

/// Message used when the relay gives no reason.
const NO_SECRET: &str = "Failed to get client secret";

#[derive(Debug, Serialize)]
struct CreateIntentRequest {
    amount: i64,
    currency: CurrencyCode,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateIntentResponse {
    client_secret: Option<String>,
    error: Option<String>,
}

/// Client for `POST /create-payment-intent`.
#[derive(Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    base_url: Url,
}

impl RelayClient {
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn endpoint(&self) -> Result<Url, PaymentError> {
        self.base_url
            .join("create-payment-intent")
            .map_err(|e| PaymentError::Parse(format!("invalid relay URL: {e}")))
    }

    /// Ask the relay for a new payment intent.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::Http` on transport failure, or
    /// `PaymentError::MissingClientSecret` carrying the relay's error message.
    #[instrument(skip(self))]
    pub async fn create_payment_intent(
        &self,
        amount: i64,
        currency: CurrencyCode,
    ) -> Result<ClientSecret, PaymentError> {
        if amount <= 0 {
            return Err(PaymentError::InvalidAmount);
        }

        let response = self
            .client
            .post(self.endpoint()?)
            .json(&CreateIntentRequest { amount, currency })
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        interpret(status, &body)
    }
}

/// Turn a relay reply into a client secret or the relay's error message.
fn interpret(status: reqwest::StatusCode, body: &str) -> Result<ClientSecret, PaymentError> {
    let reply: CreateIntentResponse = match serde_json::from_str(body) {
        Ok(reply) => reply,
        Err(e) if status.is_success() => {
            return Err(PaymentError::Parse(e.to_string()));
        }
        Err(_) => CreateIntentResponse::default(),
    };

    match reply.client_secret {
        Some(secret) if !secret.is_empty() => Ok(ClientSecret::new(secret)),
        _ => {
            let message = reply.error.unwrap_or_else(|| NO_SECRET.to_string());
            tracing::warn!(status = %status, error = %message, "Relay returned no client secret");
            Err(PaymentError::MissingClientSecret(message))
        }
    }
}

//! Server-side payment-intent creation with the processor secret key.

use emporium_core::CurrencyCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;
use url::Url;

/// Errors from the payment processor API.
#[derive(Debug, Error)]
pub enum StripeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The processor refused the request; the message is its own.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse processor response: {0}")]
    Parse(String),
}

impl StripeError {
    /// Whether the failure originates on our side of the wire rather than
    /// from the processor rejecting the request.
    #[must_use]
    pub const fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Parse(_))
    }
}

#[derive(Debug, Deserialize)]
struct IntentBody {
    id: String,
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// A freshly created payment intent.
#[derive(Debug)]
pub struct CreatedIntent {
    pub id: String,
    pub client_secret: String,
}

/// Client for the processor's payment intents API.
#[derive(Clone)]
pub struct StripeClient {
    client: reqwest::Client,
    api_url: Url,
    secret_key: SecretString,
}

impl StripeClient {
    #[must_use]
    pub fn new(api_url: Url, secret_key: SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            secret_key,
        }
    }

    fn intents_url(&self) -> Result<Url, StripeError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| StripeError::Parse(format!("invalid processor URL: {}", self.api_url)))?
            .pop_if_empty()
            .extend(["v1", "payment_intents"]);
        Ok(url)
    }

    /// Create a payment intent for `amount` minor units with automatic
    /// payment methods enabled.
    ///
    /// # Errors
    ///
    /// Returns `StripeError::Api` carrying the processor's message when the
    /// request is refused.
    #[instrument(skip(self))]
    pub async fn create_payment_intent(
        &self,
        amount: i64,
        currency: CurrencyCode,
    ) -> Result<CreatedIntent, StripeError> {
        let url = self.intents_url()?;
        let amount = amount.to_string();

        let response = self
            .client
            .post(url)
            .bearer_auth(self.secret_key.expose_secret())
            .form(&[
                ("amount", amount.as_str()),
                ("currency", currency.code()),
                ("automatic_payment_methods[enabled]", "true"),
            ])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        let intent = interpret(status, &body)?;
        tracing::info!(intent_id = %intent.id, "Payment intent created");
        Ok(intent)
    }
}

fn interpret(status: reqwest::StatusCode, body: &str) -> Result<CreatedIntent, StripeError> {
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.error.message)
            .unwrap_or_else(|| format!("processor returned HTTP {status}"));
        tracing::warn!(status = %status, error = %message, "Payment intent creation refused");
        return Err(StripeError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str::<IntentBody>(body)
        .map(|intent| CreatedIntent {
            id: intent.id,
            client_secret: intent.client_secret,
        })
        .map_err(|e| StripeError::Parse(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    fn client(base: &str) -> StripeClient {
        StripeClient::new(
            Url::parse(base).unwrap(),
            SecretString::from("sk_test_4eC39HqLyjWDarjtT1zdp7dc"),
        )
    }

    #[test]
    fn test_intents_url() {
        assert_eq!(
            client("https://api.stripe.com").intents_url().unwrap().as_str(),
            "https://api.stripe.com/v1/payment_intents"
        );
        assert_eq!(
            client("http://127.0.0.1:12111/").intents_url().unwrap().as_str(),
            "http://127.0.0.1:12111/v1/payment_intents"
        );
    }

    #[test]
    fn test_client_secret_is_extracted() {
        let intent = interpret(
            StatusCode::OK,
            r#"{"id":"pi_1","object":"payment_intent","client_secret":"pi_1_secret_abc","status":"requires_payment_method"}"#,
        )
        .unwrap();
        assert_eq!(intent.id, "pi_1");
        assert_eq!(intent.client_secret, "pi_1_secret_abc");
    }

    #[test]
    fn test_processor_message_is_kept() {
        let err = interpret(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"type":"invalid_request_error","message":"Amount must be at least $0.50 usd"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, StripeError::Api { status: 400, .. }));
        assert_eq!(err.to_string(), "Amount must be at least $0.50 usd");
        assert!(!err.is_infrastructure());
    }

    #[test]
    fn test_opaque_error_body() {
        let err = interpret(StatusCode::BAD_GATEWAY, "<html>").unwrap_err();
        assert_eq!(err.to_string(), "processor returned HTTP 502 Bad Gateway");
    }

    #[test]
    fn test_malformed_success_body() {
        let err = interpret(StatusCode::OK, r#"{"id":"pi_1"}"#).unwrap_err();
        assert!(matches!(err, StripeError::Parse(_)));
        assert!(err.is_infrastructure());
    }
}

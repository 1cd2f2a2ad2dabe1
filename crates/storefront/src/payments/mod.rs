//! Payment-intent relay and processor clients.
//!
//! # Flow
//!
//! 1. The relay creates a payment intent for an amount in minor units and
//!    hands back its client secret ([`RelayClient`])
//! 2. The processor confirms the intent with a payment method and reports
//!    the intent status ([`ProcessorClient`])
//!
//! [`PaymentGateway`] bundles both steps behind one seam so checkout can be
//! exercised without a network.

mod processor;
mod relay;

pub use processor::ProcessorClient;
pub use relay::RelayClient;

use std::fmt;
use std::future::Future;

use emporium_core::{CurrencyCode, PaymentIntentStatus};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Errors that can occur while taking a payment.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The relay answered without a client secret.
    #[error("{0}")]
    MissingClientSecret(String),

    /// The processor rejected the confirmation (declined card, bad method).
    #[error("{0}")]
    Declined(String),

    /// Confirmation finished in a state other than `succeeded`.
    #[error("payment was not completed (status: {0})")]
    NotSucceeded(PaymentIntentStatus),

    /// The charge amount cannot be expressed in minor units.
    #[error("invalid payment amount")]
    InvalidAmount,

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A required setting is absent.
    #[error("payments are not configured: {0}")]
    NotConfigured(&'static str),
}

/// A payment intent's client secret, `pi_<id>_secret_<token>`.
#[derive(Clone)]
pub struct ClientSecret(SecretString);

impl ClientSecret {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(SecretString::from(secret.into()))
    }

    /// The payment intent id embedded in the secret.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::Parse` if the secret is not in the
    /// `<id>_secret_<token>` form.
    pub fn intent_id(&self) -> Result<&str, PaymentError> {
        self.0
            .expose_secret()
            .split_once("_secret_")
            .map(|(id, _)| id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| PaymentError::Parse("malformed client secret".to_string()))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret([REDACTED])")
    }
}

/// A processor payment method id, e.g. `pm_card_visa`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethod(String);

impl PaymentMethod {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Something that can create and confirm payment intents.
pub trait PaymentGateway: Send + Sync {
    /// Create an intent for `amount` minor units and return its client secret.
    fn create_payment_intent(
        &self,
        amount: i64,
        currency: CurrencyCode,
    ) -> impl Future<Output = Result<ClientSecret, PaymentError>> + Send;

    /// Confirm an intent with a payment method.
    fn confirm_card_payment(
        &self,
        secret: &ClientSecret,
        method: &PaymentMethod,
    ) -> impl Future<Output = Result<PaymentIntentStatus, PaymentError>> + Send;
}

/// The relay plus the processor, over HTTP.
#[derive(Clone)]
pub struct HttpPaymentGateway {
    relay: RelayClient,
    processor: Option<ProcessorClient>,
}

impl HttpPaymentGateway {
    /// Build a gateway. Without a processor, confirmation fails with
    /// `PaymentError::NotConfigured`.
    #[must_use]
    pub const fn new(relay: RelayClient, processor: Option<ProcessorClient>) -> Self {
        Self { relay, processor }
    }
}

impl PaymentGateway for HttpPaymentGateway {
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: CurrencyCode,
    ) -> Result<ClientSecret, PaymentError> {
        self.relay.create_payment_intent(amount, currency).await
    }

    async fn confirm_card_payment(
        &self,
        secret: &ClientSecret,
        method: &PaymentMethod,
    ) -> Result<PaymentIntentStatus, PaymentError> {
        let processor = self
            .processor
            .as_ref()
            .ok_or(PaymentError::NotConfigured("publishable key"))?;
        processor.confirm(secret, method).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_id_from_secret() {
        let secret = ClientSecret::new("pi_3Abc_secret_xyz");
        assert_eq!(secret.intent_id().unwrap(), "pi_3Abc");
        assert!(ClientSecret::new("garbage").intent_id().is_err());
        assert!(ClientSecret::new("_secret_xyz").intent_id().is_err());
    }

    #[test]
    fn test_client_secret_debug_is_redacted() {
        let secret = ClientSecret::new("pi_1_secret_hidden");
        assert!(!format!("{secret:?}").contains("hidden"));
    }

    #[tokio::test]
    async fn test_confirm_without_processor_is_not_configured() {
        let relay = RelayClient::new(url::Url::parse("http://127.0.0.1:9").unwrap());
        let gateway = HttpPaymentGateway::new(relay, None);
        let err = gateway
            .confirm_card_payment(
                &ClientSecret::new("pi_1_secret_2"),
                &PaymentMethod::new("pm_card_visa"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::NotConfigured(_)));
    }
}

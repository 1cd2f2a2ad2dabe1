//! Client-side confirmation against the payment processor's API.

use emporium_core::PaymentIntentStatus;
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use super::{ClientSecret, PaymentError, PaymentMethod};

#[derive(Debug, Deserialize)]
struct IntentBody {
    status: PaymentIntentStatus,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// Confirms payment intents with a publishable key.
#[derive(Clone)]
pub struct ProcessorClient {
    client: reqwest::Client,
    api_url: Url,
    publishable_key: String,
}

impl ProcessorClient {
    #[must_use]
    pub fn new(api_url: Url, publishable_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            publishable_key: publishable_key.into(),
        }
    }

    fn confirm_url(&self, intent_id: &str) -> Result<Url, PaymentError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| PaymentError::Parse(format!("invalid processor URL: {}", self.api_url)))?
            .pop_if_empty()
            .extend(["v1", "payment_intents", intent_id, "confirm"]);
        Ok(url)
    }

    /// Confirm the intent behind `secret` with `method`.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::Declined` with the processor's message when the
    /// confirmation is refused.
    #[instrument(skip(self, secret))]
    pub async fn confirm(
        &self,
        secret: &ClientSecret,
        method: &PaymentMethod,
    ) -> Result<PaymentIntentStatus, PaymentError> {
        let url = self.confirm_url(secret.intent_id()?)?;

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.publishable_key)
            .form(&[
                ("client_secret", secret.expose()),
                ("payment_method", method.as_str()),
            ])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        interpret(status, &body)
    }
}

fn interpret(status: reqwest::StatusCode, body: &str) -> Result<PaymentIntentStatus, PaymentError> {
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.error.message)
            .unwrap_or_else(|| format!("payment failed with HTTP {status}"));
        tracing::warn!(status = %status, error = %message, "Payment confirmation refused");
        return Err(PaymentError::Declined(message));
    }

    serde_json::from_str::<IntentBody>(body)
        .map(|intent| intent.status)
        .map_err(|e| PaymentError::Parse(e.to_string()))
}

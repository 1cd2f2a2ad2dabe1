//! Error types for the payment relay.
//!
//! Every failure surfaces to the browser as `{"error": "<message>"}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::stripe::StripeError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// Processor failure, reported with its message.
    #[error("{0}")]
    Stripe(#[from] StripeError),

    /// The request body was unusable.
    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::Stripe(err) if err.is_infrastructure() => {
                tracing::error!(error = %self, "Payment processor unreachable");
                sentry::capture_error(&self);
            }
            Self::Stripe(_) => tracing::warn!(error = %self, "Payment intent refused"),
            Self::BadRequest(_) => tracing::debug!(error = %self, "Rejected request"),
        }

        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// Result type alias for route handlers.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = AppError::BadRequest("Missing amount".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "error": "Missing amount" }));
    }

    #[tokio::test]
    async fn test_processor_errors_are_bad_requests() {
        let response = AppError::from(StripeError::Api {
            status: 402,
            message: "Your card was declined.".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

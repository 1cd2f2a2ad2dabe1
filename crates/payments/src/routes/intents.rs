//! Payment intent creation.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use emporium_core::CurrencyCode;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Body of `POST /create-payment-intent`.
#[derive(Debug, Deserialize)]
pub struct CreateIntentRequest {
    /// Amount in minor units (cents).
    pub amount: Option<i64>,
    /// Lower-case ISO code; `usd` when absent.
    pub currency: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentResponse {
    pub client_secret: String,
}

/// Create a payment intent and hand its client secret to the browser.
#[instrument(skip(state, payload))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateIntentRequest>, JsonRejection>,
) -> Result<Json<CreateIntentResponse>> {
    let Json(request) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let amount = match request.amount {
        Some(amount) if amount > 0 => amount,
        Some(_) => {
            return Err(AppError::BadRequest(
                "Amount must be a positive integer".to_string(),
            ));
        }
        None => return Err(AppError::BadRequest("Missing required param: amount".to_string())),
    };
    let currency = match request.currency.as_deref() {
        None | Some("") => CurrencyCode::default(),
        Some(code) => code.parse().map_err(AppError::BadRequest)?,
    };

    let intent = state.stripe().create_payment_intent(amount, currency).await?;

    Ok(Json(CreateIntentResponse {
        client_secret: intent.client_secret,
    }))
}

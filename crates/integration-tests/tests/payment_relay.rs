//! The storefront's HTTP payment gateway against the relay server and a
//! stand-in processor, all on ephemeral local ports.

use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::Path,
    http::{HeaderValue, StatusCode},
    routing::post,
};
use emporium_core::{CurrencyCode, RegisterRequest, ShippingInfo};
use emporium_integration_tests::{FakeCatalog, sample_catalog};
use emporium_payments::{AppState, RelayConfig, routes};
use emporium_storefront::Storefront;
use emporium_storefront::payments::{
    HttpPaymentGateway, PaymentError, PaymentGateway, PaymentMethod, ProcessorClient, RelayClient,
};
use emporium_storefront::storage::{MemoryStore, SharedStore};
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;

async fn serve(app: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    Url::parse(&format!("http://{addr}/")).unwrap()
}

/// Processor stand-in: intents under 50 cents are refused, and the
/// `pm_card_chargeDeclined` method is declined at confirmation.
async fn processor() -> Url {
    async fn create(body: String) -> (StatusCode, Json<Value>) {
        let amount: i64 = url::form_urlencoded::parse(body.as_bytes())
            .find(|(key, _)| key == "amount")
            .and_then(|(_, value)| value.parse().ok())
            .unwrap_or_default();
        if amount < 50 {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": {"message": "Amount must be at least $0.50 usd"}})),
            );
        }
        (
            StatusCode::OK,
            Json(json!({"id": "pi_77", "client_secret": "pi_77_secret_abc", "amount": amount})),
        )
    }

    async fn confirm(Path(id): Path<String>, body: String) -> (StatusCode, Json<Value>) {
        if body.contains("pm_card_chargeDeclined") {
            return (
                StatusCode::PAYMENT_REQUIRED,
                Json(json!({"error": {"message": "Your card was declined."}})),
            );
        }
        (StatusCode::OK, Json(json!({"id": id, "status": "succeeded"})))
    }

    serve(
        Router::new()
            .route("/v1/payment_intents", post(create))
            .route("/v1/payment_intents/{id}/confirm", post(confirm)),
    )
    .await
}

async fn relay(processor: &Url) -> Url {
    serve(routes(AppState::new(RelayConfig {
        stripe_secret_key: SecretString::from("sk_test_4eC39HqLyjWDarjtT1zdp7dc"),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        allowed_origin: HeaderValue::from_static("http://localhost:3000"),
        stripe_api_url: processor.clone(),
        sentry_dsn: None,
        sentry_environment: None,
    })))
    .await
}

async fn gateway() -> HttpPaymentGateway {
    let processor = processor().await;
    let relay = relay(&processor).await;
    HttpPaymentGateway::new(
        RelayClient::new(relay),
        Some(ProcessorClient::new(processor, "pk_test_TYooMQauvdEDq54NiTphI7jx")),
    )
}

#[tokio::test]
async fn test_relay_hands_back_client_secret() {
    let gateway = gateway().await;

    let secret = gateway
        .create_payment_intent(2310, CurrencyCode::Usd)
        .await
        .unwrap();
    assert_eq!(secret.intent_id().unwrap(), "pi_77");
}

#[tokio::test]
async fn test_processor_refusal_surfaces_relay_message() {
    let gateway = gateway().await;

    let err = gateway
        .create_payment_intent(10, CurrencyCode::Usd)
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::MissingClientSecret(_)));
    assert_eq!(err.to_string(), "Amount must be at least $0.50 usd");
}

#[tokio::test]
async fn test_full_checkout_over_http() {
    let store: SharedStore = std::sync::Arc::new(MemoryStore::new());
    let shop = Storefront::with_parts(
        store,
        FakeCatalog::new(sample_catalog()),
        gateway().await,
        CurrencyCode::Usd,
    );
    shop.auth()
        .register(RegisterRequest {
            first_name: "Katherine".to_string(),
            last_name: "Johnson".to_string(),
            email: "kj@nasa.gov".to_string(),
            password: "trajectory".to_string(),
        })
        .await
        .unwrap();
    shop.cart().add_to_cart(sample_catalog().remove(1));

    let mut checkout = shop.begin_checkout().unwrap();
    checkout
        .submit_shipping(ShippingInfo {
            first_name: "Katherine".to_string(),
            last_name: "Johnson".to_string(),
            address: "1 NASA Dr".to_string(),
            city: "Hampton".to_string(),
            state: "VA".to_string(),
            zip_code: "23666".to_string(),
            phone_number: "+1 757 864 1000".to_string(),
            ..checkout.shipping().clone()
        })
        .unwrap();

    let declined = checkout
        .submit_payment(&shop.checkout_context(), &PaymentMethod::new("pm_card_chargeDeclined"))
        .await
        .unwrap_err();
    assert_eq!(declined.to_string(), "Your card was declined.");
    assert!(!shop.cart().is_empty());

    let order = checkout
        .submit_payment(&shop.checkout_context(), &PaymentMethod::new("pm_card_visa"))
        .await
        .unwrap();
    assert_eq!(order.total, Decimal::from(44));
    assert!(shop.cart().is_empty());
    assert_eq!(shop.order_history().unwrap(), vec![order]);
}

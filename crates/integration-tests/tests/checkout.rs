//! The checkout state machine end to end.

use emporium_core::{
    CurrencyCode, PaymentIntentStatus, RegisterRequest, ShippingField, ShippingInfo,
};
use emporium_integration_tests::{TestStorefront, sample_catalog, storefront};
use emporium_storefront::payments::{PaymentError, PaymentMethod};
use emporium_storefront::services::checkout::{Blocked, CheckoutError, CheckoutStep};
use rust_decimal::Decimal;

async fn signed_in(shop: &TestStorefront) {
    shop.auth()
        .register(RegisterRequest {
            first_name: "Alan".to_string(),
            last_name: "Turing".to_string(),
            email: "alan@bletchley.uk".to_string(),
            password: "enigma".to_string(),
        })
        .await
        .unwrap();
}

fn shipping() -> ShippingInfo {
    ShippingInfo {
        first_name: "Alan".to_string(),
        last_name: "Turing".to_string(),
        email: "alan@bletchley.uk".to_string(),
        address: "Bletchley Park".to_string(),
        city: "Milton Keynes".to_string(),
        state: "BKM".to_string(),
        zip_code: "MK3 6EB".to_string(),
        country: "United Kingdom".to_string(),
        phone_number: "+44 1908 640404".to_string(),
    }
}

fn card() -> PaymentMethod {
    PaymentMethod::new("pm_card_visa")
}

#[tokio::test]
async fn test_successful_checkout_records_order_and_clears_cart() {
    let (shop, _) = storefront();
    signed_in(&shop).await;
    let catalog = sample_catalog();
    // 40 + 10.50 = 50.50, plus tax 55.55
    shop.cart().add_to_cart(catalog[1].clone());
    shop.cart().add_to_cart(catalog[4].clone());
    let subtotal = shop.cart().total_amount();

    let mut checkout = shop.begin_checkout().unwrap();
    assert_eq!(checkout.shipping().email, "alan@bletchley.uk");
    checkout.submit_shipping(shipping()).unwrap();
    let order = checkout
        .submit_payment(&shop.checkout_context(), &card())
        .await
        .unwrap();

    assert_eq!(order.total, Decimal::new(5555, 2));
    assert_eq!(order.total, (subtotal * Decimal::new(11, 1)).round_dp(2));
    assert_eq!(order.items.len(), 2);
    assert_eq!(shop.gateway().charges(), vec![(5555, CurrencyCode::Usd)]);
    assert!(shop.cart().is_empty());
    assert_eq!(checkout.step(), CheckoutStep::Completed);
    assert_eq!(checkout.order(), Some(&order));

    let history = shop.order_history().unwrap();
    assert_eq!(history, vec![order]);
}

#[tokio::test]
async fn test_history_is_most_recent_first() {
    let (shop, _) = storefront();
    signed_in(&shop).await;
    let catalog = sample_catalog();
    let mut placed = Vec::new();

    for product in [&catalog[0], &catalog[3]] {
        shop.cart().add_to_cart(product.clone());
        let mut checkout = shop.begin_checkout().unwrap();
        checkout.submit_shipping(shipping()).unwrap();
        placed.push(
            checkout
                .submit_payment(&shop.checkout_context(), &card())
                .await
                .unwrap(),
        );
    }

    let history = shop.order_history().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].order_number, placed[1].order_number);
    assert_ne!(history[0].order_number, history[1].order_number);
    assert!(
        history
            .iter()
            .all(|order| order.order_number.as_str().len() == "ORD-".len() + 6)
    );
}

#[tokio::test]
async fn test_blocked_entry_reasons() {
    let (shop, _) = storefront();

    // An empty cart is reported first, even when signed out
    assert_eq!(shop.begin_checkout().unwrap_err(), Blocked::EmptyCart);

    shop.cart().add_to_cart(sample_catalog().remove(0));
    let blocked = shop.begin_checkout().unwrap_err();
    assert_eq!(blocked, Blocked::NotAuthenticated);
    assert_eq!(blocked.redirect(), "/login");
    assert_eq!(blocked.return_to(), Some("/checkout"));
}

#[tokio::test]
async fn test_missing_shipping_fields_keep_the_draft() {
    let (shop, _) = storefront();
    signed_in(&shop).await;
    shop.cart().add_to_cart(sample_catalog().remove(0));

    let mut checkout = shop.begin_checkout().unwrap();
    let partial = ShippingInfo {
        city: String::new(),
        zip_code: " ".to_string(),
        ..shipping()
    };
    let err = checkout.submit_shipping(partial.clone()).unwrap_err();

    assert!(matches!(
        &err,
        CheckoutError::MissingShippingFields(fields)
            if fields == &vec![ShippingField::City, ShippingField::ZipCode]
    ));
    assert_eq!(checkout.step(), CheckoutStep::Shipping);
    assert_eq!(checkout.shipping(), &partial);
}

#[tokio::test]
async fn test_back_from_payment_keeps_shipping() {
    let (shop, _) = storefront();
    signed_in(&shop).await;
    shop.cart().add_to_cart(sample_catalog().remove(0));

    let mut checkout = shop.begin_checkout().unwrap();
    checkout.submit_shipping(shipping()).unwrap();
    assert_eq!(checkout.step(), CheckoutStep::Payment);

    checkout.go_back().unwrap();
    assert_eq!(checkout.step(), CheckoutStep::Shipping);
    assert_eq!(checkout.shipping(), &shipping());
}

#[tokio::test]
async fn test_declined_or_pending_payment_changes_nothing() {
    let (shop, _) = storefront();
    signed_in(&shop).await;
    shop.cart().add_to_cart(sample_catalog().remove(0));
    let mut checkout = shop.begin_checkout().unwrap();
    checkout.submit_shipping(shipping()).unwrap();

    shop.gateway().set_status(PaymentIntentStatus::RequiresAction);
    let err = checkout
        .submit_payment(&shop.checkout_context(), &card())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CheckoutError::Payment(PaymentError::NotSucceeded(PaymentIntentStatus::RequiresAction))
    ));

    shop.gateway().fail_relay("Your card was declined.");
    let err = checkout
        .submit_payment(&shop.checkout_context(), &card())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Your card was declined.");

    assert_eq!(checkout.step(), CheckoutStep::Payment);
    assert_eq!(shop.cart().total_quantity(), 1);
    assert!(shop.order_history().unwrap().is_empty());
}

#[tokio::test]
async fn test_completed_checkout_is_terminal() {
    let (shop, _) = storefront();
    signed_in(&shop).await;
    shop.cart().add_to_cart(sample_catalog().remove(0));
    let mut checkout = shop.begin_checkout().unwrap();
    checkout.submit_shipping(shipping()).unwrap();
    checkout
        .submit_payment(&shop.checkout_context(), &card())
        .await
        .unwrap();

    assert!(matches!(
        checkout.go_back(),
        Err(CheckoutError::AlreadyCompleted)
    ));
    assert!(matches!(
        checkout.submit_shipping(shipping()),
        Err(CheckoutError::AlreadyCompleted)
    ));
    assert_eq!(shop.gateway().charges().len(), 1);
}

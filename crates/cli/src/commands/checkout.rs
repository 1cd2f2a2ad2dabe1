//! Non-interactive checkout: shipping, then payment.

use emporium_core::{ShippingInfo, format_price};
use emporium_storefront::Storefront;
use emporium_storefront::error::Result;
use emporium_storefront::payments::PaymentMethod;
use emporium_storefront::services::checkout::CheckoutError;

use crate::render;

/// Shipping form and payment method for `checkout`.
pub struct CheckoutOptions {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone_number: String,
    pub payment_method: String,
}

pub async fn run(shop: &Storefront, options: CheckoutOptions) -> Result<()> {
    let mut checkout = match shop.begin_checkout() {
        Ok(checkout) => checkout,
        Err(blocked) => {
            let hint = match blocked.return_to() {
                Some(back) => format!("{blocked} (go to {}, then back to {back})", blocked.redirect()),
                None => format!("{blocked} (go to {})", blocked.redirect()),
            };
            render::line(&hint);
            return Err(CheckoutError::from(blocked).into());
        }
    };

    let email = options
        .email
        .unwrap_or_else(|| checkout.shipping().email.clone());
    checkout.submit_shipping(ShippingInfo {
        first_name: options.first_name,
        last_name: options.last_name,
        email,
        address: options.address,
        city: options.city,
        state: options.state,
        zip_code: options.zip_code,
        country: options.country,
        phone_number: options.phone_number,
    })?;

    render::cart(&shop.cart().snapshot());
    let order = checkout
        .submit_payment(
            &shop.checkout_context(),
            &PaymentMethod::new(options.payment_method),
        )
        .await?;

    render::line(&format!(
        "Order {} placed. Charged {}.",
        order.order_number,
        format_price(order.total)
    ));
    Ok(())
}

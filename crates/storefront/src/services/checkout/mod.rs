//! Checkout state machine.
//!
//! `Shipping -> Payment -> Completed`, entered through [`Checkout::begin`]
//! which refuses with a [`Blocked`] reason when the cart is empty or nobody
//! is signed in. `Completed` is terminal.
//!
//! Payment submission is not locked: two overlapping submissions each charge
//! and the last one to resolve owns the final state.

mod error;

pub use error::{Blocked, CheckoutError, CheckoutStep};

use chrono::Utc;
use emporium_core::{
    Cart, CurrencyCode, Email, Order, OrderNumber, PublicUser, ShippingInfo, to_minor_units,
    with_tax,
};
use rand::Rng;
use tracing::{info, warn};

use crate::db::OrderRepository;
use crate::payments::{PaymentError, PaymentGateway, PaymentMethod};
use crate::storage::KeyValueStore;
use crate::stores::CartStore;

/// Attempts at drawing an order number not already in the history.
const ORDER_NUMBER_ATTEMPTS: usize = 16;

/// Collaborators used to place an order.
pub struct CheckoutContext<'a, G> {
    pub gateway: &'a G,
    pub cart: &'a CartStore,
    pub store: &'a dyn KeyValueStore,
    pub currency: CurrencyCode,
}

#[derive(Debug, Clone)]
enum State {
    Shipping { draft: ShippingInfo },
    Payment { shipping: ShippingInfo },
    Completed { shipping: ShippingInfo, order: Order },
}

/// One checkout attempt for the signed-in user.
#[derive(Debug, Clone)]
pub struct Checkout {
    user: PublicUser,
    state: State,
}

impl Checkout {
    /// Start checkout.
    ///
    /// # Errors
    ///
    /// Returns `Blocked::EmptyCart` if the cart is empty (checked first), or
    /// `Blocked::NotAuthenticated` without a session.
    pub fn begin(cart: &Cart, session: Option<&PublicUser>) -> Result<Self, Blocked> {
        if cart.is_empty() {
            return Err(Blocked::EmptyCart);
        }
        let user = session.ok_or(Blocked::NotAuthenticated)?.clone();
        let draft = ShippingInfo::prefilled(user.email.as_str());
        Ok(Self {
            user,
            state: State::Shipping { draft },
        })
    }

    #[must_use]
    pub const fn user(&self) -> &PublicUser {
        &self.user
    }

    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        match self.state {
            State::Shipping { .. } => CheckoutStep::Shipping,
            State::Payment { .. } => CheckoutStep::Payment,
            State::Completed { .. } => CheckoutStep::Completed,
        }
    }

    /// The shipping form as last entered.
    #[must_use]
    pub const fn shipping(&self) -> &ShippingInfo {
        match &self.state {
            State::Shipping { draft } => draft,
            State::Payment { shipping } | State::Completed { shipping, .. } => shipping,
        }
    }

    /// The placed order, once completed.
    #[must_use]
    pub const fn order(&self) -> Option<&Order> {
        match &self.state {
            State::Completed { order, .. } => Some(order),
            _ => None,
        }
    }

    fn expect_step(&self, expected: CheckoutStep) -> Result<(), CheckoutError> {
        match self.step() {
            actual if actual == expected => Ok(()),
            CheckoutStep::Completed => Err(CheckoutError::AlreadyCompleted),
            actual => Err(CheckoutError::InvalidStep { expected, actual }),
        }
    }

    /// Submit the shipping form and move on to payment.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::MissingShippingFields` listing empty fields; the
    /// entered values are kept and the step does not change.
    pub fn submit_shipping(&mut self, info: ShippingInfo) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Shipping)?;

        let missing = info.missing_fields();
        if !missing.is_empty() {
            self.state = State::Shipping { draft: info };
            return Err(CheckoutError::MissingShippingFields(missing));
        }

        self.state = State::Payment { shipping: info };
        Ok(())
    }

    /// Return from payment to the shipping form, keeping what was entered.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidStep` outside the payment step.
    pub fn go_back(&mut self) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Payment)?;
        if let State::Payment { shipping } = &self.state {
            self.state = State::Shipping {
                draft: shipping.clone(),
            };
        }
        Ok(())
    }

    /// Charge the cart total plus tax and place the order.
    ///
    /// On success the order is prepended to the user's history, the cart is
    /// cleared, and checkout completes. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Payment` for relay or processor failures and
    /// non-`succeeded` statuses, `Blocked::EmptyCart` if the cart was emptied
    /// meanwhile, and step errors outside the payment step.
    pub async fn submit_payment<G: PaymentGateway>(
        &mut self,
        ctx: &CheckoutContext<'_, G>,
        method: &PaymentMethod,
    ) -> Result<Order, CheckoutError> {
        self.expect_step(CheckoutStep::Payment)?;
        let shipping = self.shipping().clone();

        let cart = ctx.cart.snapshot();
        if cart.is_empty() {
            return Err(Blocked::EmptyCart.into());
        }

        let total = with_tax(cart.total_amount());
        let amount = to_minor_units(total).ok_or(PaymentError::InvalidAmount)?;
        info!(amount, currency = %ctx.currency, "Creating payment intent");

        let secret = ctx.gateway.create_payment_intent(amount, ctx.currency).await?;
        let status = ctx.gateway.confirm_card_payment(&secret, method).await?;
        if !status.is_succeeded() {
            warn!(status = %status, "Payment did not succeed");
            return Err(PaymentError::NotSucceeded(status).into());
        }

        let orders = OrderRepository::new(ctx.store);
        let order_number = next_order_number(&history_for(&orders, &self.user.email));
        let order = Order::from_cart(order_number, Utc::now(), &cart);
        if let Err(e) = orders.append_order(&self.user.email, order.clone()) {
            warn!(error = %e, order_number = %order.order_number, "Failed to record order history");
        }
        ctx.cart.clear_cart();

        info!(order_number = %order.order_number, total = %order.total, "Order placed");
        self.state = State::Completed {
            shipping,
            order: order.clone(),
        };
        Ok(order)
    }
}

fn history_for(orders: &OrderRepository<'_>, email: &Email) -> Vec<Order> {
    orders.orders_for(email).unwrap_or_else(|e| {
        warn!(error = %e, "Unreadable order history; starting a new one");
        Vec::new()
    })
}

/// Draw a random `ORD-NNNNNN` number, avoiding ones already in `existing`.
fn next_order_number(existing: &[Order]) -> OrderNumber {
    let mut rng = rand::rng();
    let mut number = draw_order_number(&mut rng);
    for _ in 1..ORDER_NUMBER_ATTEMPTS {
        if !existing.iter().any(|order| order.order_number == number) {
            break;
        }
        number = draw_order_number(&mut rng);
    }
    number
}

fn draw_order_number(rng: &mut impl Rng) -> OrderNumber {
    OrderNumber::from_suffix_clamped(
        rng.random_range(OrderNumber::MIN_SUFFIX..=OrderNumber::MAX_SUFFIX),
    )
}

//! # Checkout Commands
//!
//! Coupon handling, the order summary and order placement.
//!
//! ## Place Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Place Order Flow                                     │
//! │                                                                         │
//! │  [ Place Order ]                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  form.validate() ──── errors ──► VALIDATION_ERROR + per-field messages  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cart empty? ───────── yes ────► CART_ERROR                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  order.begin() ─────── refused ► BUSY (already submitting)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  simulated processor delay                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  declined card? ────── yes ────► PAYMENT_ERROR (cart kept)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  freeze lines + summary, clear cart, drop coupon                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OrderConfirmation { orderNumber: "RL-3F9A0C12", ... }                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart is only cleared once an order has gone through. Every failure
//! path leaves it as it was.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use redline_core::{CheckoutForm, CoreError, OrderSummary};

use crate::error::ApiError;
use crate::state::{
    CartStore, CheckoutState, OrderConfirmation, OrderLine, StorefrontConfig, SubmissionStatus,
};

/// Order summary plus the display strings the checkout page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub summary: OrderSummary,
    /// How much more gets free shipping, `None` once it applies.
    pub free_shipping_remaining_cents: Option<i64>,
    pub total_display: String,
}

impl SummaryResponse {
    fn build(summary: OrderSummary, config: &StorefrontConfig) -> Self {
        let discounted = summary.subtotal - summary.discount;
        SummaryResponse {
            free_shipping_remaining_cents: config
                .pricing
                .remaining_for_free_shipping(discounted)
                .map(|m| m.cents()),
            total_display: config.format_currency(summary.total.cents()),
            summary,
        }
    }
}

/// Prices the current cart with the applied coupon.
pub fn order_summary(
    cart: &CartStore,
    checkout: &CheckoutState,
    config: &StorefrontConfig,
) -> SummaryResponse {
    debug!("order_summary command");
    let coupon = checkout.coupon();
    let summary = cart.with_cart(|c| OrderSummary::compute(c, coupon.as_ref(), &config.pricing));
    SummaryResponse::build(summary, config)
}

/// Applies a coupon code, replacing any coupon already applied.
///
/// An unknown code leaves the applied coupon untouched.
pub fn apply_coupon(
    cart: &CartStore,
    checkout: &CheckoutState,
    config: &StorefrontConfig,
    code: &str,
) -> Result<SummaryResponse, ApiError> {
    debug!(code = %code, "apply_coupon command");

    let coupon = config.coupon_book().redeem(code)?;
    info!(code = %coupon.code, percent_off_bps = coupon.percent_off_bps, "Coupon applied");
    checkout.set_coupon(Some(coupon));

    Ok(order_summary(cart, checkout, config))
}

pub fn remove_coupon(
    cart: &CartStore,
    checkout: &CheckoutState,
    config: &StorefrontConfig,
) -> SummaryResponse {
    debug!("remove_coupon command");
    checkout.set_coupon(None);
    order_summary(cart, checkout, config)
}

/// Submits the checkout form against the current cart.
pub async fn place_order(
    cart: &CartStore,
    checkout: &CheckoutState,
    config: &StorefrontConfig,
    form: CheckoutForm,
) -> Result<OrderConfirmation, ApiError> {
    debug!(email = %form.email, "place_order command");

    form.validate()?;

    if cart.with_cart(|c| c.is_empty()) {
        return Err(CoreError::EmptyCart.into());
    }

    if !checkout.order().begin() {
        return Err(ApiError::busy("Order"));
    }

    tokio::time::sleep(config.checkout_delay()).await;

    if config.is_declined_card(&form.card_digits()) {
        warn!(card_last4 = %form.card_last4(), "Payment declined");
        let err = ApiError::payment("Your card was declined. Please try a different card.");
        checkout.order().fail(err.message.clone());
        return Err(err);
    }

    let coupon = checkout.coupon();
    let placed = cart.with_cart_mut(|c| {
        if c.is_empty() {
            return None;
        }
        let lines: Vec<OrderLine> = c.lines().iter().map(OrderLine::from).collect();
        let summary = OrderSummary::compute(c, coupon.as_ref(), &config.pricing);
        c.clear();
        Some((lines, summary))
    });

    // The cart can be emptied from another view during the delay.
    let Some((lines, summary)) = placed else {
        let err = ApiError::from(CoreError::EmptyCart);
        checkout.order().fail(err.message.clone());
        return Err(err);
    };

    checkout.set_coupon(None);

    let confirmation = OrderConfirmation {
        order_number: new_order_number(),
        placed_at: Utc::now(),
        customer_name: form.full_name(),
        email: form.email.trim().to_string(),
        card_last4: form.card_last4(),
        lines,
        summary,
    };

    info!(
        order_number = %confirmation.order_number,
        items = confirmation.summary.item_count,
        total = %confirmation.summary.total,
        "Order placed"
    );

    checkout.order().succeed(confirmation.clone());
    Ok(confirmation)
}

/// Where the current order submission stands.
pub fn order_status(checkout: &CheckoutState) -> SubmissionStatus<OrderConfirmation> {
    checkout.order().status()
}

/// Leaves the confirmation page.
pub fn reset_order(checkout: &CheckoutState) {
    debug!("reset_order command");
    checkout.order().reset();
}

/// `RL-` followed by the first 8 hex digits of a v4 UUID, uppercased.
fn new_order_number() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("RL-{}", id[..8].to_ascii_uppercase())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::{add_to_cart, AddToCartRequest};
    use crate::error::ErrorCode;
    use redline_catalog::Catalog;

    struct Session {
        catalog: &'static Catalog,
        cart: CartStore,
        checkout: CheckoutState,
        config: StorefrontConfig,
    }

    impl Session {
        fn new() -> Self {
            Session {
                catalog: Catalog::builtin().unwrap(),
                cart: CartStore::new(),
                checkout: CheckoutState::new(),
                config: StorefrontConfig::default(),
            }
        }

        async fn add(&self, product_id: &str, quantity: i64, size: &str, color: &str) {
            let request = AddToCartRequest {
                product_id: product_id.to_string(),
                quantity: Some(quantity),
                size: size.to_string(),
                color: color.to_string(),
            };
            add_to_cart(self.catalog, &self.cart, &self.config, request)
                .await
                .unwrap();
        }

        async fn place(&self, form: CheckoutForm) -> Result<OrderConfirmation, ApiError> {
            place_order(&self.cart, &self.checkout, &self.config, form).await
        }

        fn item_count(&self) -> i64 {
            self.cart.with_cart(|c| c.total_items())
        }
    }

    fn form(card_number: &str) -> CheckoutForm {
        CheckoutForm {
            first_name: "Mia".into(),
            last_name: "Toretto".into(),
            email: "mia@example.com".into(),
            address: "1327 Bellevue Ave".into(),
            city: "Los Angeles".into(),
            state: "CA".into(),
            zip_code: "90026".into(),
            phone: "(213) 555-0147".into(),
            card_number: card_number.into(),
            card_name: "Mia Toretto".into(),
            expiry_date: "08/29".into(),
            cvv: "123".into(),
        }
    }

    const GOOD_CARD: &str = "4242 4242 4242 4242";
    const DECLINED_CARD: &str = "4000 0000 0000 0002";

    #[tokio::test(start_paused = true)]
    async fn test_coupon_changes_summary() {
        let session = Session::new();
        session.add("rl-tee-001", 2, "M", "Black").await;

        let response = apply_coupon(&session.cart, &session.checkout, &session.config, " redline10 ")
            .unwrap();
        let summary = &response.summary;
        assert_eq!(summary.subtotal.cents(), 6998);
        assert_eq!(summary.discount.cents(), 700);
        assert_eq!(summary.shipping.cents(), 999);
        assert_eq!(summary.tax.cents(), 504);
        assert_eq!(summary.total.cents(), 7801);
        assert_eq!(summary.coupon_code.as_deref(), Some("REDLINE10"));
        assert_eq!(response.free_shipping_remaining_cents, Some(10000 - 6298));
        assert_eq!(response.total_display, "$78.01");
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_coupon_keeps_current_one() {
        let session = Session::new();
        session.add("rl-hat-001", 1, "One Size", "Black").await;
        apply_coupon(&session.cart, &session.checkout, &session.config, "PITSTOP20").unwrap();

        let err = apply_coupon(&session.cart, &session.checkout, &session.config, "FREECAR")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCoupon);
        assert_eq!(session.checkout.coupon().map(|c| c.code), Some("PITSTOP20".into()));

        let response = remove_coupon(&session.cart, &session.checkout, &session.config);
        assert!(response.summary.discount.is_zero());
        assert!(session.checkout.coupon().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_order_clears_cart_and_coupon() {
        let session = Session::new();
        session.add("rl-jkt-001", 1, "L", "Black").await;
        apply_coupon(&session.cart, &session.checkout, &session.config, "REDLINE10").unwrap();

        let confirmation = session.place(form(GOOD_CARD)).await.unwrap();

        assert!(confirmation.order_number.starts_with("RL-"));
        assert_eq!(confirmation.order_number.len(), 11);
        assert!(confirmation.order_number[3..]
            .chars()
            .all(|ch| ch.is_ascii_hexdigit() && !ch.is_ascii_lowercase()));
        assert_eq!(confirmation.customer_name, "Mia Toretto");
        assert_eq!(confirmation.card_last4, "4242");
        assert_eq!(confirmation.lines.len(), 1);
        assert_eq!(confirmation.lines[0].line_total_cents, 11999);
        // 11999 - 1200 = 10799, free shipping, 8% tax = 864
        assert_eq!(confirmation.summary.shipping.cents(), 0);
        assert_eq!(confirmation.summary.total.cents(), 10799 + 864);

        assert_eq!(session.item_count(), 0);
        assert!(session.checkout.coupon().is_none());
        assert_eq!(
            order_status(&session.checkout),
            SubmissionStatus::Succeeded(confirmation)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_form_keeps_cart() {
        let session = Session::new();
        session.add("rl-tee-002", 1, "S", "Black").await;

        let mut bad = form("1234 5678 9012 3456");
        bad.zip_code = "9002".into();
        let err = session.place(bad).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        let fields = err.fields.unwrap();
        assert!(fields.contains_key("cardNumber"));
        assert!(fields.contains_key("zipCode"));
        assert_eq!(session.item_count(), 1);
        assert_eq!(order_status(&session.checkout), SubmissionStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_declined_card_keeps_cart() {
        let session = Session::new();
        session.add("rl-tee-002", 2, "S", "Black").await;

        let err = session.place(form(DECLINED_CARD)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::PaymentError);
        assert_eq!(session.item_count(), 2);
        assert!(matches!(
            order_status(&session.checkout),
            SubmissionStatus::Failed(_)
        ));

        // a retry with another card goes through
        session.place(form(GOOD_CARD)).await.unwrap();
        assert_eq!(session.item_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_cart_is_rejected() {
        let session = Session::new();
        let err = session.place(form(GOOD_CARD)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_submit_while_pending_is_busy() {
        let session = Session::new();
        session.add("rl-acc-001", 1, "One Size", "Silver").await;

        let (first, second) = tokio::join!(
            session.place(form(GOOD_CARD)),
            session.place(form(GOOD_CARD)),
        );

        assert!(first.is_ok());
        assert_eq!(second.unwrap_err().code, ErrorCode::Busy);
        assert_eq!(session.item_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cart_emptied_during_processing() {
        let session = Session::new();
        session.add("rl-acc-001", 1, "One Size", "Silver").await;

        let (result, _) = tokio::join!(session.place(form(GOOD_CARD)), async {
            session.cart.with_cart_mut(|c| c.clear());
        });

        assert_eq!(result.unwrap_err().code, ErrorCode::CartError);
        assert!(matches!(
            order_status(&session.checkout),
            SubmissionStatus::Failed(_)
        ));

        reset_order(&session.checkout);
        assert_eq!(order_status(&session.checkout), SubmissionStatus::Idle);
    }
}

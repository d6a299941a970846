//! # Checkout State
//!
//! The applied coupon and the order submission for the current session.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;

use redline_core::{CartLine, Coupon, OrderSummary};

use super::submission::SubmissionTracker;

/// One line on the order confirmation, frozen at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,
    pub name: String,
    pub size: String,
    pub color: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        OrderLine {
            product_id: line.product.id.clone(),
            name: line.product.name.clone(),
            size: line.size.clone(),
            color: line.color.clone(),
            quantity: line.quantity,
            unit_price_cents: line.product.price_cents,
            line_total_cents: line.line_total().cents(),
        }
    }
}

/// What the shopper sees after a successful order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    /// `RL-` followed by 8 uppercase hex characters.
    pub order_number: String,
    pub placed_at: DateTime<Utc>,
    pub customer_name: String,
    pub email: String,
    pub card_last4: String,
    pub lines: Vec<OrderLine>,
    pub summary: OrderSummary,
}

/// Session checkout state.
#[derive(Debug, Default)]
pub struct CheckoutState {
    coupon: Mutex<Option<Coupon>>,
    order: SubmissionTracker<OrderConfirmation>,
}

impl CheckoutState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coupon(&self) -> Option<Coupon> {
        self.coupon
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the applied coupon, returning the previous one.
    pub fn set_coupon(&self, coupon: Option<Coupon>) -> Option<Coupon> {
        let mut slot = self.coupon.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *slot, coupon)
    }

    pub fn order(&self) -> &SubmissionTracker<OrderConfirmation> {
        &self.order
    }
}

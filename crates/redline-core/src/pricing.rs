//! # Pricing
//!
//! Turns a cart into the numbers shown on the checkout page.
//!
//! ## Order Summary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Subtotal            Σ price × quantity                   $129.97       │
//! │  Discount (REDLINE10)  subtotal × coupon %                -$13.00       │
//! │  Shipping            free at/over threshold, else flat     FREE         │
//! │  Tax                 (subtotal − discount) × tax %          $9.36       │
//! │  ─────────────────────────────────────────────────────────────────     │
//! │  Total                                                    $126.33       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Coupons
// =============================================================================

/// A promotional code worth a percentage of the subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Code as the shopper types it; matched case-insensitively.
    pub code: String,
    /// Discount in basis points (1000 = 10%).
    pub percent_off_bps: u32,
}

impl Coupon {
    pub fn new(code: impl Into<String>, percent_off_bps: u32) -> Self {
        Coupon {
            code: code.into(),
            percent_off_bps,
        }
    }

    /// Discount this coupon gives on `subtotal`.
    pub fn discount_on(&self, subtotal: Money) -> Money {
        subtotal.percentage(self.percent_off_bps)
    }
}

/// The set of codes the store accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CouponBook {
    coupons: Vec<Coupon>,
}

impl CouponBook {
    pub fn new(coupons: Vec<Coupon>) -> Self {
        CouponBook { coupons }
    }

    /// Looks up a code typed at checkout.
    ///
    /// Surrounding whitespace is ignored and case does not matter. Anything
    /// else that is not an exact match is rejected.
    ///
    /// ```rust
    /// use redline_core::pricing::{Coupon, CouponBook};
    ///
    /// let book = CouponBook::new(vec![Coupon::new("REDLINE10", 1000)]);
    /// assert!(book.redeem(" redline10 ").is_ok());
    /// assert!(book.redeem("REDLINE").is_err());
    /// ```
    pub fn redeem(&self, code: &str) -> CoreResult<Coupon> {
        let typed = code.trim();
        self.coupons
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(typed))
            .cloned()
            .ok_or_else(|| CoreError::InvalidCoupon(typed.to_string()))
    }

    pub fn len(&self) -> usize {
        self.coupons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }
}

// =============================================================================
// Pricing Policy
// =============================================================================

/// Shipping and tax rules for the order summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingPolicy {
    /// Discounted subtotal at or above which shipping is free.
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold_cents: i64,

    /// Shipping charged below the threshold.
    #[serde(default = "default_flat_shipping")]
    pub flat_shipping_cents: i64,

    /// Sales tax in basis points (800 = 8%).
    #[serde(default = "default_tax_rate")]
    pub tax_rate_bps: u32,
}

fn default_free_shipping_threshold() -> i64 {
    10_000
}

fn default_flat_shipping() -> i64 {
    999
}

fn default_tax_rate() -> u32 {
    800
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            free_shipping_threshold_cents: default_free_shipping_threshold(),
            flat_shipping_cents: default_flat_shipping(),
            tax_rate_bps: default_tax_rate(),
        }
    }
}

impl PricingPolicy {
    /// Shipping for a discounted subtotal. Nothing to ship costs nothing.
    pub fn shipping_for(&self, discounted_subtotal: Money) -> Money {
        if !discounted_subtotal.is_positive()
            || discounted_subtotal.cents() >= self.free_shipping_threshold_cents
        {
            Money::zero()
        } else {
            Money::from_cents(self.flat_shipping_cents)
        }
    }

    /// How much more the shopper needs for free shipping, if anything.
    pub fn remaining_for_free_shipping(&self, discounted_subtotal: Money) -> Option<Money> {
        let remaining = self.free_shipping_threshold_cents - discounted_subtotal.cents();
        (remaining > 0).then(|| Money::from_cents(remaining))
    }
}

// =============================================================================
// Order Summary
// =============================================================================

/// The checkout page's money column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub item_count: i64,
    pub subtotal: Money,
    pub discount: Money,
    pub coupon_code: Option<String>,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
}

impl OrderSummary {
    /// Prices a cart.
    pub fn compute(cart: &Cart, coupon: Option<&Coupon>, policy: &PricingPolicy) -> Self {
        let subtotal = cart.total_price();
        let discount = coupon
            .map(|c| c.discount_on(subtotal))
            .unwrap_or_default();
        let discounted = subtotal - discount;
        let shipping = policy.shipping_for(discounted);
        let tax = discounted.percentage(policy.tax_rate_bps);

        OrderSummary {
            item_count: cart.total_items(),
            subtotal,
            discount,
            coupon_code: coupon.map(|c| c.code.clone()),
            shipping,
            tax,
            total: discounted + shipping + tax,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::types::{ColorOption, Product};

    fn cart_worth(price_cents: i64, quantity: i64) -> Cart {
        let product = Arc::new(Product {
            id: "rl-tee-001".to_string(),
            name: "Tee".to_string(),
            description: String::new(),
            price_cents,
            original_price_cents: None,
            images: Vec::new(),
            category: "Car T-Shirts".to_string(),
            tags: Vec::new(),
            sizes: vec!["M".into()],
            colors: vec![ColorOption::new("Black", "#111")],
            featured: false,
            best_seller: false,
            is_new: false,
            stock: 100,
        });
        let mut cart = Cart::new();
        cart.add_item(product, quantity, "M", "Black");
        cart
    }

    fn book() -> CouponBook {
        CouponBook::new(vec![
            Coupon::new("REDLINE10", 1000),
            Coupon::new("PITSTOP20", 2000),
        ])
    }

    #[test]
    fn test_coupon_matching() {
        let book = book();
        assert_eq!(book.redeem("REDLINE10").unwrap().percent_off_bps, 1000);
        assert_eq!(book.redeem("  pitstop20\n").unwrap().code, "PITSTOP20");

        let err = book.redeem("REDLINE100").unwrap_err();
        assert!(matches!(err, CoreError::InvalidCoupon(code) if code == "REDLINE100"));
        assert!(book.redeem("").is_err());
        assert!(CouponBook::default().redeem("REDLINE10").is_err());
    }

    #[test]
    fn test_summary_below_free_shipping() {
        // 2 × $39.99 = $79.98, 8% tax = $6.40, flat $9.99 shipping
        let summary = OrderSummary::compute(&cart_worth(3999, 2), None, &PricingPolicy::default());

        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.subtotal.cents(), 7998);
        assert!(summary.discount.is_zero());
        assert_eq!(summary.shipping.cents(), 999);
        assert_eq!(summary.tax.cents(), 640);
        assert_eq!(summary.total.cents(), 7998 + 999 + 640);
    }

    #[test]
    fn test_summary_with_coupon_and_free_shipping() {
        // 4 × $39.99 = $159.96, 10% off = $15.996 → $16.00
        let coupon = book().redeem("redline10").unwrap();
        let summary =
            OrderSummary::compute(&cart_worth(3999, 4), Some(&coupon), &PricingPolicy::default());

        assert_eq!(summary.subtotal.cents(), 15996);
        assert_eq!(summary.discount.cents(), 1600);
        assert_eq!(summary.coupon_code.as_deref(), Some("REDLINE10"));
        assert!(summary.shipping.is_zero());
        // 8% of $143.96 = $11.5168 → $11.52
        assert_eq!(summary.tax.cents(), 1152);
        assert_eq!(summary.total.cents(), 14396 + 1152);
    }

    #[test]
    fn test_coupon_can_drop_below_free_shipping() {
        // $105.00 qualifies, 10% off brings it to $94.50 which does not
        let coupon = Coupon::new("REDLINE10", 1000);
        let policy = PricingPolicy::default();

        let plain = OrderSummary::compute(&cart_worth(10500, 1), None, &policy);
        assert!(plain.shipping.is_zero());

        let discounted = OrderSummary::compute(&cart_worth(10500, 1), Some(&coupon), &policy);
        assert_eq!(discounted.shipping.cents(), 999);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let policy = PricingPolicy::default();
        assert!(policy.shipping_for(Money::from_cents(10_000)).is_zero());
        assert_eq!(policy.shipping_for(Money::from_cents(9_999)).cents(), 999);
        assert_eq!(
            policy.remaining_for_free_shipping(Money::from_cents(9_000)),
            Some(Money::from_cents(1_000))
        );
        assert_eq!(policy.remaining_for_free_shipping(Money::from_cents(12_000)), None);
    }

    #[test]
    fn test_empty_cart_costs_nothing() {
        let summary = OrderSummary::compute(&Cart::new(), None, &PricingPolicy::default());
        assert!(summary.shipping.is_zero());
        assert!(summary.total.is_zero());
        assert_eq!(summary.item_count, 0);
    }
}

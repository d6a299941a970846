//! # Money Module
//!
//! Provides the `Money` type for prices, line totals and order summaries.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog prices like $39.99 are stored as 3999 cents.                   │
//! │                                                                         │
//! │  Float:    39.99 * 3 = 119.97000000000001                               │
//! │  Integer:  3999 * 3  = 11997  → "$119.97"                               │
//! │                                                                         │
//! │  Only Display converts to dollars, and only for humans.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use redline_core::money::Money;
//!
//! let hoodie = Money::from_cents(6499);
//! let cart_total: Money = [hoodie, hoodie * 2].into_iter().sum();
//! assert_eq!(cart_total.cents(), 19497);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

/// Basis points in one whole (100.00%).
const BPS_SCALE: i128 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Where Money Flows
/// ```text
/// Product.price_cents ──► CartLine.line_total ──► Cart.total_price
///                                                      │
///                      Coupon ──► OrderSummary ◄───────┘
///                                     │
///                          subtotal − discount + shipping + tax
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use redline_core::money::Money;
    ///
    /// let price = Money::from_cents(3999);
    /// assert_eq!(price.cents(), 3999);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole dollars.
    #[inline]
    pub const fn from_dollars(dollars: i64) -> Self {
        Money(dollars * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ```rust
    /// use redline_core::money::Money;
    ///
    /// let cap = Money::from_cents(2499);
    /// assert_eq!(cap.multiply_quantity(3).cents(), 7497);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Returns the given share of this amount, in basis points, rounded half up.
    ///
    /// Used for both coupon discounts and sales tax:
    /// ```rust
    /// use redline_core::money::Money;
    ///
    /// // 8% of $79.98 = $6.3984 → $6.40
    /// assert_eq!(Money::from_cents(7998).percentage(800).cents(), 640);
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        // i128 keeps large carts from overflowing before the division
        let share = (self.0 as i128 * bps as i128 + BPS_SCALE / 2) / BPS_SCALE;
        Money(share as i64)
    }

    /// Whole percent saved going from `original` down to `self`.
    ///
    /// Returns `None` when `original` is not higher than the current price,
    /// so a stale or equal "compare at" price never shows a badge.
    ///
    /// ```rust
    /// use redline_core::money::Money;
    ///
    /// let now = Money::from_cents(2999);
    /// let was = Money::from_cents(3999);
    /// assert_eq!(now.percent_off(was), Some(25));
    /// ```
    pub fn percent_off(&self, original: Money) -> Option<u32> {
        if original.0 <= self.0 || original.0 <= 0 {
            return None;
        }
        let saved = (original.0 - self.0) as i128;
        Some(((saved * 100 + original.0 as i128 / 2) / original.0 as i128) as u32)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the amount as `$12.34` (debug/CLI output; the frontend
/// formats with the configured currency symbol).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

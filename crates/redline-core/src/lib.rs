//! # redline-core: Pure Storefront Logic
//!
//! This crate is the **heart** of the Redline storefront. It contains the cart
//! bookkeeping, the product filter/sort pipeline, pricing and form validation
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Redline Storefront Architecture                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web Frontend                                 │   │
//! │  │    Shop Grid ──► Product Page ──► Cart Drawer ──► Checkout      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 redline-storefront (app)                        │   │
//! │  │    list_products, add_to_cart, apply_coupon, place_order        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ redline-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  ┌────────┐ ┌────────┐ ┌────────┐ ┌─────────┐ ┌────────────┐   │   │
//! │  │  │ types  │ │ money  │ │  cart  │ │ filter  │ │  pricing   │   │   │
//! │  │  │Product │ │ Money  │ │  Cart  │ │Criteria │ │  Coupon    │   │   │
//! │  │  │Review  │ │        │ │CartLine│ │ SortKey │ │OrderSummary│   │   │
//! │  │  └────────┘ └────────┘ └────────┘ └─────────┘ └────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │              redline-catalog (static dataset)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, Review)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - Cart line items and derived totals
//! - [`filter`] - Product filter/sort pipeline
//! - [`pricing`] - Coupons, shipping and tax for the order summary
//! - [`validation`] - Input rules the command layer applies before mutating
//! - [`forms`] - Checkout and contact form validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use redline_core::money::Money;
//!
//! let tee = Money::from_cents(3999); // $39.99
//! let line = tee.multiply_quantity(2);
//! assert_eq!(line.to_string(), "$79.98");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod filter;
pub mod forms;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartTotals, LineKey};
pub use error::{CoreError, CoreResult, ValidationError};
pub use filter::{FilterCriteria, PriceRange, SortKey};
pub use forms::{CheckoutForm, ContactForm, FieldErrors};
pub use money::Money;
pub use pricing::{Coupon, CouponBook, OrderSummary, PricingPolicy};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Multiplier applied to the price slider's upper bound before comparing it
/// against product prices.
///
/// The slider runs 0-100 in dollars; only the upper handle is scaled.
pub const PRICE_CEILING_SCALE: i64 = 100;

/// Cents in one slider unit.
pub const CENTS_PER_DOLLAR: i64 = 100;

/// Default upper bound of the price slider.
pub const DEFAULT_PRICE_SLIDER_MAX: i64 = 100;

/// Category label that disables the category stage of the filter.
pub const ALL_CATEGORIES: &str = "all";

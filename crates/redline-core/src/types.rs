//! # Domain Types
//!
//! Catalog types shared by the filter pipeline, the cart and the frontend.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Category     │   │     Review      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  slug           │   │  product_id     │       │
//! │  │  price_cents    │   │  name           │   │  rating (1-5)   │       │
//! │  │  sizes, colors  │   │  description    │   │  author, body   │       │
//! │  │  flags, stock   │   │  image          │   │  verified       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every type here is defined once at build time (see `redline-catalog`) and
//! never mutated afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Color Option
// =============================================================================

/// A colorway a product is printed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ColorOption {
    /// Name shown to the shopper and stored on the cart line ("Black").
    pub name: String,
    /// CSS color used for the swatch ("#111111").
    pub value: String,
}

impl ColorOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        ColorOption {
            name: name.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Product Flags
// =============================================================================

/// The merchandising flags a product can carry.
///
/// The flag-based sort keys partition on these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductFlag {
    Featured,
    BestSeller,
    New,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the static catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable identifier ("rl-tee-001").
    pub id: String,

    /// Display name.
    pub name: String,

    /// Long-form description for the product page.
    pub description: String,

    /// Current price in cents.
    pub price_cents: i64,

    /// "Compare at" price in cents, when the product is on sale.
    #[serde(default)]
    pub original_price_cents: Option<i64>,

    /// Image paths relative to the asset base path.
    pub images: Vec<String>,

    /// Category label ("Car T-Shirts").
    pub category: String,

    /// Free-form tags used by search.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Sizes this product is cut in.
    pub sizes: Vec<String>,

    /// Colorways this product is printed in.
    pub colors: Vec<ColorOption>,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub best_seller: bool,

    #[serde(default, rename = "new")]
    pub is_new: bool,

    /// Units on hand.
    pub stock: i64,
}

impl Product {
    /// Returns the price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the "compare at" price as Money.
    #[inline]
    pub fn original_price(&self) -> Option<Money> {
        self.original_price_cents.map(Money::from_cents)
    }

    /// Whole percent off the original price, for the sale badge.
    pub fn discount_percent(&self) -> Option<u32> {
        self.original_price()
            .and_then(|original| self.price().percent_off(original))
    }

    /// Checks whether the product is cut in `size`.
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Checks whether the product comes in the color named `color`.
    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c.name == color)
    }

    /// Names of all colorways, in catalog order.
    pub fn color_names(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.name.clone()).collect()
    }

    /// Checks if at least one unit is on hand.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Clamps a requested quantity into `1..=stock`.
    ///
    /// This is the quantity-picker behavior; the cart itself does not
    /// enforce it. An out-of-stock product clamps to 0.
    pub fn clamp_quantity(&self, quantity: i64) -> i64 {
        if !self.in_stock() {
            return 0;
        }
        quantity.clamp(1, self.stock)
    }

    /// Reads one of the merchandising flags.
    pub fn has_flag(&self, flag: ProductFlag) -> bool {
        match flag {
            ProductFlag::Featured => self.featured,
            ProductFlag::BestSeller => self.best_seller,
            ProductFlag::New => self.is_new,
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// A shop category shown on the home page and in the filter sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    /// URL slug ("car-t-shirts").
    pub slug: String,
    /// Label matched against `Product::category` ("Car T-Shirts").
    pub name: String,
    pub description: String,
    pub image: String,
}

// =============================================================================
// Review
// =============================================================================

/// A customer review attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub product_id: String,
    pub author: String,
    /// Star rating, 1-5.
    pub rating: u8,
    pub title: String,
    pub body: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// Purchased through the store.
    #[serde(default)]
    pub verified: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn hoodie() -> Product {
        Product {
            id: "rl-hood-001".to_string(),
            name: "Boost Junkie Hoodie".to_string(),
            description: "Heavyweight fleece".to_string(),
            price_cents: 5999,
            original_price_cents: Some(7999),
            images: vec!["/images/hoodie.jpg".to_string()],
            category: "Hoodies".to_string(),
            tags: vec!["turbo".to_string()],
            sizes: vec!["M".to_string(), "L".to_string()],
            colors: vec![ColorOption::new("Black", "#111111")],
            featured: true,
            best_seller: false,
            is_new: true,
            stock: 4,
        }
    }

    #[test]
    fn test_discount_percent() {
        let mut product = hoodie();
        assert_eq!(product.discount_percent(), Some(25));

        product.original_price_cents = None;
        assert_eq!(product.discount_percent(), None);
    }

    #[test]
    fn test_size_and_color_lookup() {
        let product = hoodie();
        assert!(product.has_size("M"));
        assert!(!product.has_size("XS"));
        assert!(product.has_color("Black"));
        assert!(!product.has_color("black"));
        assert_eq!(product.color_names(), vec!["Black".to_string()]);
    }

    #[test]
    fn test_clamp_quantity() {
        let mut product = hoodie();
        assert_eq!(product.clamp_quantity(0), 1);
        assert_eq!(product.clamp_quantity(3), 3);
        assert_eq!(product.clamp_quantity(10), 4);

        product.stock = 0;
        assert_eq!(product.clamp_quantity(2), 0);
    }

    #[test]
    fn test_flags() {
        let product = hoodie();
        assert!(product.has_flag(ProductFlag::Featured));
        assert!(!product.has_flag(ProductFlag::BestSeller));
        assert!(product.has_flag(ProductFlag::New));
    }

    #[test]
    fn test_product_json_shape() {
        let json = serde_json::to_value(hoodie()).unwrap();
        assert_eq!(json["priceCents"], 5999);
        assert_eq!(json["bestSeller"], false);
        assert_eq!(json["new"], true);
    }
}

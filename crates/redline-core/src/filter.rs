//! # Product Filter & Sort
//!
//! Narrows a product list by the shop sidebar's controls, then orders it.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products ──► category ──► price ──► sizes ──► colors ──► sort ──► out  │
//! │                                                                         │
//! │  category  "car" matches "Car T-Shirts" (case-insensitive contains)     │
//! │  price     min $ <= price $ <= max × PRICE_CEILING_SCALE $              │
//! │  sizes     skipped when empty, else any selected size offered           │
//! │  colors    skipped when empty, else any selected color offered          │
//! │  sort      featured/newest/best-selling: stable partition on the flag   │
//! │            price-low-high/price-high-low: numeric sort on price         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every stage runs on the previous stage's output. The input slice is never
//! touched; the result borrows from it. An empty result is a normal outcome.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{Product, ProductFlag};
use crate::{ALL_CATEGORIES, CENTS_PER_DOLLAR, DEFAULT_PRICE_SLIDER_MAX, PRICE_CEILING_SCALE};

// =============================================================================
// Sort Key
// =============================================================================

/// Sort order selected in the shop toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Featured products first.
    #[default]
    Featured,
    /// Cheapest first.
    PriceLowHigh,
    /// Most expensive first.
    PriceHighLow,
    /// New arrivals first.
    Newest,
    /// Best sellers first.
    BestSelling,
}

impl SortKey {
    /// All keys, in toolbar order.
    pub const ALL: [SortKey; 5] = [
        SortKey::Featured,
        SortKey::PriceLowHigh,
        SortKey::PriceHighLow,
        SortKey::Newest,
        SortKey::BestSelling,
    ];

    /// The flag a partitioning key groups on, `None` for price sorts.
    pub fn flag(&self) -> Option<ProductFlag> {
        match self {
            SortKey::Featured => Some(ProductFlag::Featured),
            SortKey::Newest => Some(ProductFlag::New),
            SortKey::BestSelling => Some(ProductFlag::BestSeller),
            SortKey::PriceLowHigh | SortKey::PriceHighLow => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceLowHigh => "price-low-high",
            SortKey::PriceHighLow => "price-high-low",
            SortKey::Newest => "newest",
            SortKey::BestSelling => "best-selling",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == needle)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "sort".to_string(),
                allowed: SortKey::ALL.iter().map(|k| k.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Price Range
// =============================================================================

/// Price slider position, in slider units (0-100 by default).
///
/// Slider units are whole dollars. The upper handle is additionally scaled by
/// [`PRICE_CEILING_SCALE`], so the stock 0-100 slider never hides a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

impl PriceRange {
    pub const fn new(min: i64, max: i64) -> Self {
        PriceRange { min, max }
    }

    /// Lower bound in cents.
    #[inline]
    pub const fn floor_cents(&self) -> i64 {
        self.min.saturating_mul(CENTS_PER_DOLLAR)
    }

    /// Upper bound in cents: slider value × [`PRICE_CEILING_SCALE`] dollars.
    #[inline]
    pub const fn ceiling_cents(&self) -> i64 {
        self.max
            .saturating_mul(PRICE_CEILING_SCALE)
            .saturating_mul(CENTS_PER_DOLLAR)
    }

    #[inline]
    pub const fn contains(&self, price_cents: i64) -> bool {
        price_cents >= self.floor_cents() && price_cents <= self.ceiling_cents()
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        PriceRange::new(0, DEFAULT_PRICE_SLIDER_MAX)
    }
}

// =============================================================================
// Filter Criteria
// =============================================================================

/// The shop sidebar's state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Category substring; empty or `"all"` keeps every category.
    pub category: String,
    pub price_range: PriceRange,
    pub sizes: BTreeSet<String>,
    pub colors: BTreeSet<String>,
    pub sort: SortKey,
}

impl FilterCriteria {
    /// Criteria that keep everything, sorted by `featured`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_price_range(mut self, min: i64, max: i64) -> Self {
        self.price_range = PriceRange::new(min, max);
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.sizes.insert(size.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.colors.insert(color.into());
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Category stage: case-insensitive substring match.
    pub fn matches_category(&self, product: &Product) -> bool {
        let wanted = self.category.trim();
        if wanted.is_empty() || wanted.eq_ignore_ascii_case(ALL_CATEGORIES) {
            return true;
        }
        product
            .category
            .to_lowercase()
            .contains(&wanted.to_lowercase())
    }

    /// Price stage.
    pub fn matches_price(&self, product: &Product) -> bool {
        self.price_range.contains(product.price_cents)
    }

    /// Size stage: any selected size is offered.
    pub fn matches_sizes(&self, product: &Product) -> bool {
        self.sizes.is_empty() || self.sizes.iter().any(|size| product.has_size(size))
    }

    /// Color stage: any selected color is offered.
    pub fn matches_colors(&self, product: &Product) -> bool {
        self.colors.is_empty() || self.colors.iter().any(|color| product.has_color(color))
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Runs the filter stages and the sort over `products`.
///
/// ## Example
/// ```rust
/// use redline_core::filter::{apply, FilterCriteria, SortKey};
/// # use redline_core::{Product, ColorOption};
/// # fn tee(id: &str, price_cents: i64) -> Product {
/// #     Product { id: id.into(), name: id.into(), description: String::new(),
/// #         price_cents, original_price_cents: None, images: vec![],
/// #         category: "Car T-Shirts".into(), tags: vec![], sizes: vec!["M".into()],
/// #         colors: vec![ColorOption::new("Black", "#111")], featured: false,
/// #         best_seller: false, is_new: false, stock: 5 }
/// # }
/// let products = vec![tee("a", 4000), tee("b", 6000)];
/// let criteria = FilterCriteria::new()
///     .with_category("car")
///     .with_sort(SortKey::PriceHighLow);
///
/// let shown = apply(&products, &criteria);
/// let ids: Vec<_> = shown.iter().map(|p| p.id.as_str()).collect();
/// assert_eq!(ids, ["b", "a"]);
/// ```
pub fn apply<'a, I>(products: I, criteria: &FilterCriteria) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut result: Vec<&Product> = products.into_iter().collect();

    result.retain(|p| criteria.matches_category(p));
    result.retain(|p| criteria.matches_price(p));
    result.retain(|p| criteria.matches_sizes(p));
    result.retain(|p| criteria.matches_colors(p));

    sort_products(&mut result, criteria.sort);
    result
}

/// Orders an already-filtered list in place.
///
/// Flag keys are a stable partition (flagged first, order otherwise kept);
/// price keys are stable numeric sorts.
pub fn sort_products(products: &mut [&Product], key: SortKey) {
    match key {
        SortKey::PriceLowHigh => products.sort_by_key(|p| p.price_cents),
        SortKey::PriceHighLow => products.sort_by(|a, b| b.price_cents.cmp(&a.price_cents)),
        SortKey::Featured | SortKey::Newest | SortKey::BestSelling => {
            if let Some(flag) = key.flag() {
                // false < true, so negate to put flagged products first
                products.sort_by_key(|p| !p.has_flag(flag));
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Catalog Repository
//!
//! Read-only access to products, categories and reviews.
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shopper types: "track"                                                 │
//! │       │                                                                 │
//! │       ▼  lowercase, trimmed                                             │
//! │  ┌─────────────────────────────────────────────────┐                    │
//! │  │ rl-hood-002 | Track Day Zip Hoodie | track ...  │ ← name match       │
//! │  │ rl-tee-003  | Apex Hunter Tee      | track ...  │ ← tag match        │
//! │  │ rl-tee-002  | Boost Junkie Tee     | turbo ...  │                    │
//! │  └─────────────────────────────────────────────────┘                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Results: name matches first, then category/tag matches,                │
//! │           each group in catalog order                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock};

use serde::Serialize;
use tracing::debug;

use redline_core::{Category, ColorOption, Product, ProductFlag, Review};

use crate::data;
use crate::error::{CatalogError, CatalogResult};

static BUILTIN: LazyLock<CatalogResult<Catalog>> =
    LazyLock::new(|| Catalog::new(data::products(), data::categories(), data::reviews()?));

/// A category with the number of products filed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub slug: String,
    pub name: String,
    pub product_count: usize,
}

/// The storefront's product catalog.
///
/// ## Usage
/// ```rust
/// use redline_catalog::Catalog;
///
/// let catalog = Catalog::builtin().unwrap();
/// let tee = catalog.get_by_id("rl-tee-001").unwrap();
/// assert_eq!(tee.name, "Rev Limiter Tee");
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
    index: HashMap<String, usize>,
    categories: Vec<Category>,
    reviews: Vec<Review>,
}

impl Catalog {
    /// The dataset compiled into the binary, built on first use.
    pub fn builtin() -> CatalogResult<&'static Catalog> {
        BUILTIN.as_ref().map_err(Clone::clone)
    }

    /// Builds a catalog, checking that the dataset hangs together.
    ///
    /// ## Checks
    /// - Product ids are unique
    /// - Prices and stock are not negative; every product has a size and a color
    /// - Every product's category is in `categories`
    /// - Every review points at a known product and rates 1-5
    pub fn new(
        products: Vec<Product>,
        categories: Vec<Category>,
        reviews: Vec<Review>,
    ) -> CatalogResult<Self> {
        let category_names: HashSet<&str> = categories.iter().map(|c| c.name.as_str()).collect();

        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if index.insert(product.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
            check_product(product)?;
            if !category_names.contains(product.category.as_str()) {
                return Err(CatalogError::UnknownCategory {
                    product_id: product.id.clone(),
                    category: product.category.clone(),
                });
            }
        }

        for review in &reviews {
            if !index.contains_key(&review.product_id) {
                return Err(CatalogError::OrphanReview {
                    review_id: review.id.clone(),
                    product_id: review.product_id.clone(),
                });
            }
            if !(1..=5).contains(&review.rating) {
                return Err(CatalogError::InvalidRating {
                    review_id: review.id.clone(),
                    rating: review.rating,
                });
            }
        }

        debug!(
            products = products.len(),
            categories = categories.len(),
            reviews = reviews.len(),
            "Catalog loaded"
        );

        Ok(Catalog {
            products: products.into_iter().map(Arc::new).collect(),
            index,
            categories,
            reviews,
        })
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Every product, in catalog order.
    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Arc<Product>> {
        self.index.get(id).map(|&i| &self.products[i])
    }

    pub fn count(&self) -> usize {
        self.products.len()
    }

    /// Case-insensitive search over name, category and tags.
    ///
    /// An empty query returns the first `limit` products.
    pub fn search(&self, query: &str, limit: usize) -> Vec<Arc<Product>> {
        let needle = query.trim().to_lowercase();

        if needle.is_empty() {
            return self.products.iter().take(limit).cloned().collect();
        }

        let mut by_name = Vec::new();
        let mut by_other = Vec::new();
        for product in &self.products {
            if product.name.to_lowercase().contains(&needle) {
                by_name.push(Arc::clone(product));
            } else if product.category.to_lowercase().contains(&needle)
                || product
                    .tags
                    .iter()
                    .any(|t| t.to_lowercase().contains(&needle))
            {
                by_other.push(Arc::clone(product));
            }
        }

        by_name.extend(by_other);
        by_name.truncate(limit);

        debug!(query = %needle, count = by_name.len(), "Search returned products");
        by_name
    }

    fn flagged(&self, flag: ProductFlag) -> Vec<Arc<Product>> {
        self.products
            .iter()
            .filter(|p| p.has_flag(flag))
            .cloned()
            .collect()
    }

    pub fn featured(&self) -> Vec<Arc<Product>> {
        self.flagged(ProductFlag::Featured)
    }

    pub fn best_sellers(&self) -> Vec<Arc<Product>> {
        self.flagged(ProductFlag::BestSeller)
    }

    pub fn new_arrivals(&self) -> Vec<Arc<Product>> {
        self.flagged(ProductFlag::New)
    }

    /// Other products in the same category, for "You may also like".
    pub fn related(&self, product: &Product, limit: usize) -> Vec<Arc<Product>> {
        self.products
            .iter()
            .filter(|p| p.id != product.id && p.category.eq_ignore_ascii_case(&product.category))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Every size offered anywhere, in first-seen order. Feeds the size filter.
    pub fn available_sizes(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .flat_map(|p| p.sizes.iter())
            .filter(|s| seen.insert(s.as_str()))
            .cloned()
            .collect()
    }

    /// Every colorway offered anywhere, deduplicated by name.
    pub fn available_colors(&self) -> Vec<ColorOption> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .flat_map(|p| p.colors.iter())
            .filter(|c| seen.insert(c.name.as_str()))
            .cloned()
            .collect()
    }

    // =========================================================================
    // Categories
    // =========================================================================

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    pub fn category_counts(&self) -> Vec<CategoryCount> {
        self.categories
            .iter()
            .map(|c| CategoryCount {
                slug: c.slug.clone(),
                name: c.name.clone(),
                product_count: self
                    .products
                    .iter()
                    .filter(|p| p.category == c.name)
                    .count(),
            })
            .collect()
    }

    // =========================================================================
    // Reviews
    // =========================================================================

    pub fn reviews_for(&self, product_id: &str) -> Vec<&Review> {
        self.reviews
            .iter()
            .filter(|r| r.product_id == product_id)
            .collect()
    }

    /// Mean star rating, or `None` for a product nobody has reviewed.
    pub fn average_rating(&self, product_id: &str) -> Option<f64> {
        let ratings: Vec<u8> = self
            .reviews_for(product_id)
            .iter()
            .map(|r| r.rating)
            .collect();
        if ratings.is_empty() {
            return None;
        }
        let sum: u32 = ratings.iter().map(|&r| u32::from(r)).sum();
        Some(f64::from(sum) / ratings.len() as f64)
    }
}

fn check_product(product: &Product) -> CatalogResult<()> {
    let reason = if product.price_cents < 0 {
        Some("price is negative")
    } else if product.stock < 0 {
        Some("stock is negative")
    } else if product.sizes.is_empty() {
        Some("no sizes")
    } else if product.colors.is_empty() {
        Some("no colors")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CatalogError::InvalidProduct {
            product_id: product.id.clone(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(products: &[Arc<Product>]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    fn catalog() -> &'static Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn test_builtin_loads() {
        let catalog = catalog();
        assert_eq!(catalog.count(), 12);
        assert_eq!(catalog.categories().len(), 5);
        assert!(catalog.get_by_id("rl-hood-003").is_some());
        assert!(catalog.get_by_id("rl-nope-999").is_none());
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = Catalog::builtin().unwrap();
        let b = Catalog::builtin().unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_search_ranks_name_matches_first() {
        let results = catalog().search("TRACK", 10);
        assert_eq!(ids(&results), vec!["rl-hood-002", "rl-tee-003"]);
    }

    #[test]
    fn test_search_by_tag_and_limit() {
        let results = catalog().search(" jdm ", 10);
        assert_eq!(ids(&results), vec!["rl-tee-004", "rl-hood-001", "rl-hood-003"]);

        assert_eq!(catalog().search("jdm", 2).len(), 2);
        assert_eq!(catalog().search("", 5).len(), 5);
        assert!(catalog().search("carburetor", 10).is_empty());
    }

    #[test]
    fn test_flag_collections() {
        let catalog = catalog();
        assert_eq!(
            ids(&catalog.featured()),
            vec!["rl-tee-001", "rl-hood-001", "rl-hat-001", "rl-jkt-001"]
        );
        assert_eq!(
            ids(&catalog.best_sellers()),
            vec!["rl-tee-001", "rl-tee-002", "rl-hood-002", "rl-acc-001"]
        );
        assert_eq!(
            ids(&catalog.new_arrivals()),
            vec!["rl-tee-003", "rl-hood-001", "rl-hat-002", "rl-acc-002"]
        );
    }

    #[test]
    fn test_related_excludes_self() {
        let catalog = catalog();
        let hoodie = catalog.get_by_id("rl-hood-001").unwrap();
        assert_eq!(
            ids(&catalog.related(hoodie, 4)),
            vec!["rl-hood-002", "rl-hood-003"]
        );
        assert_eq!(catalog.related(hoodie, 1).len(), 1);
    }

    #[test]
    fn test_category_counts() {
        let counts = catalog().category_counts();
        let pairs: Vec<(&str, usize)> = counts
            .iter()
            .map(|c| (c.slug.as_str(), c.product_count))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("car-t-shirts", 4),
                ("hoodies", 3),
                ("hats", 2),
                ("accessories", 2),
                ("jackets", 1),
            ]
        );
        assert_eq!(
            catalog().category_by_slug("hats").map(|c| c.name.as_str()),
            Some("Hats")
        );
    }

    #[test]
    fn test_reviews_and_rating() {
        let catalog = catalog();
        assert_eq!(catalog.reviews_for("rl-tee-001").len(), 2);
        assert_eq!(catalog.average_rating("rl-tee-001"), Some(4.5));
        assert_eq!(catalog.average_rating("rl-tee-003"), None);
    }

    #[test]
    fn test_sidebar_options() {
        let catalog = catalog();
        assert_eq!(
            catalog.available_sizes(),
            vec!["S", "M", "L", "XL", "XXL", "One Size"]
        );
        let colors: Vec<String> = catalog
            .available_colors()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(colors.first().map(String::as_str), Some("Black"));
        assert_eq!(colors.len(), 9);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut products = data::products();
        products.push(products[0].clone());
        let err = Catalog::new(products, data::categories(), Vec::new()).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateProduct("rl-tee-001".into()));
    }

    #[test]
    fn test_rejects_orphan_review_and_bad_rating() {
        let mut reviews = data::reviews().unwrap();
        reviews[0].product_id = "rl-gone-001".into();
        let err = Catalog::new(data::products(), data::categories(), reviews).unwrap_err();
        assert!(matches!(err, CatalogError::OrphanReview { .. }));

        let mut reviews = data::reviews().unwrap();
        reviews[0].rating = 6;
        let err = Catalog::new(data::products(), data::categories(), reviews).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRating { rating: 6, .. }));
    }

    #[test]
    fn test_rejects_unknown_category_and_bad_product() {
        let mut products = data::products();
        products[0].category = "Socks".into();
        let err = Catalog::new(products, data::categories(), Vec::new()).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCategory { .. }));

        let mut products = data::products();
        products[1].sizes.clear();
        let err = Catalog::new(products, data::categories(), Vec::new()).unwrap_err();
        assert_eq!(
            err,
            CatalogError::InvalidProduct {
                product_id: "rl-tee-002".into(),
                reason: "no sizes".into(),
            }
        );
    }
}

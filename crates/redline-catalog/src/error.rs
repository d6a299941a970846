//! # Catalog Error Types
//!
//! Raised when a dataset handed to [`Catalog::new`](crate::Catalog::new) is
//! internally inconsistent.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Seed tables / caller-supplied dataset                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Catalog::new ── checks ids, categories, reviews                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError::internal (storefront) ← a broken dataset is a build bug      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Dataset consistency errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two products share an id.
    #[error("Duplicate product id: '{0}'")]
    DuplicateProduct(String),

    /// A product names a category that is not in the category list.
    #[error("Product {product_id} has unknown category '{category}'")]
    UnknownCategory {
        product_id: String,
        category: String,
    },

    /// A product field holds a value the storefront cannot display.
    ///
    /// ## When This Occurs
    /// - Negative price or stock
    /// - No sizes or no colors to pick from
    #[error("Invalid product {product_id}: {reason}")]
    InvalidProduct { product_id: String, reason: String },

    /// A review points at a product id that does not exist.
    #[error("Review {review_id} references unknown product '{product_id}'")]
    OrphanReview {
        review_id: String,
        product_id: String,
    },

    /// Star rating outside 1-5.
    #[error("Review {review_id} has rating {rating}, expected 1-5")]
    InvalidRating { review_id: String, rating: u8 },

    /// A seed date that does not exist on the calendar.
    #[error("Review {review_id} has an invalid date")]
    InvalidDate { review_id: String },
}

/// Convenience type alias for catalog results.
pub type CatalogResult<T> = Result<T, CatalogError>;

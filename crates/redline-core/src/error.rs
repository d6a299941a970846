//! # Error Types
//!
//! Domain-specific error types for redline-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  redline-core errors (this file)                                       │
//! │  ├── CoreError        - Domain rule violations                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  redline-catalog errors (separate crate)                               │
//! │  └── CatalogError     - Inconsistent static dataset                    │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart itself never fails: index misses are silent no-ops. Everything
//! here is raised by the layers that validate input before touching the cart.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Storefront domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id does not exist in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Requested quantity exceeds what is on hand.
    ///
    /// ## When This Occurs
    /// ```text
    /// Add to Cart (qty: 5)
    ///      │
    ///      ▼
    /// Stock 4, already 4 in cart
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: "rl-tee-001", available: 0, requested: 5 }
    /// ```
    #[error("Insufficient stock for {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        available: i64,
        requested: i64,
    },

    /// Coupon code did not match any active coupon.
    #[error("Invalid coupon code: {0}")]
    InvalidCoupon(String),

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur before any state changes, when a caller hands the command
/// layer a choice the product does not offer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is not in allowed set (e.g. a size the product isn't cut in).
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product_id: "rl-tee-001".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for rl-tee-001: available 3, requested 5"
        );
        assert_eq!(
            CoreError::InvalidCoupon("FREE".into()).to_string(),
            "Invalid coupon code: FREE"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::NotAllowed {
            field: "size".to_string(),
            allowed: vec!["S".to_string(), "M".to_string()],
        };
        assert_eq!(err.to_string(), r#"size must be one of: ["S", "M"]"#);
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "color".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}

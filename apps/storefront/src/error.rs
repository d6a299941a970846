//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Frontend                    Rust                                       │
//! │  ────────                    ────                                       │
//! │                                                                         │
//! │  addToCart(...)                                                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Unknown product? ── CoreError::ProductNotFound ───┐             │  │
//! │  │         │                                          │             │  │
//! │  │         ▼                                          ▼             │  │
//! │  │  Bad form? ────────── FieldErrors ─────────────── ApiError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ───────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  catch (e) {                                                            │
//! │    // e.code = "VALIDATION_ERROR"                                       │
//! │    // e.fields = { "email": "Enter a valid email address" }            │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use tracing::error;

use redline_catalog::CatalogError;
use redline_core::{CoreError, FieldErrors, ValidationError};

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVALID_COUPON",
///   "message": "Invalid coupon code: FREESTUFF"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Per-field messages for form validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Coupon code did not match
    InvalidCoupon,

    /// Not enough units on hand
    InsufficientStock,

    /// Cart operation failed (e.g. checkout with an empty cart)
    CartError,

    /// A submission of the same kind is already in flight
    Busy,

    /// Simulated payment was declined
    PaymentError,

    /// Internal error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            fields: None,
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }

    /// Creates a busy error for a submission already in flight.
    pub fn busy(what: &str) -> Self {
        ApiError::new(ErrorCode::Busy, format!("{} is already being submitted", what))
    }

    /// Creates a declined-payment error.
    pub fn payment(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::PaymentError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::InsufficientStock {
                product_id,
                available,
                requested,
            } => ApiError::new(
                ErrorCode::InsufficientStock,
                format!(
                    "Insufficient stock for {}: {} available, {} requested",
                    product_id, available, requested
                ),
            ),
            CoreError::InvalidCoupon(code) => ApiError::new(
                ErrorCode::InvalidCoupon,
                format!("Invalid coupon code: {}", code),
            ),
            CoreError::EmptyCart => ApiError::cart("Cart is empty"),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Form failures keep every field's message for display next to its input.
impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: "Please correct the highlighted fields".to_string(),
            fields: Some(errors.into_map()),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        // Log the actual error but return a generic message
        error!("Catalog failed to load: {}", err);
        ApiError::internal("Catalog unavailable")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors loading `config.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_codes() {
        let err = ApiError::from(CoreError::InvalidCoupon("FREESTUFF".into()));
        assert_eq!(err.code, ErrorCode::InvalidCoupon);
        assert_eq!(err.message, "Invalid coupon code: FREESTUFF");

        let err = ApiError::from(CoreError::ProductNotFound("rl-x".into()));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: rl-x");

        let err = ApiError::from(CoreError::EmptyCart);
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_field_errors_serialize_with_fields() {
        let mut fields = FieldErrors::new();
        fields.add("email", "Enter a valid email address");
        let json = serde_json::to_value(ApiError::from(fields)).unwrap();

        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["fields"]["email"], "Enter a valid email address");
    }

    #[test]
    fn test_plain_errors_omit_fields() {
        let json = serde_json::to_value(ApiError::busy("Order")).unwrap();
        assert_eq!(json["code"], "BUSY");
        assert_eq!(json["message"], "Order is already being submitted");
        assert!(json.get("fields").is_none());
    }
}

//! # Validation
//!
//! Input rules the command layer checks before it touches the cart.
//!
//! The cart store accepts anything it is handed. Callers validate first:
//! ```text
//! add_to_cart(id, qty, size, color)
//!      │
//!      ├── validate_quantity(qty)          qty > 0
//!      ├── validate_line_choice(...)       size/color offered, in stock
//!      │
//!      ▼
//! Cart::add_item(...)                      no checks
//! ```

use crate::error::ValidationError;
use crate::types::Product;

/// Longest search query the catalog accepts.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;

/// Convenience alias for validation results.
pub type ValidationResult<T = ()> = Result<T, ValidationError>;

/// Checks a quantity coming from a picker or a CLI flag.
pub fn validate_quantity(quantity: i64) -> ValidationResult {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Checks that a shopper's size/color/quantity choice is one the product
/// actually offers.
///
/// ```rust
/// # use redline_core::types::{ColorOption, Product};
/// # use redline_core::validation::validate_line_choice;
/// # let product = Product {
/// #     id: "rl-tee-001".into(), name: "Tee".into(), description: String::new(),
/// #     price_cents: 3999, original_price_cents: None, images: vec![],
/// #     category: "Car T-Shirts".into(), tags: vec![],
/// #     sizes: vec!["M".into()], colors: vec![ColorOption::new("Black", "#111")],
/// #     featured: false, best_seller: false, is_new: false, stock: 3,
/// # };
/// assert!(validate_line_choice(&product, "M", "Black", 1).is_ok());
/// assert!(validate_line_choice(&product, "XXL", "Black", 1).is_err());
/// ```
pub fn validate_line_choice(
    product: &Product,
    size: &str,
    color: &str,
    quantity: i64,
) -> ValidationResult {
    validate_quantity(quantity)?;

    if size.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "size".to_string(),
        });
    }
    if !product.has_size(size) {
        return Err(ValidationError::NotAllowed {
            field: "size".to_string(),
            allowed: product.sizes.clone(),
        });
    }

    if color.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "color".to_string(),
        });
    }
    if !product.has_color(color) {
        return Err(ValidationError::NotAllowed {
            field: "color".to_string(),
            allowed: product.color_names(),
        });
    }

    Ok(())
}

/// Normalizes a search query, returning the trimmed text.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: "query".to_string(),
        });
    }
    if trimmed.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColorOption;

    fn tee() -> Product {
        Product {
            id: "rl-tee-001".to_string(),
            name: "Redline Tee".to_string(),
            description: String::new(),
            price_cents: 3999,
            original_price_cents: None,
            images: Vec::new(),
            category: "Car T-Shirts".to_string(),
            tags: Vec::new(),
            sizes: vec!["S".into(), "M".into()],
            colors: vec![
                ColorOption::new("Black", "#111111"),
                ColorOption::new("White", "#ffffff"),
            ],
            featured: false,
            best_seller: false,
            is_new: false,
            stock: 5,
        }
    }

    #[test]
    fn test_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert_eq!(
            validate_quantity(0),
            Err(ValidationError::MustBePositive {
                field: "quantity".to_string()
            })
        );
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_line_choice() {
        let product = tee();
        assert!(validate_line_choice(&product, "S", "White", 2).is_ok());

        match validate_line_choice(&product, "XL", "Black", 1) {
            Err(ValidationError::NotAllowed { field, allowed }) => {
                assert_eq!(field, "size");
                assert_eq!(allowed, vec!["S".to_string(), "M".to_string()]);
            }
            other => panic!("expected NotAllowed, got {other:?}"),
        }

        assert!(matches!(
            validate_line_choice(&product, "M", "", 1),
            Err(ValidationError::Required { field }) if field == "color"
        ));
        assert!(matches!(
            validate_line_choice(&product, "M", "Red", 1),
            Err(ValidationError::NotAllowed { field, .. }) if field == "color"
        ));
        assert!(validate_line_choice(&product, "M", "Black", 0).is_err());
    }

    #[test]
    fn test_search_query() {
        assert_eq!(validate_search_query("  turbo ").unwrap(), "turbo");
        assert!(validate_search_query("   ").is_err());
        assert!(matches!(
            validate_search_query(&"x".repeat(101)),
            Err(ValidationError::TooLong { max: 100, .. })
        ));
    }
}

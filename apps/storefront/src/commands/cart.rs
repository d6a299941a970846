//! # Cart Commands
//!
//! Cart manipulation for the product page, the cart drawer and the cart page.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │   Form   │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                  │             │
//! │                   add_to_cart                        place_order        │
//! │                   update_cart_item                   (checkout.rs)      │
//! │                   remove_from_cart                        │             │
//! │                        │                                  │             │
//! │                        ▼                                  ▼             │
//! │                   clear_cart ────────────────────► (back to empty)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are addressed by position (what the cart page renders) or by
//! [`LineKey`] (product, size, color), which stays valid when an earlier
//! line is removed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use redline_catalog::Catalog;
use redline_core::validation::validate_line_choice;
use redline_core::{Cart, CartTotals, CoreError, LineKey};

use crate::error::ApiError;
use crate::state::{CartStore, StorefrontConfig};

/// One cart line as the cart page renders it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineDto {
    pub index: usize,
    pub key: LineKey,
    pub product_id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub size: String,
    pub color: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
    /// Upper bound for the line's quantity picker.
    pub max_quantity: i64,
}

/// Cart response including lines, totals and the change revision.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLineDto>,
    pub totals: CartTotals,
    pub subtotal_display: String,
    pub revision: u64,
}

impl CartResponse {
    fn build(cart: &Cart, revision: u64, config: &StorefrontConfig) -> Self {
        let lines = cart
            .lines()
            .iter()
            .enumerate()
            .map(|(index, line)| CartLineDto {
                index,
                key: line.key(),
                product_id: line.product.id.clone(),
                name: line.product.name.clone(),
                image_url: line.product.images.first().map(|p| config.asset_url(p)),
                size: line.size.clone(),
                color: line.color.clone(),
                quantity: line.quantity,
                unit_price_cents: line.product.price_cents,
                line_total_cents: line.line_total().cents(),
                max_quantity: line.product.stock,
            })
            .collect();
        let totals = CartTotals::from(cart);

        CartResponse {
            lines,
            subtotal_display: config.format_currency(totals.total_price_cents),
            totals,
            revision,
        }
    }
}

/// Add-to-cart request from the product page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
    #[serde(default)]
    pub quantity: Option<i64>,
    pub size: String,
    pub color: String,
}

/// Gets the current cart contents.
///
/// `invoke('get_cart') → { lines: [...], totals: {...}, revision }`
pub fn get_cart(cart: &CartStore, config: &StorefrontConfig) -> CartResponse {
    debug!("get_cart command");
    let revision = cart.snapshot().revision;
    cart.with_cart(|c| CartResponse::build(c, revision, config))
}

/// Adds a product to the cart.
///
/// ## Behavior
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  [ Add to Cart ] clicked (size M, color Black, qty 2)                   │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  1. Look up product                       unknown id → NOT_FOUND        │
/// │  2. Validate size / color / quantity      bad choice → VALIDATION_ERROR │
/// │  3. Button spinner (simulated delay)                                    │
/// │  4. Remaining = stock − units already in cart (any size/color)          │
/// │       remaining ≤ 0 → INSUFFICIENT_STOCK                                │
/// │       otherwise quantity clamped to remaining                           │
/// │  5. Same product+size+color merges, else new line                       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn add_to_cart(
    catalog: &Catalog,
    cart: &CartStore,
    config: &StorefrontConfig,
    request: AddToCartRequest,
) -> Result<CartResponse, ApiError> {
    let quantity = request.quantity.unwrap_or(1);
    debug!(
        product_id = %request.product_id,
        size = %request.size,
        color = %request.color,
        quantity = %quantity,
        "add_to_cart command"
    );

    let product = catalog
        .get_by_id(&request.product_id)
        .cloned()
        .ok_or_else(|| CoreError::ProductNotFound(request.product_id.clone()))?;

    validate_line_choice(&product, &request.size, &request.color, quantity)?;

    tokio::time::sleep(config.add_to_cart_delay()).await;

    // Stock is checked after the delay, under the cart lock. A rejection
    // leaves the cart untouched, so no revision is published.
    cart.with_cart_mut(|c| {
        let remaining = product.stock - c.quantity_of(&product.id);
        if remaining <= 0 {
            return Err(CoreError::InsufficientStock {
                product_id: product.id.clone(),
                available: remaining.max(0),
                requested: quantity,
            });
        }

        let added = quantity.min(remaining);
        if added < quantity {
            debug!(product_id = %product.id, requested = quantity, added, "Quantity clamped to stock");
        }
        c.add_item(product.clone(), added, request.size.as_str(), request.color.as_str());
        Ok(())
    })?;

    Ok(get_cart(cart, config))
}

/// Sets the quantity of the line at `index`.
///
/// The quantity is clamped into `1..=available`, where available is the
/// product's stock minus what other lines of the same product hold. An
/// index past the end leaves the cart unchanged.
pub fn update_cart_item(
    cart: &CartStore,
    config: &StorefrontConfig,
    index: usize,
    quantity: i64,
) -> CartResponse {
    debug!(index, quantity = %quantity, "update_cart_item command");

    cart.with_cart_mut(|c| {
        if let Some(clamped) = clamp_line_quantity(c, index, quantity) {
            c.update_quantity(index, clamped);
        }
    });

    get_cart(cart, config)
}

/// Keyed variant of [`update_cart_item`].
pub fn update_cart_line(
    cart: &CartStore,
    config: &StorefrontConfig,
    key: &LineKey,
    quantity: i64,
) -> CartResponse {
    debug!(product_id = %key.product_id, size = %key.size, color = %key.color, quantity = %quantity, "update_cart_line command");

    cart.with_cart_mut(|c| {
        if let Some(index) = c.position(key) {
            if let Some(clamped) = clamp_line_quantity(c, index, quantity) {
                c.update_quantity(index, clamped);
            }
        }
    });

    get_cart(cart, config)
}

fn clamp_line_quantity(cart: &Cart, index: usize, quantity: i64) -> Option<i64> {
    let line = cart.line(index)?;
    let held_elsewhere = cart.quantity_of(&line.product.id) - line.quantity;
    let available = line.product.stock - held_elsewhere;
    Some(quantity.clamp(1, available.max(1)))
}

/// Removes the line at `index`. An index past the end is a no-op.
pub fn remove_from_cart(cart: &CartStore, config: &StorefrontConfig, index: usize) -> CartResponse {
    debug!(index, "remove_from_cart command");
    cart.with_cart_mut(|c| {
        c.remove_item(index);
    });
    get_cart(cart, config)
}

/// Keyed variant of [`remove_from_cart`].
pub fn remove_cart_line(cart: &CartStore, config: &StorefrontConfig, key: &LineKey) -> CartResponse {
    debug!(product_id = %key.product_id, size = %key.size, color = %key.color, "remove_cart_line command");
    cart.with_cart_mut(|c| {
        c.remove_by_key(key);
    });
    get_cart(cart, config)
}

/// Clears all lines from the cart.
pub fn clear_cart(cart: &CartStore, config: &StorefrontConfig) -> CartResponse {
    debug!("clear_cart command");
    cart.with_cart_mut(|c| c.clear());
    get_cart(cart, config)
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Cart
//!
//! The in-memory cart: a list of line items and the totals derived from them.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Operations                                 │
//! │                                                                         │
//! │  add_item(A, 2, M, Black) ──► no (A, M, Black) line? → push new line    │
//! │  add_item(A, 3, M, Black) ──► line exists           → quantity += 3     │
//! │  add_item(A, 1, L, Black) ──► different size        → push new line     │
//! │                                                                         │
//! │  update_quantity(i, n) ─────► lines[i].quantity = n  (miss → no-op)     │
//! │  remove_item(i) ────────────► lines.remove(i)        (miss → no-op)     │
//! │  clear() ───────────────────► lines = []                                │
//! │                                                                         │
//! │  total_items() = Σ quantity            (derived on every call)          │
//! │  total_price() = Σ price × quantity    (uses the product's live price)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - A line's (product id, size, color) triple is unique within the cart.
//! - The cart never mutates product data; lines share the product by `Arc`.
//! - Quantity and stock bounds are the caller's job. The cart trusts them.
//!
//! Positional indices shift after a removal, so a caller holding an old index
//! can silently hit the wrong line or nothing at all. The `*_by_key` variants
//! address lines by [`LineKey`] instead.

use std::sync::Arc;

use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Line Key
// =============================================================================

/// The identity of a cart line: product, size and color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineKey {
    pub product_id: String,
    pub size: String,
    pub color: String,
}

impl LineKey {
    pub fn new(
        product_id: impl Into<String>,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        LineKey {
            product_id: product_id.into(),
            size: size.into(),
            color: color.into(),
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One line in the cart.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// The product, shared with the catalog.
    pub product: Arc<Product>,

    /// Units of this product/size/color.
    pub quantity: i64,

    /// Chosen size.
    pub size: String,

    /// Chosen color name.
    pub color: String,
}

impl CartLine {
    /// Checks whether this line is the given product/size/color.
    pub fn matches(&self, product_id: &str, size: &str, color: &str) -> bool {
        self.product.id == product_id && self.size == size && self.color == color
    }

    /// Returns this line's identity.
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product.id.clone(), self.size.clone(), self.color.clone())
    }

    /// Current unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds `quantity` of a product in a size/color.
    ///
    /// ## Behavior
    /// - Line with the same (product id, size, color) exists: its quantity
    ///   grows by `quantity`.
    /// - Otherwise a new line is appended.
    ///
    /// Size, color, quantity and stock are not checked here.
    ///
    /// ## Returns
    /// The index of the line that now holds the product.
    pub fn add_item(
        &mut self,
        product: Arc<Product>,
        quantity: i64,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> usize {
        let size = size.into();
        let color = color.into();

        if let Some(index) = self
            .lines
            .iter()
            .position(|line| line.matches(&product.id, &size, &color))
        {
            self.lines[index].quantity += quantity;
            return index;
        }

        self.lines.push(CartLine {
            product,
            quantity,
            size,
            color,
        });
        self.lines.len() - 1
    }

    /// Removes the line at `index`.
    ///
    /// An out-of-range index leaves the cart unchanged and returns `None`.
    pub fn remove_item(&mut self, index: usize) -> Option<CartLine> {
        if index < self.lines.len() {
            Some(self.lines.remove(index))
        } else {
            None
        }
    }

    /// Overwrites the quantity of the line at `index`.
    ///
    /// No bounds are applied to `quantity`. Returns `false` (and changes
    /// nothing) if there is no line at `index`.
    pub fn update_quantity(&mut self, index: usize, quantity: i64) -> bool {
        match self.lines.get_mut(index) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Finds the current index of a line by its identity.
    pub fn position(&self, key: &LineKey) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.matches(&key.product_id, &key.size, &key.color))
    }

    /// Removes a line by its identity.
    pub fn remove_by_key(&mut self, key: &LineKey) -> Option<CartLine> {
        let index = self.position(key)?;
        self.remove_item(index)
    }

    /// Overwrites the quantity of a line by its identity.
    pub fn update_quantity_by_key(&mut self, key: &LineKey, quantity: i64) -> bool {
        match self.position(key) {
            Some(index) => self.update_quantity(index, quantity),
            None => false,
        }
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of `price × quantity` across all lines, at current prices.
    pub fn total_price(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Quantity already in the cart for a product, across sizes and colors.
    ///
    /// The command layer uses this to keep adds within stock.
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.lines
            .iter()
            .filter(|line| line.product.id == product_id)
            .map(|line| line.quantity)
            .sum()
    }

    /// Line items in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns the line at `index`.
    pub fn line(&self, index: usize) -> Option<&CartLine> {
        self.lines.get(index)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary for responses and change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_items: i64,
    pub total_price_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.len(),
            total_items: cart.total_items(),
            total_price_cents: cart.total_price().cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColorOption;

    fn product(id: &str, price_cents: i64) -> Arc<Product> {
        Arc::new(Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            description: String::new(),
            price_cents,
            original_price_cents: None,
            images: Vec::new(),
            category: "Car T-Shirts".to_string(),
            tags: Vec::new(),
            sizes: vec!["S".into(), "M".into(), "L".into()],
            colors: vec![
                ColorOption::new("Black", "#111111"),
                ColorOption::new("White", "#ffffff"),
            ],
            featured: false,
            best_seller: false,
            is_new: false,
            stock: 50,
        })
    }

    fn assert_totals_consistent(cart: &Cart) {
        let items: i64 = cart.lines().iter().map(|l| l.quantity).sum();
        let price: i64 = cart
            .lines()
            .iter()
            .map(|l| l.product.price_cents * l.quantity)
            .sum();
        assert_eq!(cart.total_items(), items);
        assert_eq!(cart.total_price().cents(), price);
    }

    #[test]
    fn test_repeated_add_merges_into_one_line() {
        let mut cart = Cart::new();
        let a = product("A", 4000);

        cart.add_item(a.clone(), 2, "M", "Black");
        cart.add_item(a.clone(), 3, "M", "Black");

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.total_price(), a.price() * 5);
    }

    #[test]
    fn test_merge_sums_every_add() {
        let mut cart = Cart::new();
        let a = product("A", 1500);
        let quantities = [1, 4, 2, 7, 1];

        for qty in quantities {
            cart.add_item(a.clone(), qty, "L", "White");
        }

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), quantities.iter().sum::<i64>());
    }

    #[test]
    fn test_different_size_or_color_is_a_new_line() {
        let mut cart = Cart::new();
        let a = product("A", 4000);

        assert_eq!(cart.add_item(a.clone(), 1, "M", "Black"), 0);
        assert_eq!(cart.add_item(a.clone(), 1, "L", "Black"), 1);
        assert_eq!(cart.add_item(a.clone(), 1, "M", "White"), 2);
        assert_eq!(cart.add_item(a, 1, "M", "Black"), 0);

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.total_items(), 4);
    }

    #[test]
    fn test_same_size_color_on_other_product_is_a_new_line() {
        let mut cart = Cart::new();
        cart.add_item(product("A", 4000), 1, "M", "Black");
        cart.add_item(product("B", 6000), 1, "M", "Black");
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_totals_stay_consistent_across_mutations() {
        let mut cart = Cart::new();
        let a = product("A", 3999);
        let b = product("B", 2499);

        cart.add_item(a.clone(), 2, "S", "Black");
        assert_totals_consistent(&cart);
        cart.add_item(b.clone(), 1, "M", "White");
        assert_totals_consistent(&cart);
        cart.update_quantity(1, 6);
        assert_totals_consistent(&cart);
        cart.add_item(a, 1, "S", "Black");
        assert_totals_consistent(&cart);
        cart.remove_item(0);
        assert_totals_consistent(&cart);

        assert_eq!(cart.total_items(), 6);
        assert_eq!(cart.total_price().cents(), 6 * 2499);
    }

    #[test]
    fn test_clear_always_zeroes_totals() {
        let mut cart = Cart::new();
        cart.clear();
        assert_eq!(cart.total_items(), 0);

        cart.add_item(product("A", 4000), 2, "M", "Black");
        cart.add_item(product("B", 6000), 9, "L", "White");
        cart.clear();
        assert_eq!(cart.total_items(), 0);
        assert!(cart.total_price().is_zero());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_out_of_range_index_is_a_no_op() {
        let mut cart = Cart::new();
        cart.add_item(product("A", 4000), 2, "M", "Black");

        assert!(cart.remove_item(5).is_none());
        assert!(!cart.update_quantity(1, 9));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_update_quantity_is_unbounded() {
        let mut cart = Cart::new();
        cart.add_item(product("A", 100), 1, "M", "Black");

        assert!(cart.update_quantity(0, 0));
        assert_eq!(cart.total_items(), 0);
        assert!(cart.update_quantity(0, 10_000));
        assert_eq!(cart.total_items(), 10_000);
    }

    #[test]
    fn test_stale_index_hits_shifted_line() {
        let mut cart = Cart::new();
        cart.add_item(product("A", 100), 1, "M", "Black");
        cart.add_item(product("B", 200), 1, "M", "Black");
        cart.add_item(product("C", 300), 1, "M", "Black");

        // Caller remembered C at index 2, but B was removed first
        cart.remove_item(1);
        assert!(cart.remove_item(2).is_none());
        assert_eq!(cart.len(), 2);

        let key = LineKey::new("C", "M", "Black");
        assert_eq!(cart.position(&key), Some(1));
        assert!(cart.remove_by_key(&key).is_some());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_keyed_update() {
        let mut cart = Cart::new();
        cart.add_item(product("A", 100), 1, "S", "White");
        let key = cart.lines()[0].key();

        assert!(cart.update_quantity_by_key(&key, 4));
        assert_eq!(cart.total_items(), 4);
        assert!(!cart.update_quantity_by_key(&LineKey::new("A", "XL", "White"), 4));
    }

    #[test]
    fn test_quantity_of_spans_variants() {
        let mut cart = Cart::new();
        let a = product("A", 100);
        cart.add_item(a.clone(), 2, "S", "Black");
        cart.add_item(a, 3, "M", "White");
        cart.add_item(product("B", 100), 7, "M", "White");

        assert_eq!(cart.quantity_of("A"), 5);
        assert_eq!(cart.quantity_of("Z"), 0);
    }

    #[test]
    fn test_cart_totals_summary() {
        let mut cart = Cart::new();
        cart.add_item(product("A", 4000), 2, "M", "Black");
        cart.add_item(product("B", 6000), 1, "M", "Black");

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_items, 3);
        assert_eq!(totals.total_price_cents, 14000);
    }
}

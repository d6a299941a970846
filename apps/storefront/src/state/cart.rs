//! # Cart Store
//!
//! The session's cart, shared by every command, with change notification.
//!
//! ## Thread Safety
//! The cart sits behind a `Mutex` because:
//! 1. Several commands read and modify it
//! 2. Only one mutation may run at a time
//! 3. The simulated add-to-cart delay runs on the async runtime
//!
//! The lock is never held across an `.await`.
//!
//! ## Change Notification
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Shopper Action          Command               Store Change             │
//! │  ──────────────          ───────               ────────────             │
//! │                                                                         │
//! │  Add to Cart ──────────► add_to_cart() ──────► with_cart_mut(add_item)  │
//! │  Change Quantity ──────► update_cart_item() ─► with_cart_mut(update)    │
//! │  Click Remove ─────────► remove_from_cart() ─► with_cart_mut(remove)    │
//! │  Order placed ─────────► place_order() ──────► with_cart_mut(clear)     │
//! │                                                                         │
//! │  with_cart_mut that changed a line:                                     │
//! │    revision += 1 ──► watch channel ──► header badge, cart drawer, ...   │
//! │  No-ops and rejected mutations publish nothing.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use redline_core::{Cart, CartTotals, LineKey};

/// What subscribers see after each mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Bumped once per `with_cart_mut` call that changed the cart.
    pub revision: u64,
    pub totals: CartTotals,
}

/// The shared cart.
#[derive(Debug)]
pub struct CartStore {
    cart: Mutex<Cart>,
    changes: watch::Sender<CartSnapshot>,
}

impl CartStore {
    /// Creates a new empty cart store at revision 0.
    pub fn new() -> Self {
        let (changes, _) = watch::channel(CartSnapshot::default());
        CartStore {
            cart: Mutex::new(Cart::new()),
            changes,
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// # use redline_storefront::state::CartStore;
    /// # use redline_core::CartTotals;
    /// let store = CartStore::new();
    /// let totals = store.with_cart(|cart| CartTotals::from(cart));
    /// assert_eq!(totals.total_items, 0);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart, then notifies
    /// subscribers if any line was added, removed or requantified.
    ///
    /// The snapshot is published while the lock is still held, so revisions
    /// reach subscribers in mutation order.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        let before = line_state(&cart);
        let result = f(&mut cart);

        if line_state(&cart) == before {
            return result;
        }

        let snapshot = CartSnapshot {
            revision: self.changes.borrow().revision + 1,
            totals: CartTotals::from(&*cart),
        };
        debug!(revision = snapshot.revision, items = snapshot.totals.total_items, "Cart changed");
        self.changes.send_replace(snapshot);

        result
    }

    /// Subscribes to cart changes. The receiver starts at the current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.changes.subscribe()
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> CartSnapshot {
        *self.changes.borrow()
    }
}

/// Line identities and quantities, in cart order.
fn line_state(cart: &Cart) -> Vec<(LineKey, i64)> {
    cart.lines()
        .iter()
        .map(|line| (line.key(), line.quantity))
        .collect()
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

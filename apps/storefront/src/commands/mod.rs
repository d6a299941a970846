//! # Storefront Commands
//!
//! Every operation the storefront pages invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Listing, filtering, product page, search
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── checkout.rs  ◄─── Coupons, order summary, place order
//! └── contact.rs   ◄─── Contact form submission
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Page event (click, form submit)                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  async fn add_to_cart(                                                  │
//! │      catalog: &Catalog,          ◄── read-only, built once              │
//! │      cart: &CartStore,           ◄── the session's cart                 │
//! │      config: &StorefrontConfig,  ◄── delays, pricing, base path         │
//! │      request: AddToCartRequest,  ◄── from the page                      │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  Page receives: CartResponse or { code, message, fields? }              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! fn list_products(catalog: &Catalog, config: &StorefrontConfig, criteria: FilterCriteria)
//!
//! // Only needs the cart
//! fn get_cart(cart: &CartStore, config: &StorefrontConfig)
//!
//! // Cart and checkout
//! async fn place_order(cart: &CartStore, checkout: &CheckoutState, config: &StorefrontConfig, form: CheckoutForm)
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod contact;

//! # Redline Storefront Library
//!
//! Session state and commands for the Redline Apparel storefront. The `redline`
//! binary drives these from the command line; a web shell links the same
//! library and forwards page events to [`commands`].
//!
//! ## Module Organization
//! ```text
//! redline_storefront/
//! ├── lib.rs          ◄─── You are here (Storefront context, tracing)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart store + change notifications
//! │   ├── checkout.rs ◄─── Applied coupon, order submission
//! │   ├── contact.rs  ◄─── Contact form submission
//! │   ├── config.rs   ◄─── StorefrontConfig (file + env)
//! │   └── submission.rs ◄─ Idle/Pending/Succeeded/Failed tracker
//! ├── commands/
//! │   ├── catalog.rs  ◄─── Listing, product page, search
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── checkout.rs ◄─── Coupons, summary, place order
//! │   └── contact.rs  ◄─── Send message
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Session Context
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storefront                                           │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │   Catalog    │ │  CartStore   │ │CheckoutState │ │ ContactState │   │
//! │  │  &'static    │ │              │ │              │ │              │   │
//! │  │  (built once)│ │  per session │ │  per session │ │  per session │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  StorefrontConfig: loaded once, read-only afterwards                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The context only owns the pieces. Commands borrow the ones they need.

pub mod commands;
pub mod error;
pub mod state;

use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use redline_catalog::{Catalog, CatalogResult};

use state::{CartStore, CheckoutState, ContactState, StorefrontConfig};

/// Everything one shopping session works with.
#[derive(Debug)]
pub struct Storefront {
    pub catalog: &'static Catalog,
    pub config: StorefrontConfig,
    pub cart: CartStore,
    pub checkout: CheckoutState,
    pub contact: ContactState,
}

impl Storefront {
    /// Creates a session over the built-in catalog.
    pub fn new(config: StorefrontConfig) -> CatalogResult<Self> {
        let catalog = Catalog::builtin()?;
        info!(
            store = %config.store.name,
            products = catalog.count(),
            categories = catalog.categories().len(),
            "Storefront ready"
        );
        Ok(Self::with_catalog(catalog, config))
    }

    pub fn with_catalog(catalog: &'static Catalog, config: StorefrontConfig) -> Self {
        Storefront {
            catalog,
            config,
            cart: CartStore::new(),
            checkout: CheckoutState::new(),
            contact: ContactState::new(),
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=redline=trace` - Show trace for redline crates only
/// - Default: INFO, DEBUG for redline crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,redline=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .with_writer(std::io::stderr)
        .init();
}

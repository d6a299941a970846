//! # redline-catalog: Static Catalog for the Redline Storefront
//!
//! The storefront has no backend. Its products, categories and reviews are
//! compiled into the binary and served through a read-only [`Catalog`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Redline Storefront Data Flow                       │
//! │                                                                         │
//! │  Command (list_products, get_product, add_to_cart)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                redline-catalog (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │    data.rs    │    │  catalog.rs   │    │   error.rs   │   │   │
//! │  │   │               │    │               │    │              │   │   │
//! │  │   │ seed tables   │───►│ Catalog       │    │ CatalogError │   │   │
//! │  │   │ (products,    │    │ lookup/search │    │              │   │   │
//! │  │   │  reviews)     │    │ reviews       │    │              │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  redline_core::filter::apply ── category / price / size / color / sort  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use redline_catalog::Catalog;
//! use redline_core::filter::{self, FilterCriteria};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let criteria = FilterCriteria::default().with_category("Hoodies");
//! let hoodies = filter::apply(catalog.products().iter().map(|p| p.as_ref()), &criteria);
//! assert_eq!(hoodies.len(), 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod data;
pub mod error;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{Catalog, CategoryCount};
pub use error::{CatalogError, CatalogResult};

//! # State Module
//!
//! Session state for the storefront, one type per concern.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐  │
//! │  │  CartStore   │  │CheckoutState │  │ ContactState │  │ Storefront │  │
//! │  │              │  │              │  │              │  │   Config   │  │
//! │  │  Mutex<Cart> │  │ Mutex<Option │  │ Submission   │  │            │  │
//! │  │  + watch     │  │   <Coupon>>  │  │  Tracker     │  │ read-only  │  │
//! │  │  revisions   │  │ + Submission │  │              │  │            │  │
//! │  │              │  │   Tracker    │  │              │  │            │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartStore: Mutex for exclusive access, watch for subscribers        │
//! │  • CheckoutState / ContactState: watch channels + a small Mutex        │
//! │  • StorefrontConfig: Read-only after initialization                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands take only the state they need.

mod cart;
mod checkout;
mod config;
mod contact;
mod submission;

pub use cart::{CartSnapshot, CartStore};
pub use checkout::{CheckoutState, OrderConfirmation, OrderLine};
pub use config::{FilterSettings, SimulationSettings, StoreSettings, StorefrontConfig};
pub use contact::{ContactState, MessageReceipt};
pub use submission::{SubmissionStatus, SubmissionTracker};

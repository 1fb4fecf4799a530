//! Storefront domain logic for Kiosk.
//!
//! This crate is the state-and-rules core of the storefront: how persisted
//! identifiers become priced cart lines, how preference validation gates
//! which filters are active, and how a budget constraint gates cart mutation.
//!
//! - **Catalog**: item types shared by every engine
//! - **Cart**: the durable id sequence, priced lines, totals
//! - **Preferences**: defaults, load-time normalization, validation
//! - **View**: preference-driven filtering and sorting, text search, and the
//!   budget admission gate
//! - **Form**: view-state reducer for the preferences form
//!
//! Rendering and navigation live outside this crate; the engines hand the
//! presentation layer plain values (`CartLine`, `Admission`, `PrefsErrors`)
//! and take their durability from a [`kiosk_store::KvStore`].
//!
//! # Example
//!
//! ```rust,ignore
//! use kiosk_commerce::prelude::*;
//! use kiosk_store::MemoryStore;
//!
//! let store = MemoryStore::new();
//! let cart = CartStore::new(store.clone());
//! let prefs = PrefsStore::new(store).load();
//!
//! let admission = can_admit_to_cart(&catalog, &cart.ids(), ItemId::new(2), &prefs);
//! if admission.admitted {
//!     cart.add_one(ItemId::new(2))?;
//! }
//! ```

pub mod cart;
pub mod catalog;
pub mod form;
pub mod prefs;
pub mod view;

pub use cart::{build_lines, cart_total, CartLine, CartStore, CART_KEY};
pub use catalog::{find_item, format_eur, CatalogItem, ItemId};
pub use form::{parse_budget, PrefsForm};
pub use prefs::{
    validate, BudgetInput, Preferences, PrefsDraft, PrefsErrors, PrefsStore, SortDir, SortKey,
    PREFS_KEY,
};
pub use view::{apply_preferences, can_admit_to_cart, search_catalog, Admission};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{build_lines, cart_total, CartLine, CartStore};
    pub use crate::catalog::{find_item, format_eur, CatalogItem, ItemId};
    pub use crate::form::{parse_budget, PrefsForm};
    pub use crate::prefs::{
        validate, BudgetInput, Preferences, PrefsDraft, PrefsErrors, PrefsStore, SortDir, SortKey,
    };
    pub use crate::view::{apply_preferences, can_admit_to_cart, search_catalog, Admission};
}

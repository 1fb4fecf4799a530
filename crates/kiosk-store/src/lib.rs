//! Durable key-value storage for the Kiosk storefront.
//!
//! The storefront engines treat persistence as a single opaque string store:
//! `get` a value by key, `set` a value by key, nothing else. This crate
//! provides that contract plus two backends: an in-memory store for tests
//! and ephemeral runs, and a file-backed store that survives across runs.
//!
//! # Example
//!
//! ```rust,ignore
//! use kiosk_store::{FileStore, KvStore};
//!
//! let store = FileStore::open("kiosk-store.json")?;
//! store.set("cart_ids", "[2,2,5]")?;
//! let raw = store.get("cart_ids")?;
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use kv::KvStore;
pub use memory::MemoryStore;

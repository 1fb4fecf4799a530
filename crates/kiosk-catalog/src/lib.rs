//! Catalog delivery for the kiosk: fetch a session snapshot and hold it
//! for the rest of the run.
//!
//! This crate provides:
//! - `CatalogSource` - Async snapshot provider trait
//! - `HttpCatalog` - Source backed by an HTTP JSON endpoint
//! - `FileCatalog` - Source backed by a local JSON file
//! - `CatalogCache` - Caller-owned fetch-once wrapper
//! - `CatalogError` - Typed fetch failures

mod cache;
mod error;
mod source;

pub use cache::*;
pub use error::*;
pub use source::*;

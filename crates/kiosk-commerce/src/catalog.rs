//! Catalog item types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a catalog session.
///
/// A newtype over the raw integer so session ids never mix with prices or
/// quantities. Serialized transparently: a persisted cart is a plain JSON
/// array of integers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Create an id from its raw value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A sellable session in the catalog.
///
/// Sourced externally and immutable here; `id` is unique within a catalog
/// snapshot. Prices are whole euros.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    /// Unique item identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Longer description shown on the expanded card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price in whole euros.
    pub price: i64,
}

impl CatalogItem {
    /// Create an item.
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, price: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            price,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Find an item by id within a catalog snapshot.
pub fn find_item(catalog: &[CatalogItem], id: ItemId) -> Option<&CatalogItem> {
    catalog.iter().find(|item| item.id == id)
}

/// Format a whole-euro amount for display (e.g. "120 €").
pub fn format_eur(amount: i64) -> String {
    format!("{} \u{20ac}", amount)
}

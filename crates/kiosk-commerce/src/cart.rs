//! Cart engine: the durable id sequence and its priced derivations.
//!
//! The persisted cart is an ordered JSON array of item ids where a repeated
//! id means quantity > 1: `[2,2,5]` is two units of session 2 and one of
//! session 5. The array is the entire durable representation; priced lines
//! are recomputed from it on every read and never stored.

use std::collections::BTreeMap;

use kiosk_store::{KvStore, StoreError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{find_item, CatalogItem, ItemId};

/// Key the cart id sequence is stored under.
pub const CART_KEY: &str = "cart_ids";

/// A priced cart line derived from the id sequence and a catalog snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Item identifier.
    pub id: ItemId,
    /// Display name, denormalized from the catalog.
    pub name: String,
    /// Unit price in whole euros.
    pub price: i64,
    /// Units of this item in the cart.
    pub qty: i64,
    /// `price × qty`.
    pub subtotal: i64,
}

/// Cart engine over a durable store.
///
/// Owns the persisted id sequence exclusively. Reads never fail; missing or
/// malformed storage collapses to the empty sequence. Each mutation performs
/// exactly one durable write and propagates store failures.
///
/// `add_one` and `remove_one` are read-modify-write sequences with no
/// compare-and-swap underneath; callers on genuinely concurrent paths must
/// serialize them externally.
#[derive(Debug, Clone)]
pub struct CartStore<S> {
    store: S,
}

impl<S: KvStore> CartStore<S> {
    /// Create a cart engine over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read the persisted id sequence.
    ///
    /// Returns the empty sequence when the key is absent, the stored value
    /// is not a JSON array of non-negative integers, or the store read
    /// itself fails.
    pub fn ids(&self) -> Vec<ItemId> {
        let raw = match self.store.get(CART_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                debug!(error = %e, "cart read failed, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<ItemId>>(&raw) {
            Ok(ids) => ids,
            Err(e) => {
                debug!(error = %e, "malformed cart state, treating as empty");
                Vec::new()
            }
        }
    }

    /// Append one unit of `id` and persist.
    ///
    /// No existence check against any catalog: an id no snapshot knows is
    /// legal and simply never materializes as a line.
    pub fn add_one(&self, id: ItemId) -> Result<(), StoreError> {
        let mut ids = self.ids();
        ids.push(id);
        self.write(&ids)
    }

    /// Remove the first occurrence of `id` found from the start.
    ///
    /// Exactly one unit per call; a no-op (and no write) when the id is
    /// absent. Returns whether a unit was removed.
    pub fn remove_one(&self, id: ItemId) -> Result<bool, StoreError> {
        let mut ids = self.ids();
        match ids.iter().position(|&i| i == id) {
            Some(idx) => {
                ids.remove(idx);
                self.write(&ids)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Reset the cart to the empty sequence.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.write(&[])
    }

    /// Total unit count: the sequence length, not the distinct-id count.
    pub fn count(&self) -> usize {
        self.ids().len()
    }

    fn write(&self, ids: &[ItemId]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(ids)?;
        self.store.set(CART_KEY, &raw)
    }
}

/// Group an id sequence into priced lines against a catalog snapshot.
///
/// Repeated ids become quantities; ids absent from the catalog are silently
/// dropped; lines come out in ascending id order regardless of insertion
/// order. Pure and deterministic for a given `(ids, catalog)` pair.
pub fn build_lines(ids: &[ItemId], catalog: &[CatalogItem]) -> Vec<CartLine> {
    let mut counts: BTreeMap<ItemId, i64> = BTreeMap::new();
    for &id in ids {
        *counts.entry(id).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .filter_map(|(id, qty)| {
            let item = find_item(catalog, id)?;
            Some(CartLine {
                id,
                name: item.name.clone(),
                price: item.price,
                qty,
                subtotal: item.price.saturating_mul(qty),
            })
        })
        .collect()
}

/// Sum of line subtotals; zero for an empty cart.
pub fn cart_total(lines: &[CartLine]) -> i64 {
    lines.iter().fold(0, |acc, line| acc.saturating_add(line.subtotal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_store::MemoryStore;

    fn catalog() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new(2u64, "Studio Hour", 10),
            CatalogItem::new(5u64, "Dusk Walk", 20),
        ]
    }

    fn cart_with(ids: &[u64]) -> CartStore<MemoryStore> {
        let cart = CartStore::new(MemoryStore::new());
        for &id in ids {
            cart.add_one(ItemId::new(id)).unwrap();
        }
        cart
    }

    fn raw_ids(cart: &CartStore<MemoryStore>) -> Vec<u64> {
        cart.ids().iter().map(ItemId::get).collect()
    }

    #[test]
    fn test_empty_store_reads_empty() {
        let cart = CartStore::new(MemoryStore::new());
        assert!(cart.ids().is_empty());
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_add_appends_duplicates() {
        let cart = cart_with(&[2, 2, 5]);
        assert_eq!(raw_ids(&cart), vec![2, 2, 5]);
        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn test_remove_one_takes_first_occurrence_only() {
        let cart = cart_with(&[2, 2, 5]);
        assert!(cart.remove_one(ItemId::new(2)).unwrap());
        assert_eq!(raw_ids(&cart), vec![2, 5]);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let cart = cart_with(&[2, 5]);
        assert!(!cart.remove_one(ItemId::new(99)).unwrap());
        assert_eq!(raw_ids(&cart), vec![2, 5]);
    }

    #[test]
    fn test_clear_then_ids_is_empty() {
        let cart = cart_with(&[2, 2, 5]);
        cart.clear().unwrap();
        assert!(cart.ids().is_empty());

        // Idempotent regardless of prior state.
        cart.clear().unwrap();
        assert!(cart.ids().is_empty());
    }

    #[test]
    fn test_malformed_storage_collapses_to_empty() {
        for bad in [
            "definitely not json",
            r#"{"a":1}"#,
            "42",
            r#"[1,"two"]"#,
            "[1,-2]",
            "[1.5]",
        ] {
            let store = MemoryStore::new();
            store.set(CART_KEY, bad).unwrap();
            let cart = CartStore::new(store);
            assert!(cart.ids().is_empty(), "expected empty for {bad:?}");
        }
    }

    #[test]
    fn test_add_after_corrupt_state_starts_fresh() {
        let store = MemoryStore::new();
        store.set(CART_KEY, "not an array").unwrap();
        let cart = CartStore::new(store);
        cart.add_one(ItemId::new(3)).unwrap();
        assert_eq!(raw_ids(&cart), vec![3]);
    }

    #[test]
    fn test_build_lines_groups_and_prices() {
        let ids = [ItemId::new(2), ItemId::new(2), ItemId::new(5)];
        let lines = build_lines(&ids, &catalog());

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].id, ItemId::new(2));
        assert_eq!(lines[0].qty, 2);
        assert_eq!(lines[0].subtotal, 20);
        assert_eq!(lines[1].id, ItemId::new(5));
        assert_eq!(lines[1].qty, 1);
        assert_eq!(lines[1].subtotal, 20);
        assert_eq!(cart_total(&lines), 40);
    }

    #[test]
    fn test_build_lines_drops_unknown_ids() {
        let ids = [ItemId::new(2), ItemId::new(99)];
        let lines = build_lines(&ids, &catalog());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, ItemId::new(2));
    }

    #[test]
    fn test_build_lines_sorts_by_id_regardless_of_insertion() {
        let ids = [ItemId::new(5), ItemId::new(2), ItemId::new(5)];
        let lines = build_lines(&ids, &catalog());
        assert_eq!(lines[0].id, ItemId::new(2));
        assert_eq!(lines[1].id, ItemId::new(5));
        assert_eq!(lines[1].qty, 2);
    }

    #[test]
    fn test_total_of_no_lines_is_zero() {
        assert_eq!(cart_total(&[]), 0);
    }
}

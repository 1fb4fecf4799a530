//! Derived views over a catalog snapshot: filtering, ordering, search, and
//! the cart admission check.
//!
//! Everything here is pure. The functions take the catalog and state by
//! reference and return fresh values; nothing touches the store.

use serde::Serialize;

use crate::cart::{build_lines, cart_total};
use crate::catalog::{find_item, format_eur, CatalogItem, ItemId};
use crate::prefs::{Preferences, SortDir, SortKey};

/// Project a catalog snapshot through the visitor's preferences.
///
/// Filters first, then orders. The under-budget filter only engages while
/// both the checkbox is on and [`Preferences::active_budget`] yields an
/// amount; a stale checkbox over a cleared budget filters nothing. Items
/// priced exactly at the budget survive the filter.
///
/// Sorting is stable, so items that compare equal keep their catalog order.
pub fn apply_preferences(catalog: &[CatalogItem], prefs: &Preferences) -> Vec<CatalogItem> {
    let mut items: Vec<CatalogItem> = match (prefs.filter_under_budget, prefs.active_budget()) {
        (true, Some(budget)) => catalog
            .iter()
            .filter(|item| item.price <= budget)
            .cloned()
            .collect(),
        _ => catalog.to_vec(),
    };

    items.sort_by(|a, b| {
        let ord = match prefs.sort_key {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Price => a.price.cmp(&b.price),
        };
        match prefs.sort_dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    });

    items
}

/// Case-insensitive substring search over names and descriptions.
///
/// A blank query matches everything.
pub fn search_catalog(catalog: &[CatalogItem], query: &str) -> Vec<CatalogItem> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return catalog.to_vec();
    }

    catalog
        .iter()
        .filter(|item| {
            item.name.to_lowercase().contains(&needle)
                || item
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Outcome of a cart admission check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Admission {
    /// Whether the item may be added.
    pub admitted: bool,
    /// Human-readable refusal, present on rejection only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Admission {
    pub fn granted() -> Self {
        Self {
            admitted: true,
            reason: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            admitted: false,
            reason: Some(reason.into()),
        }
    }
}

/// Decide whether adding `candidate` keeps the cart within budget.
///
/// Projects the current cart total against the catalog, adds the
/// candidate's price, and compares the projection to the active budget.
/// Landing exactly on the budget is admitted; only exceeding it is
/// refused. With no active budget every known item is admitted.
///
/// Advisory only: callers enforce the verdict before mutating the cart,
/// the check itself writes nothing.
pub fn can_admit_to_cart(
    catalog: &[CatalogItem],
    current_ids: &[ItemId],
    candidate: ItemId,
    prefs: &Preferences,
) -> Admission {
    let Some(item) = find_item(catalog, candidate) else {
        return Admission::rejected("Session not found.");
    };

    if let Some(budget) = prefs.active_budget() {
        let current = cart_total(&build_lines(current_ids, catalog));
        let projected = current.saturating_add(item.price);
        if projected > budget {
            return Admission::rejected(format!(
                "Adding this session would exceed your budget ({} > {}).",
                format_eur(projected),
                format_eur(budget)
            ));
        }
    }

    Admission::granted()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new(1u64, "Morning Flow", 45)
                .with_description("A gentle start to the day"),
            CatalogItem::new(2u64, "Studio Hour", 25),
            CatalogItem::new(3u64, "dusk walk", 30).with_description("Evening stroll"),
            CatalogItem::new(4u64, "Atelier Visit", 60),
        ]
    }

    fn prefs_with(budget: Option<i64>, filter: bool, key: SortKey, dir: SortDir) -> Preferences {
        Preferences {
            name: String::new(),
            max_budget: budget,
            sort_key: key,
            sort_dir: dir,
            filter_under_budget: filter,
        }
    }

    fn ids_of(items: &[CatalogItem]) -> Vec<u64> {
        items.iter().map(|i| i.id.get()).collect()
    }

    #[test]
    fn test_filter_and_price_sort() {
        let prefs = prefs_with(Some(30), true, SortKey::Price, SortDir::Asc);
        let view = apply_preferences(&catalog(), &prefs);
        assert_eq!(ids_of(&view), vec![2, 3]);
    }

    #[test]
    fn test_filter_keeps_items_at_exact_budget() {
        let prefs = prefs_with(Some(45), true, SortKey::Id, SortDir::Asc);
        let view = apply_preferences(&catalog(), &prefs);
        assert_eq!(ids_of(&view), vec![1, 2, 3]);
    }

    #[test]
    fn test_filter_ignored_without_active_budget() {
        for budget in [None, Some(0), Some(-5)] {
            let prefs = prefs_with(budget, true, SortKey::Id, SortDir::Asc);
            let view = apply_preferences(&catalog(), &prefs);
            assert_eq!(view.len(), 4, "budget {budget:?} should not filter");
        }
    }

    #[test]
    fn test_sort_desc_reverses() {
        let prefs = prefs_with(None, false, SortKey::Price, SortDir::Desc);
        let view = apply_preferences(&catalog(), &prefs);
        assert_eq!(ids_of(&view), vec![4, 1, 3, 2]);
    }

    #[test]
    fn test_name_sort_is_case_insensitive() {
        let prefs = prefs_with(None, false, SortKey::Name, SortDir::Asc);
        let view = apply_preferences(&catalog(), &prefs);
        // "dusk walk" files under D despite the lowercase initial.
        assert_eq!(ids_of(&view), vec![4, 3, 1, 2]);
    }

    #[test]
    fn test_equal_keys_keep_catalog_order() {
        let catalog = vec![
            CatalogItem::new(7u64, "Second", 20),
            CatalogItem::new(3u64, "First", 20),
            CatalogItem::new(9u64, "Third", 20),
        ];
        let prefs = prefs_with(None, false, SortKey::Price, SortDir::Asc);
        let view = apply_preferences(&catalog, &prefs);
        assert_eq!(ids_of(&view), vec![7, 3, 9]);
    }

    #[test]
    fn test_apply_preferences_leaves_input_untouched() {
        let original = catalog();
        let prefs = prefs_with(Some(30), true, SortKey::Price, SortDir::Desc);
        let _ = apply_preferences(&original, &prefs);
        assert_eq!(ids_of(&original), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_search_matches_name_case_insensitively() {
        let view = search_catalog(&catalog(), "STUDIO");
        assert_eq!(ids_of(&view), vec![2]);
    }

    #[test]
    fn test_search_matches_description() {
        let view = search_catalog(&catalog(), "stroll");
        assert_eq!(ids_of(&view), vec![3]);
    }

    #[test]
    fn test_search_blank_query_matches_all() {
        assert_eq!(search_catalog(&catalog(), "").len(), 4);
        assert_eq!(search_catalog(&catalog(), "   ").len(), 4);
    }

    #[test]
    fn test_search_no_match_is_empty() {
        assert!(search_catalog(&catalog(), "pottery").is_empty());
    }

    #[test]
    fn test_admit_without_budget() {
        let prefs = prefs_with(None, false, SortKey::Id, SortDir::Asc);
        let verdict = can_admit_to_cart(&catalog(), &[], ItemId::new(4), &prefs);
        assert!(verdict.admitted);
        assert!(verdict.reason.is_none());
    }

    #[test]
    fn test_admit_rejects_over_budget_with_amounts() {
        // Cart holds 45 + 45, candidate costs 25, budget is 100.
        let ids = [ItemId::new(1), ItemId::new(1)];
        let prefs = prefs_with(Some(100), false, SortKey::Id, SortDir::Asc);
        let verdict = can_admit_to_cart(&catalog(), &ids, ItemId::new(2), &prefs);

        assert!(!verdict.admitted);
        let reason = verdict.reason.unwrap();
        assert!(reason.contains("115 \u{20ac}"), "reason was {reason:?}");
        assert!(reason.contains("100 \u{20ac}"), "reason was {reason:?}");
    }

    #[test]
    fn test_admit_allows_landing_exactly_on_budget() {
        let ids = [ItemId::new(1)];
        let prefs = prefs_with(Some(70), false, SortKey::Id, SortDir::Asc);
        let verdict = can_admit_to_cart(&catalog(), &ids, ItemId::new(2), &prefs);
        assert!(verdict.admitted);
    }

    #[test]
    fn test_admit_rejects_unknown_item() {
        let prefs = prefs_with(None, false, SortKey::Id, SortDir::Asc);
        let verdict = can_admit_to_cart(&catalog(), &[], ItemId::new(404), &prefs);
        assert!(!verdict.admitted);
        assert_eq!(verdict.reason.as_deref(), Some("Session not found."));
    }

    #[test]
    fn test_admit_ignores_inactive_budget() {
        let prefs = prefs_with(Some(-10), false, SortKey::Id, SortDir::Asc);
        let verdict = can_admit_to_cart(&catalog(), &[], ItemId::new(4), &prefs);
        assert!(verdict.admitted);
    }

    #[test]
    fn test_admit_ignores_cart_ids_missing_from_catalog() {
        // The unknown id contributes nothing to the projection.
        let ids = [ItemId::new(999), ItemId::new(2)];
        let prefs = prefs_with(Some(60), false, SortKey::Id, SortDir::Asc);
        let verdict = can_admit_to_cart(&catalog(), &ids, ItemId::new(3), &prefs);
        assert!(verdict.admitted);
    }
}

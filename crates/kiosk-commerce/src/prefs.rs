//! Preferences engine: the visitor's profile record, its durable form, and
//! the validation rules the edit form runs against.
//!
//! The persisted record is a single camelCase JSON object. Loading is
//! tolerant field by field: a value of the wrong shape falls back to that
//! field's default while the rest of the record survives. Saving serializes
//! the typed record verbatim in one durable write.

use kiosk_store::{KvStore, StoreError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Key the preferences record is stored under.
pub const PREFS_KEY: &str = "prefs_v1";

/// Shortest accepted display name, in characters.
pub const MIN_NAME_LEN: usize = 3;
/// Longest accepted display name, in characters.
pub const MAX_NAME_LEN: usize = 16;

/// Catalog ordering field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Catalog order, ascending by item id.
    #[default]
    Id,
    /// Case-insensitive name order.
    Name,
    /// Price order.
    Price,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
            SortKey::Price => "price",
        }
    }

    /// Parse a stored token; unknown tokens are `None`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "id" => Some(SortKey::Id),
            "name" => Some(SortKey::Name),
            "price" => Some(SortKey::Price),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortDir::Asc),
            "desc" => Some(SortDir::Desc),
            _ => None,
        }
    }
}

/// The visitor's profile record.
///
/// `max_budget` holds whatever integer was stored, including values that no
/// longer pass validation; [`Preferences::active_budget`] is the single
/// place that decides whether it currently counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Display name; empty means anonymous.
    pub name: String,
    /// Budget ceiling in whole euros, if one was ever saved.
    pub max_budget: Option<i64>,
    /// Catalog ordering field.
    pub sort_key: SortKey,
    /// Catalog ordering direction.
    pub sort_dir: SortDir,
    /// Hide items priced above the budget. Only effective while
    /// [`Preferences::active_budget`] is set.
    pub filter_under_budget: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            name: String::new(),
            max_budget: None,
            sort_key: SortKey::default(),
            sort_dir: SortDir::default(),
            filter_under_budget: false,
        }
    }
}

impl Preferences {
    /// The budget ceiling, but only when it is a positive amount.
    ///
    /// A stored zero or negative value is kept in the record yet never
    /// gates filtering or admission.
    pub fn active_budget(&self) -> Option<i64> {
        self.max_budget.filter(|&b| b > 0)
    }

    /// Trimmed display name for the greeting badge; `None` when blank.
    pub fn display_name(&self) -> Option<&str> {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}

/// Preferences engine over a durable store.
///
/// Like the cart engine, loads never fail and each save is one durable
/// write. Read-modify-write callers serialize externally.
#[derive(Debug, Clone)]
pub struct PrefsStore<S> {
    store: S,
}

impl<S: KvStore> PrefsStore<S> {
    /// Create a preferences engine over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read the persisted record, recovering field by field.
    ///
    /// A missing key, unreadable store, or non-object value yields the
    /// default record. Within an object, each field of the wrong shape
    /// falls back to its default independently: `{"maxBudget":"abc",
    /// "name":"Zoe"}` loads with the name intact and no budget.
    pub fn load(&self) -> Preferences {
        let raw = match self.store.get(PREFS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Preferences::default(),
            Err(e) => {
                debug!(error = %e, "prefs read failed, using defaults");
                return Preferences::default();
            }
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                debug!(error = %e, "malformed prefs state, using defaults");
                return Preferences::default();
            }
        };

        let mut prefs = Preferences::default();
        let Some(obj) = value.as_object() else {
            return prefs;
        };

        if let Some(name) = obj.get("name").and_then(Value::as_str) {
            prefs.name = name.to_string();
        }
        prefs.max_budget = obj.get("maxBudget").and_then(Value::as_i64);
        if let Some(key) = obj
            .get("sortKey")
            .and_then(Value::as_str)
            .and_then(SortKey::from_str)
        {
            prefs.sort_key = key;
        }
        if let Some(dir) = obj
            .get("sortDir")
            .and_then(Value::as_str)
            .and_then(SortDir::from_str)
        {
            prefs.sort_dir = dir;
        }
        prefs.filter_under_budget = obj
            .get("filterUnderBudget")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        prefs
    }

    /// Persist the record as-is in one durable write.
    pub fn save(&self, prefs: &Preferences) -> Result<(), StoreError> {
        let raw = serde_json::to_string(prefs)?;
        self.store.set(PREFS_KEY, &raw)
    }
}

/// Budget field input as the edit form sees it.
///
/// Distinguishes a field left blank from one holding text that is not a
/// number; validation treats only the former as "no budget wanted".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BudgetInput {
    /// Field left blank.
    Unset,
    /// Non-numeric text.
    Invalid,
    /// A finite numeric value, not yet range-checked.
    Amount(f64),
}

impl BudgetInput {
    /// The amount when it satisfies the budget rule: a positive whole
    /// number of euros.
    pub fn as_positive_int(&self) -> Option<i64> {
        match *self {
            BudgetInput::Amount(n) if n.is_finite() && n.fract() == 0.0 && n > 0.0 => {
                Some(n as i64)
            }
            _ => None,
        }
    }

    /// Lift a stored budget back into form input.
    pub fn from_stored(budget: Option<i64>) -> Self {
        match budget {
            Some(n) => BudgetInput::Amount(n as f64),
            None => BudgetInput::Unset,
        }
    }
}

/// Edit-form field values, as typed, prior to validation.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefsDraft {
    pub name: String,
    pub max_budget: BudgetInput,
    pub filter_under_budget: bool,
}

/// Per-field validation messages; an absent field passed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefsErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_budget: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_under_budget: Option<String>,
}

impl PrefsErrors {
    /// True when every field passed.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.max_budget.is_none() && self.filter_under_budget.is_none()
    }
}

/// Validate a draft against the profile rules.
///
/// Checks every field and reports all failures at once:
/// - name: blank is fine (anonymous), otherwise the trimmed length must be
///   between [`MIN_NAME_LEN`] and [`MAX_NAME_LEN`] characters;
/// - budget: blank is fine, anything else must be a positive whole number;
/// - filter: may only be on while the budget is currently valid. The
///   message lands on the filter field, not the budget field.
pub fn validate(draft: &PrefsDraft) -> PrefsErrors {
    let mut errors = PrefsErrors::default();

    let name = draft.name.trim();
    if !name.is_empty() {
        let len = name.chars().count();
        if len < MIN_NAME_LEN {
            errors.name = Some(format!("Name must be at least {MIN_NAME_LEN} characters."));
        } else if len > MAX_NAME_LEN {
            errors.name = Some(format!("Name cannot exceed {MAX_NAME_LEN} characters."));
        }
    }

    let budget = draft.max_budget.as_positive_int();
    if !matches!(draft.max_budget, BudgetInput::Unset) && budget.is_none() {
        errors.max_budget = Some("Budget must be a positive whole number of euros.".to_string());
    }

    if draft.filter_under_budget && budget.is_none() {
        errors.filter_under_budget =
            Some("Set a valid budget to enable this filter.".to_string());
    }

    errors
}

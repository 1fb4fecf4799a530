//! Preferences edit form as a reducer over raw field input.
//!
//! [`PrefsForm`] holds the fields as the visitor typed them and re-runs
//! [`validate`](crate::prefs::validate) after every change, so the error
//! map and the derived flags are always current. The form owns no store;
//! callers persist the record [`submit`](PrefsForm::submit) hands back.

use crate::prefs::{
    validate, BudgetInput, Preferences, PrefsDraft, PrefsErrors, SortDir, SortKey,
};

/// Interpret raw budget-field text.
///
/// Blank means no budget wanted, non-numeric text is an error the visitor
/// must fix, and any finite number passes through for range checking by
/// [`validate`](crate::prefs::validate).
pub fn parse_budget(raw: &str) -> BudgetInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return BudgetInput::Unset;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => BudgetInput::Amount(n),
        _ => BudgetInput::Invalid,
    }
}

/// Live state of the preferences edit form.
///
/// Fields stay raw until submit; validation runs on every change. The
/// under-budget checkbox is slaved to the budget field: it cannot be
/// turned on, and is forced back off, while the budget is not a positive
/// whole number.
#[derive(Debug, Clone)]
pub struct PrefsForm {
    name: String,
    budget: String,
    sort_key: SortKey,
    sort_dir: SortDir,
    filter_under_budget: bool,
    errors: PrefsErrors,
}

impl PrefsForm {
    /// Preload the form from a stored record.
    pub fn from_prefs(prefs: &Preferences) -> Self {
        let mut form = Self {
            name: prefs.name.clone(),
            budget: prefs.max_budget.map(|b| b.to_string()).unwrap_or_default(),
            sort_key: prefs.sort_key,
            sort_dir: prefs.sort_dir,
            filter_under_budget: prefs.filter_under_budget,
            errors: PrefsErrors::default(),
        };
        form.revalidate();
        form
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn budget(&self) -> &str {
        &self.budget
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn sort_dir(&self) -> SortDir {
        self.sort_dir
    }

    pub fn filter_under_budget(&self) -> bool {
        self.filter_under_budget
    }

    /// Current per-field errors.
    pub fn errors(&self) -> &PrefsErrors {
        &self.errors
    }

    /// Whether the under-budget checkbox may be interacted with.
    pub fn filter_enabled(&self) -> bool {
        parse_budget(&self.budget).as_positive_int().is_some()
    }

    /// Whether submit would currently succeed.
    pub fn can_save(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.revalidate();
    }

    pub fn set_budget(&mut self, budget: impl Into<String>) {
        self.budget = budget.into();
        self.revalidate();
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
        self.revalidate();
    }

    pub fn set_sort_dir(&mut self, dir: SortDir) {
        self.sort_dir = dir;
        self.revalidate();
    }

    /// Toggle the under-budget filter. Turning it on is refused while the
    /// budget field does not hold a positive whole number.
    pub fn set_filter(&mut self, on: bool) {
        self.filter_under_budget = on && self.filter_enabled();
        self.revalidate();
    }

    /// Reset every field to the defaults.
    pub fn clear(&mut self) {
        *self = Self::from_prefs(&Preferences::default());
    }

    /// Finalize the form into a normalized record.
    ///
    /// Re-validates first; on failure the caller gets the error map and
    /// the form is left untouched. On success the record carries the
    /// trimmed name and a budget only when it passed the positive-integer
    /// gate.
    pub fn submit(&mut self) -> Result<Preferences, PrefsErrors> {
        self.revalidate();
        if !self.errors.is_empty() {
            return Err(self.errors.clone());
        }

        let draft = self.draft();
        Ok(Preferences {
            name: draft.name.trim().to_string(),
            max_budget: draft.max_budget.as_positive_int(),
            sort_key: self.sort_key,
            sort_dir: self.sort_dir,
            filter_under_budget: draft.filter_under_budget,
        })
    }

    fn draft(&self) -> PrefsDraft {
        PrefsDraft {
            name: self.name.clone(),
            max_budget: parse_budget(&self.budget),
            filter_under_budget: self.filter_under_budget,
        }
    }

    fn revalidate(&mut self) {
        if !self.filter_enabled() {
            self.filter_under_budget = false;
        }
        self.errors = validate(&self.draft());
    }
}

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Scope criteria supplied once per run.
///
/// Tag filters map key to wanted value; an empty value means "any value"
/// (TOML has no null, so the empty string is the wildcard spelling).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Allow-list of unit ids or names. Empty means "no allow-list".
    pub included_units: BTreeSet<String>,
    /// Deny-list of unit ids or names. Always wins over every other rule.
    pub excluded_units: BTreeSet<String>,
    /// Tags a unit must all carry to stay in scope.
    pub included_tags: BTreeMap<String, String>,
    /// Tags any one of which knocks a unit out of scope.
    pub excluded_tags: BTreeMap<String, String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.included_units.is_empty()
            && self.excluded_units.is_empty()
            && self.included_tags.is_empty()
            && self.excluded_tags.is_empty()
    }

    /// Entries present in both the allow-list and the deny-list.
    pub fn conflicting_units(&self) -> Vec<String> {
        self.included_units
            .iter()
            .filter(|entry| {
                self.excluded_units
                    .iter()
                    .any(|other| other.eq_ignore_ascii_case(entry))
            })
            .cloned()
            .collect()
    }
}

/// Normalize an empty-string tag value into the "any value" wildcard.
pub fn tag_value_wanted(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tag set attached to a unit.
///
/// Modeled as an explicit string-to-string map with defined equality and
/// deterministic iteration order, never as a loose dynamic bag. Keys and
/// values compare case-insensitively (ASCII), matching the control plane's
/// semantics for resource tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(pub BTreeMap<String, String>);

impl Tags {
    pub fn new() -> Self {
        Tags(BTreeMap::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Case-insensitive key lookup.
    pub fn value_of(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Whether the unit carries `key` with the wanted value.
    ///
    /// `want = None` means "any value": the key alone satisfies the match.
    pub fn matches(&self, key: &str, want: Option<&str>) -> bool {
        match self.value_of(key) {
            Some(found) => match want {
                Some(expected) => found.eq_ignore_ascii_case(expected),
                None => true,
            },
            None => false,
        }
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Tags {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Tags(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
        )
    }
}

impl FromIterator<(String, String)> for Tags {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Tags(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_lookup_ignores_case() {
        let tags = Tags::from([("Env", "Prod")]);
        assert_eq!(tags.value_of("env"), Some("Prod"));
        assert_eq!(tags.value_of("ENV"), Some("Prod"));
        assert_eq!(tags.value_of("owner"), None);
    }

    #[test]
    fn matches_compares_values_case_insensitively() {
        let tags = Tags::from([("env", "Prod")]);
        assert!(tags.matches("env", Some("prod")));
        assert!(!tags.matches("env", Some("dev")));
    }

    #[test]
    fn matches_with_any_value_only_needs_the_key() {
        let tags = Tags::from([("costcenter", "1234")]);
        assert!(tags.matches("costcenter", None));
        assert!(!tags.matches("owner", None));
    }
}

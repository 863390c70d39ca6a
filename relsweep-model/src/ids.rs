use serde::{Deserialize, Serialize};

/// Strongly typed identifier for an assessable unit (e.g. one subscription).
///
/// Unit ids come from the cloud control plane and are compared
/// case-insensitively, matching how that plane treats them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub String);

impl UnitId {
    pub fn new(raw: impl Into<String>) -> Self {
        UnitId(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive equality against a raw id or name string.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl AsRef<str> for UnitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UnitId {
    fn from(raw: &str) -> Self {
        UnitId(raw.to_owned())
    }
}

impl From<String> for UnitId {
    fn from(raw: String) -> Self {
        UnitId(raw)
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

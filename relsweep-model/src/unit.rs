use serde::{Deserialize, Serialize};

use crate::ids::UnitId;
use crate::tags::Tags;

/// An assessable cloud-scoped entity, enumerated once per run and immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    #[serde(default)]
    pub tags: Tags,
}

impl Unit {
    pub fn new(id: impl Into<UnitId>, name: impl Into<String>) -> Self {
        Unit {
            id: id.into(),
            name: name.into(),
            tags: Tags::new(),
        }
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Whether `needle` names this unit, by id or display name.
    pub fn is_named(&self, needle: &str) -> bool {
        self.id.matches(needle) || self.name.eq_ignore_ascii_case(needle)
    }
}

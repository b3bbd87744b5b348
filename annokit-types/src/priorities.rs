use serde::{Deserialize, Serialize};

/// An ordered sequence of type names; earlier entries have higher
/// priority. Duplicates within one list are disallowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypePriorityList {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
}

impl TypePriorityList {
    #[must_use]
    pub fn new(types: Vec<String>) -> Self {
        Self { types }
    }

    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t == type_name)
    }
}

/// The type-priority declarations of one descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypePriorities {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub priority_lists: Vec<TypePriorityList>,
}

impl TypePriorities {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any priority list names the type.
    #[must_use]
    pub fn references_type(&self, type_name: &str) -> bool {
        self.priority_lists.iter().any(|pl| pl.contains(type_name))
    }
}

use serde::{Deserialize, Serialize};

/// How an index orders or collects its entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FsIndexKind {
    #[default]
    Sorted,
    Set,
    Bag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// One key of an index: a feature with a comparator, or the
/// type-priority sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FsIndexKeyDescription {
    Feature {
        /// Short feature name, scoped by the owning index's type.
        feature_name: String,
        comparator: SortOrder,
    },
    TypePriority,
}

impl FsIndexKeyDescription {
    /// The feature name for a feature key, `None` for the sentinel.
    #[must_use]
    pub fn feature_name(&self) -> Option<&str> {
        match self {
            Self::Feature { feature_name, .. } => Some(feature_name),
            Self::TypePriority => None,
        }
    }
}

/// An index over instances of one type. Identity is the `label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FsIndexDescription {
    pub label: String,
    pub type_name: String,
    #[serde(default)]
    pub kind: FsIndexKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<FsIndexKeyDescription>,
}

/// The index declarations of one descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FsIndexCollection {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<FsIndexDescription>,
}

impl FsIndexCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&FsIndexDescription> {
        self.indexes.iter().find(|ix| ix.label == label)
    }

    /// True if any index key references the feature, matched by short
    /// name on indexes declared over `type_name`.
    #[must_use]
    pub fn references_feature(&self, type_name: &str, feature_name: &str) -> bool {
        self.indexes
            .iter()
            .filter(|ix| ix.type_name == type_name)
            .any(|ix| {
                ix.keys
                    .iter()
                    .any(|k| k.feature_name() == Some(feature_name))
            })
    }

    /// True if any index is declared over `type_name`.
    #[must_use]
    pub fn references_type(&self, type_name: &str) -> bool {
        self.indexes.iter().any(|ix| ix.type_name == type_name)
    }
}

//! Source-tagged merged views of types, features, and allowed values.

use annokit_store::ImportId;
use annokit_types::{AllowedValue, FeatureDescription};
use serde::Serialize;

/// Which tree a declaration comes from.
///
/// Local declarations are owned by this descriptor and editable;
/// imported and built-in declarations are shadows, read-only from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Source {
    Local,
    Imported { import: ImportId },
    BuiltIn,
}

impl Source {
    #[must_use]
    pub fn is_local(self) -> bool {
        matches!(self, Self::Local)
    }
}

/// The effective definition of one type name across all sources.
///
/// Identity (supertype, description) follows the highest-precedence
/// source: local wins, then the first resolved import, then the
/// built-in catalog. Features and allowed values are the union across
/// sources, joined by name/value; each carries the source it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedType {
    pub name: String,
    pub supertype_name: Option<String>,
    pub description: Option<String>,
    pub features: Vec<MergedFeature>,
    pub allowed_values: Vec<MergedAllowedValue>,
    /// Every source that declares this name, highest precedence first.
    pub sources: Vec<Source>,
}

impl MergedType {
    /// True when a local declaration exists, making identity edits legal.
    #[must_use]
    pub fn editable(&self) -> bool {
        self.sources.contains(&Source::Local)
    }

    /// Looks up a merged feature directly declared on this type.
    #[must_use]
    pub fn feature(&self, feature_name: &str) -> Option<&MergedFeature> {
        self.features.iter().find(|f| f.feature.name == feature_name)
    }

    #[must_use]
    pub fn allowed_value(&self, value: &str) -> Option<&MergedAllowedValue> {
        self.allowed_values.iter().find(|av| av.value.value == value)
    }
}

/// A feature in the merged view, tagged with the source that supplied it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedFeature {
    pub feature: FeatureDescription,
    pub source: Source,
    /// Editable only when a local counterpart exists.
    pub editable: bool,
}

/// An allowed value in the merged view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedAllowedValue {
    pub value: AllowedValue,
    pub source: Source,
    pub editable: bool,
}

use serde::{Deserialize, Serialize};

use crate::names;

/// One entry in a capability's input or output list.
///
/// A type entry names a type and may claim "all features"; a feature
/// entry names a single feature in the combined `Type:feature` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeOrFeature {
    Type {
        name: String,
        #[serde(default)]
        all_features: bool,
    },
    Feature {
        name: String,
    },
}

impl TypeOrFeature {
    /// Creates a type entry without the all-features flag.
    #[must_use]
    pub fn type_entry(name: impl Into<String>) -> Self {
        Self::Type {
            name: name.into(),
            all_features: false,
        }
    }

    /// Creates a feature entry from the owning type and short name.
    #[must_use]
    pub fn feature_entry(type_name: &str, feature_name: &str) -> Self {
        Self::Feature {
            name: names::full_feature_name(type_name, feature_name),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Type { name, .. } | Self::Feature { name } => name,
        }
    }

    #[must_use]
    pub fn is_type(&self) -> bool {
        matches!(self, Self::Type { .. })
    }

    /// True for a feature entry scoped to `type_name` (`type_name:...`).
    #[must_use]
    pub fn is_feature_of(&self, type_name: &str) -> bool {
        match self {
            Self::Feature { name } => names::split_feature_name(name)
                .is_some_and(|(owner, _)| owner == type_name),
            Self::Type { .. } => false,
        }
    }
}

/// One capability set: what the component consumes and produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Capability {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input_sofas: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output_sofas: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<TypeOrFeature>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<TypeOrFeature>,
}

impl Capability {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds an entry by exact name in a direction's entry list.
    #[must_use]
    pub fn find_entry<'a>(items: &'a [TypeOrFeature], name: &str) -> Option<&'a TypeOrFeature> {
        items.iter().find(|tf| tf.name() == name)
    }

    #[must_use]
    pub fn has_input(&self, name: &str) -> bool {
        Self::find_entry(&self.inputs, name).is_some()
    }

    #[must_use]
    pub fn has_output(&self, name: &str) -> bool {
        Self::find_entry(&self.outputs, name).is_some()
    }
}

/// Maps an aggregate-level sofa name onto a delegate's sofa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SofaMapping {
    pub aggregate_sofa_name: String,
    pub component_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_sofa_name: Option<String>,
}

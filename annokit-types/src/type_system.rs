use serde::{Deserialize, Serialize};

use crate::names;

/// A type declaration in a descriptor.
///
/// Identity is the fully qualified `name`, unique within a type system.
/// The same name may be declared locally, in an import, and in the
/// built-in catalog; those copies are three views of one logical type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescription {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supertype_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<FeatureDescription>,
    /// Only meaningful when the supertype is the built-in string type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<AllowedValue>,
}

impl TypeDescription {
    /// Creates a type with no features or allowed values.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        supertype_name: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            supertype_name: Some(supertype_name.into()),
            description,
            features: Vec::new(),
            allowed_values: Vec::new(),
        }
    }

    /// Adds a feature and returns `self` for chaining.
    #[must_use]
    pub fn with_feature(mut self, feature: FeatureDescription) -> Self {
        self.features.push(feature);
        self
    }

    /// Looks up a directly declared feature by short name.
    #[must_use]
    pub fn feature(&self, feature_name: &str) -> Option<&FeatureDescription> {
        self.features.iter().find(|f| f.name == feature_name)
    }

    /// Mutable lookup of a directly declared feature by short name.
    pub fn feature_mut(&mut self, feature_name: &str) -> Option<&mut FeatureDescription> {
        self.features.iter_mut().find(|f| f.name == feature_name)
    }

    /// Looks up an allowed value by its string.
    #[must_use]
    pub fn allowed_value(&self, value: &str) -> Option<&AllowedValue> {
        self.allowed_values.iter().find(|av| av.value == value)
    }

    /// True when this type's supertype is the built-in string type.
    #[must_use]
    pub fn is_string_subtype(&self) -> bool {
        self.supertype_name.as_deref() == Some(names::TYPE_STRING)
    }
}

/// A feature declaration on a type.
///
/// Identity is the (owning type, short name) pair, unique per type
/// including the inherited scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDescription {
    pub name: String,
    pub range_type_name: String,
    /// Only meaningful when the range is a record array or list type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,
    /// Tri-state: `None` means unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_references_allowed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FeatureDescription {
    /// Creates a feature with the given range and no element type.
    #[must_use]
    pub fn new(name: impl Into<String>, range_type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            range_type_name: range_type_name.into(),
            element_type: None,
            multiple_references_allowed: None,
            description: None,
        }
    }

    /// Sets the element type and returns `self` for chaining.
    #[must_use]
    pub fn with_element_type(mut self, element_type: impl Into<String>) -> Self {
        self.element_type = Some(element_type.into());
        self
    }

    /// Clears the fields that are meaningless for the current range:
    /// element type unless the range is a record array/list, the
    /// multiple-references flag unless the range is an array/list.
    pub fn normalize(&mut self) {
        if !names::is_record_array_or_list_type(&self.range_type_name) {
            self.element_type = None;
        }
        if !names::is_array_or_list_type(&self.range_type_name) {
            self.multiple_references_allowed = None;
        }
    }
}

/// An allowed value on a string-subtyped type.
///
/// Identity is the (owning type, `value`) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowedValue {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AllowedValue {
    #[must_use]
    pub fn new(value: impl Into<String>, description: Option<String>) -> Self {
        Self {
            value: value.into(),
            description,
        }
    }
}

/// One source tree of type declarations (local, one import, or built-in).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeSystemDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeDescription>,
}

impl TypeSystemDescription {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a type declaration by fully qualified name.
    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&TypeDescription> {
        self.types.iter().find(|t| t.name == type_name)
    }

    /// Mutable lookup by fully qualified name.
    pub fn get_mut(&mut self, type_name: &str) -> Option<&mut TypeDescription> {
        self.types.iter_mut().find(|t| t.name == type_name)
    }

    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.get(type_name).is_some()
    }

    /// Appends a type declaration. Uniqueness is the caller's concern.
    pub fn push_type(&mut self, td: TypeDescription) {
        self.types.push(td);
    }

    /// Removes and returns the declaration for `type_name`, if present.
    pub fn remove_type(&mut self, type_name: &str) -> Option<TypeDescription> {
        let i = self.types.iter().position(|t| t.name == type_name)?;
        Some(self.types.remove(i))
    }
}

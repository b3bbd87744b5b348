use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The value type of a configuration parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    String,
    Integer,
    Float,
    Boolean,
}

/// A configuration parameter declaration.
///
/// Identity is the `name`, unique across the whole declarations block
/// (common, ungrouped, and every group).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationParameter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub param_type: ParameterType,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default)]
    pub multi_valued: bool,
    /// Override targets of the form `delegateKey[/delegateKey...]/paramName`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<String>,
}

impl ConfigurationParameter {
    #[must_use]
    pub fn new(name: impl Into<String>, param_type: ParameterType) -> Self {
        Self {
            name: name.into(),
            description: None,
            param_type,
            mandatory: false,
            multi_valued: false,
            overrides: Vec::new(),
        }
    }

    /// True when type, mandatory flag, and multiplicity all match.
    /// Used to decide whether an override may share an existing parameter.
    #[must_use]
    pub fn spec_matches(&self, other: &Self) -> bool {
        self.param_type == other.param_type
            && self.mandatory == other.mandatory
            && self.multi_valued == other.multi_valued
    }

    #[must_use]
    pub fn has_override(&self, target: &str) -> bool {
        self.overrides.iter().any(|o| o == target)
    }
}

/// Identifies a configuration group by its *set* of names.
///
/// Two groups declaring `"a b"` and `"b a"` are the same group; list
/// order and whitespace never participate in identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(BTreeSet<String>);

impl GroupKey {
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn names(&self) -> &BTreeSet<String> {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for name in &self.0 {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{name}")?;
            first = false;
        }
        Ok(())
    }
}

/// A named group of parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationGroup {
    pub names: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ConfigurationParameter>,
}

impl ConfigurationGroup {
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            parameters: Vec::new(),
        }
    }

    #[must_use]
    pub fn key(&self) -> GroupKey {
        GroupKey::from_names(self.names.iter().cloned())
    }
}

/// All parameter declarations of one descriptor: ungrouped parameters,
/// common parameters (members of every group), and named groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationParameterDeclarations {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ConfigurationParameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub common_parameters: Vec<ConfigurationParameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<ConfigurationGroup>,
}

impl ConfigurationParameterDeclarations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates every parameter: ungrouped, common, then per group.
    pub fn iter_all(&self) -> impl Iterator<Item = &ConfigurationParameter> {
        self.parameters
            .iter()
            .chain(self.common_parameters.iter())
            .chain(self.groups.iter().flat_map(|g| g.parameters.iter()))
    }

    /// Mutable iteration over every parameter.
    pub fn iter_all_mut(&mut self) -> impl Iterator<Item = &mut ConfigurationParameter> {
        self.parameters
            .iter_mut()
            .chain(self.common_parameters.iter_mut())
            .chain(self.groups.iter_mut().flat_map(|g| g.parameters.iter_mut()))
    }

    /// True if any parameter anywhere in the block has this name.
    #[must_use]
    pub fn contains_parameter_name(&self, name: &str) -> bool {
        self.iter_all().any(|p| p.name == name)
    }

    /// Finds the group whose name set equals `key`.
    #[must_use]
    pub fn group(&self, key: &GroupKey) -> Option<&ConfigurationGroup> {
        self.groups.iter().find(|g| g.key() == *key)
    }

    /// Mutable lookup of the group whose name set equals `key`.
    pub fn group_mut(&mut self, key: &GroupKey) -> Option<&mut ConfigurationGroup> {
        self.groups.iter_mut().find(|g| g.key() == *key)
    }

    /// The union of all group names declared in this block. A delegate's
    /// common parameters correspond to this set at the aggregate level.
    #[must_use]
    pub fn all_group_names(&self) -> GroupKey {
        GroupKey::from_names(
            self.groups
                .iter()
                .flat_map(|g| g.names.iter().cloned()),
        )
    }
}

//! Resolved delegate components of an aggregate.

use annokit_types::ConfigurationParameterDeclarations;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A resolved delegate of an aggregate descriptor, keyed by its delegate
/// key. A delegate is either a primitive component or a nested aggregate
/// whose own delegates are addressed through slash-joined key paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DelegateSpecifier {
    Primitive {
        parameters: ConfigurationParameterDeclarations,
    },
    Aggregate {
        parameters: ConfigurationParameterDeclarations,
        delegates: BTreeMap<String, DelegateSpecifier>,
    },
}

impl DelegateSpecifier {
    /// Creates a primitive delegate with the given parameter declarations.
    #[must_use]
    pub fn primitive(parameters: ConfigurationParameterDeclarations) -> Self {
        Self::Primitive { parameters }
    }

    #[must_use]
    pub fn parameters(&self) -> &ConfigurationParameterDeclarations {
        match self {
            Self::Primitive { parameters } | Self::Aggregate { parameters, .. } => parameters,
        }
    }

    /// Walks this delegate and, for aggregates, every nested delegate.
    /// `prefix` is the key path of this delegate; nested keys are joined
    /// with `/`, matching override target syntax.
    pub(crate) fn collect_entries<'a>(
        &'a self,
        prefix: &str,
        out: &mut Vec<(String, &'a DelegateSpecifier)>,
    ) {
        out.push((prefix.to_string(), self));
        if let Self::Aggregate { delegates, .. } = self {
            for (key, nested) in delegates {
                nested.collect_entries(&format!("{prefix}/{key}"), out);
            }
        }
    }
}

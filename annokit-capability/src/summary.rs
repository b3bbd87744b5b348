//! Derived capability views for presentation.
//!
//! Summaries are recomputed from the capability declarations after each
//! change; they are never edited directly.

use annokit_types::names::split_feature_name;
use annokit_types::{Capability, TypeOrFeature};
use serde::Serialize;

/// One capability set split by type, feature, language, and sofa.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CapabilitySummary {
    pub types: Vec<TypeSummary>,
    pub languages: Vec<String>,
    pub input_sofas: Vec<String>,
    pub output_sofas: Vec<String>,
}

/// A type mentioned by a capability, with its per-direction markers and
/// the feature entries scoped to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypeSummary {
    pub name: String,
    pub input: bool,
    pub output: bool,
    pub all_features_input: bool,
    pub all_features_output: bool,
    pub features: Vec<FeatureSummary>,
}

/// A feature entry under its owning type, by short name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureSummary {
    pub name: String,
    pub input: bool,
    pub output: bool,
}

/// Computes the presentation view of one capability set.
///
/// Types appear in first-mention order. A feature entry whose owning
/// type has no type entry still yields a `TypeSummary` row with both
/// direction markers false, so the caller can see that the feature's
/// type is itself undeclared rather than having it silently patched.
#[must_use]
pub fn summarize(c: &Capability) -> CapabilitySummary {
    let mut summary = CapabilitySummary {
        types: Vec::new(),
        languages: c.languages.clone(),
        input_sofas: c.input_sofas.clone(),
        output_sofas: c.output_sofas.clone(),
    };

    let mut type_row = |types: &mut Vec<TypeSummary>, name: &str| -> usize {
        match types.iter().position(|t| t.name == name) {
            Some(i) => i,
            None => {
                types.push(TypeSummary {
                    name: name.to_string(),
                    ..TypeSummary::default()
                });
                types.len() - 1
            }
        }
    };

    for (items, is_input) in [(&c.inputs, true), (&c.outputs, false)] {
        for tf in items {
            match tf {
                TypeOrFeature::Type { name, all_features } => {
                    let i = type_row(&mut summary.types, name);
                    let row = &mut summary.types[i];
                    if is_input {
                        row.input = true;
                        row.all_features_input |= *all_features;
                    } else {
                        row.output = true;
                        row.all_features_output |= *all_features;
                    }
                }
                TypeOrFeature::Feature { name } => {
                    let Some((type_name, feature_name)) = split_feature_name(name) else {
                        continue;
                    };
                    let i = type_row(&mut summary.types, type_name);
                    let row = &mut summary.types[i];
                    let fi = match row.features.iter().position(|f| f.name == feature_name) {
                        Some(fi) => fi,
                        None => {
                            row.features.push(FeatureSummary {
                                name: feature_name.to_string(),
                                ..FeatureSummary::default()
                            });
                            row.features.len() - 1
                        }
                    };
                    if is_input {
                        row.features[fi].input = true;
                    } else {
                        row.features[fi].output = true;
                    }
                }
            }
        }
    }
    summary
}

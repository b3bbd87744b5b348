//! Maintenance of capability input/output declarations.
//!
//! Invariant: a `TypeOrFeature` entry exists at most once per
//! (capability, name, direction). All add operations are idempotent —
//! re-adding an existing entry is a no-op, never a duplicate.

use annokit_types::names::full_feature_name;
use annokit_types::{Capability, SofaMapping, TypeOrFeature};

use crate::error::{CapabilityError, CapabilityResult};

fn add_entry(items: &mut Vec<TypeOrFeature>, entry: TypeOrFeature) -> bool {
    if items.iter().any(|tf| tf.name() == entry.name()) {
        return false;
    }
    items.push(entry);
    true
}

/// Declares a type as input. Returns false if already declared.
pub fn add_input_type(c: &mut Capability, type_name: &str) -> bool {
    add_entry(&mut c.inputs, TypeOrFeature::type_entry(type_name))
}

/// Declares a type as output. Returns false if already declared.
pub fn add_output_type(c: &mut Capability, type_name: &str) -> bool {
    add_entry(&mut c.outputs, TypeOrFeature::type_entry(type_name))
}

/// Declares a feature as input. Returns false if already declared.
pub fn add_input_feature(c: &mut Capability, type_name: &str, feature_name: &str) -> bool {
    add_entry(
        &mut c.inputs,
        TypeOrFeature::feature_entry(type_name, feature_name),
    )
}

/// Declares a feature as output. Returns false if already declared.
pub fn add_output_feature(c: &mut Capability, type_name: &str, feature_name: &str) -> bool {
    add_entry(
        &mut c.outputs,
        TypeOrFeature::feature_entry(type_name, feature_name),
    )
}

/// Sets or clears the all-features flag on the type entry for
/// `type_name` within one direction's entry list.
///
/// If no type entry exists and the flag is being set, this is an
/// invalid state — a type's features cannot all be claimed without the
/// type itself being declared — and is reported, never repaired by
/// creating the entry. Clearing the flag on an absent entry is a no-op.
pub fn set_all_features(
    items: &mut [TypeOrFeature],
    type_name: &str,
    flag: bool,
) -> CapabilityResult<()> {
    for tf in items.iter_mut() {
        if let TypeOrFeature::Type { name, all_features } = tf {
            if name == type_name {
                *all_features = flag;
                return Ok(());
            }
        }
    }
    if flag {
        return Err(CapabilityError::InvalidAllFeaturesState {
            type_name: type_name.to_string(),
        });
    }
    Ok(())
}

/// Removes a type from one capability set, in both directions.
///
/// Feature entries scoped to the type are removed first; this cascade
/// is unconditional and internal to the capability (contrast with
/// cross-structure cascades, which require confirmation). Returns the
/// number of entries removed.
pub fn remove_type(c: &mut Capability, type_name: &str) -> usize {
    let mut removed = 0;
    for items in [&mut c.inputs, &mut c.outputs] {
        let before = items.len();
        items.retain(|tf| {
            !(tf.is_feature_of(type_name) || (tf.is_type() && tf.name() == type_name))
        });
        removed += before - items.len();
    }
    removed
}

/// Removes a feature entry from both directions of one capability set.
pub fn remove_feature(c: &mut Capability, type_name: &str, feature_name: &str) -> usize {
    let full = full_feature_name(type_name, feature_name);
    let mut removed = 0;
    for items in [&mut c.inputs, &mut c.outputs] {
        let before = items.len();
        items.retain(|tf| tf.is_type() || tf.name() != full);
        removed += before - items.len();
    }
    removed
}

/// Replaces the feature entries for one type within an entry list,
/// keeping every type entry and every other type's feature entries.
/// `feature_names` are short names, scoped to `type_name`.
pub fn replace_features_keeping_types(
    items: &mut Vec<TypeOrFeature>,
    type_name: &str,
    feature_names: &[String],
) {
    items.retain(|tf| !tf.is_feature_of(type_name));
    for name in feature_names {
        items.push(TypeOrFeature::feature_entry(type_name, name));
    }
}

/// Adds a supported language tag; duplicates are rejected.
pub fn add_language(c: &mut Capability, language: &str) -> CapabilityResult<()> {
    if c.languages.iter().any(|l| l == language) {
        return Err(CapabilityError::DuplicateLanguage {
            language: language.to_string(),
        });
    }
    c.languages.push(language.to_string());
    Ok(())
}

/// Declares an input sofa name. Returns false if already declared.
pub fn add_input_sofa(c: &mut Capability, sofa_name: &str) -> bool {
    if c.input_sofas.iter().any(|s| s == sofa_name) {
        return false;
    }
    c.input_sofas.push(sofa_name.to_string());
    true
}

/// Declares an output sofa name. Returns false if already declared.
pub fn add_output_sofa(c: &mut Capability, sofa_name: &str) -> bool {
    if c.output_sofas.iter().any(|s| s == sofa_name) {
        return false;
    }
    c.output_sofas.push(sofa_name.to_string());
    true
}

/// Renames a sofa across *all* capability sets — sofa names are
/// descriptor-global — and renames matching aggregate-side sofa-mapping
/// entries. Returns the number of occurrences renamed.
pub fn rename_sofa(
    capabilities: &mut [Capability],
    mappings: &mut [SofaMapping],
    old_name: &str,
    new_name: &str,
) -> usize {
    let mut renamed = 0;
    for c in capabilities.iter_mut() {
        for sofas in [&mut c.input_sofas, &mut c.output_sofas] {
            for s in sofas.iter_mut() {
                if s == old_name {
                    *s = new_name.to_string();
                    renamed += 1;
                }
            }
        }
    }
    for m in mappings.iter_mut() {
        if m.aggregate_sofa_name == old_name {
            m.aggregate_sofa_name = new_name.to_string();
            renamed += 1;
        }
    }
    renamed
}

/// Sofa mappings whose aggregate sofa name is not declared as an input
/// or output sofa in any capability set.
#[must_use]
pub fn undeclared_mapping_sofas<'a>(
    mappings: &'a [SofaMapping],
    capabilities: &[Capability],
) -> Vec<&'a str> {
    let declared = |name: &str| {
        capabilities.iter().any(|c| {
            c.input_sofas.iter().any(|s| s == name) || c.output_sofas.iter().any(|s| s == name)
        })
    };
    let mut out: Vec<&str> = Vec::new();
    for m in mappings {
        let name = m.aggregate_sofa_name.as_str();
        if !declared(name) && !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

//! Rename and removal propagation across dependent structures.

use annokit_merge::{MergedType, TypeMergeResolver};
use annokit_store::DescriptorStore;
use annokit_types::names::{full_feature_name, FEATURE_SEPARATOR};
use annokit_types::TypeOrFeature;
use tracing::{debug, warn};

use crate::error::{PropagateError, PropagateResult};
use crate::plan::{
    CapabilityEdit, CascadeDecision, CascadeOutcome, CascadePlan, CascadeSubject, Direction,
    IndexEdit, PriorityEdit,
};
use crate::warning::{MentionKind, PropagateWarning};

// ── Dependency queries ───────────────────────────────────────────

/// True when `merged`'s supertype or any feature range names `target`.
#[must_use]
pub fn type_requires_type(merged: &MergedType, target: &str) -> bool {
    if merged.supertype_name.as_deref() == Some(target) {
        return true;
    }
    merged
        .features
        .iter()
        .any(|f| f.feature.range_type_name == target)
}

/// Names of merged types that require `type_name` (as supertype or
/// feature range). Used to block a removal or warn before a rename.
#[must_use]
pub fn dependent_types(store: &DescriptorStore, type_name: &str) -> Vec<String> {
    let resolver = TypeMergeResolver::new(store);
    resolver
        .merged_types()
        .iter()
        .filter(|t| t.name != type_name && type_requires_type(t, type_name))
        .map(|t| t.name.clone())
        .collect()
}

/// True when any capability, index, or priority list mentions the type.
#[must_use]
pub fn is_type_in_use_elsewhere(store: &DescriptorStore, type_name: &str) -> bool {
    let prefix = format!("{type_name}{FEATURE_SEPARATOR}");
    let in_capabilities = store.capabilities().iter().any(|c| {
        c.inputs.iter().chain(c.outputs.iter()).any(|tf| {
            (tf.is_type() && tf.name() == type_name) || tf.name().starts_with(&prefix)
        })
    });
    in_capabilities
        || store.indexes().references_type(type_name)
        || store.type_priorities().references_type(type_name)
}

/// True when any capability entry or index key mentions the feature.
#[must_use]
pub fn is_feature_in_use_elsewhere(
    store: &DescriptorStore,
    type_name: &str,
    feature_name: &str,
) -> bool {
    let full = full_feature_name(type_name, feature_name);
    let in_capabilities = store.capabilities().iter().any(|c| {
        c.inputs
            .iter()
            .chain(c.outputs.iter())
            .any(|tf| !tf.is_type() && tf.name() == full)
    });
    in_capabilities || store.indexes().references_feature(type_name, feature_name)
}

// ── Renames ──────────────────────────────────────────────────────

/// Renames a locally declared type and propagates the new name into
/// every reachable mention: other types' supertypes and feature ranges
/// (local declarations only), capability entries, index descriptions,
/// and priority lists.
///
/// Mentions owned by an import or the built-in catalog are left
/// untouched and reported as [`PropagateWarning::UnreachableUpdate`].
/// If the old name is itself still declared by an import or built-in,
/// the merged entity persists under the old name: only the local
/// declaration is renamed, downstream mentions stay bound to the old
/// name, and [`PropagateWarning::ShadowRemains`] is reported.
pub fn rename_type(
    store: &mut DescriptorStore,
    old_name: &str,
    new_name: &str,
) -> PropagateResult<Vec<PropagateWarning>> {
    if old_name == new_name {
        return Ok(Vec::new());
    }

    let mut warnings = Vec::new();
    let mut supertype_fixes: Vec<String> = Vec::new();
    let mut range_fixes: Vec<(String, String)> = Vec::new();
    let shadow_backed;
    {
        let resolver = TypeMergeResolver::new(store);
        if resolver.local_type(old_name).is_none() {
            return Err(PropagateError::NotLocal {
                name: old_name.to_string(),
            });
        }
        if resolver.local_type(new_name).is_some() {
            return Err(PropagateError::DuplicateLocalName {
                name: new_name.to_string(),
            });
        }
        shadow_backed = resolver.is_imported(old_name) || resolver.is_built_in(old_name);

        if shadow_backed {
            warnings.push(PropagateWarning::ShadowRemains {
                name: old_name.to_string(),
            });
        } else {
            for merged in resolver.merged_types() {
                let local = resolver.local_type(&merged.name);

                if merged.supertype_name.as_deref() == Some(old_name) {
                    match local {
                        Some(ltd) if ltd.supertype_name.as_deref() == Some(old_name) => {
                            supertype_fixes.push(merged.name.clone());
                            if resolver.is_imported(&merged.name) {
                                warnings.push(PropagateWarning::ImportShadowRetained {
                                    type_name: merged.name.clone(),
                                    mention: MentionKind::Supertype,
                                });
                            }
                        }
                        _ => warnings.push(PropagateWarning::UnreachableUpdate {
                            type_name: merged.name.clone(),
                            mention: MentionKind::Supertype,
                        }),
                    }
                }

                for mf in &merged.features {
                    if mf.feature.range_type_name != old_name {
                        continue;
                    }
                    if mf.editable {
                        range_fixes.push((merged.name.clone(), mf.feature.name.clone()));
                        let imported_copy =
                            resolver.imported_feature(&merged.name, &mf.feature.name);
                        if imported_copy.is_some_and(|f| f.range_type_name == old_name) {
                            warnings.push(PropagateWarning::ImportShadowRetained {
                                type_name: merged.name.clone(),
                                mention: MentionKind::FeatureRange {
                                    feature: mf.feature.name.clone(),
                                },
                            });
                        }
                    } else {
                        warnings.push(PropagateWarning::UnreachableUpdate {
                            type_name: merged.name.clone(),
                            mention: MentionKind::FeatureRange {
                                feature: mf.feature.name.clone(),
                            },
                        });
                    }
                }
            }
        }
    }

    for type_name in &supertype_fixes {
        if let Some(td) = store.local_types_mut().get_mut(type_name) {
            td.supertype_name = Some(new_name.to_string());
        }
    }
    for (type_name, feature_name) in &range_fixes {
        if let Some(fd) = store
            .local_types_mut()
            .get_mut(type_name)
            .and_then(|td| td.feature_mut(feature_name))
        {
            fd.range_type_name = new_name.to_string();
        }
    }
    if let Some(td) = store.local_types_mut().get_mut(old_name) {
        td.name = new_name.to_string();
    }
    if !shadow_backed {
        rename_type_mentions(store, old_name, new_name);
    }

    for w in &warnings {
        warn!(?w, "rename left part of the model for manual update");
    }
    debug!(
        old_name,
        new_name,
        supertypes = supertype_fixes.len(),
        ranges = range_fixes.len(),
        "renamed type"
    );
    Ok(warnings)
}

fn rename_type_mentions(store: &mut DescriptorStore, old_name: &str, new_name: &str) {
    let prefix = format!("{old_name}{FEATURE_SEPARATOR}");
    for c in store.capabilities_mut() {
        for items in [&mut c.inputs, &mut c.outputs] {
            for tf in items.iter_mut() {
                match tf {
                    TypeOrFeature::Type { name, .. } if name == old_name => {
                        *name = new_name.to_string();
                    }
                    TypeOrFeature::Feature { name } if name.starts_with(&prefix) => {
                        let renamed = full_feature_name(new_name, &name[prefix.len()..]);
                        *name = renamed;
                    }
                    _ => {}
                }
            }
        }
    }
    for ix in &mut store.indexes_mut().indexes {
        if ix.type_name == old_name {
            ix.type_name = new_name.to_string();
        }
    }
    for pl in &mut store.type_priorities_mut().priority_lists {
        for t in &mut pl.types {
            if t == old_name {
                *t = new_name.to_string();
            }
        }
    }
}

/// Renames a locally declared feature and propagates the new name into
/// capability feature entries and index keys.
///
/// If the old name is still declared by an import or the built-in
/// catalog, only the local declaration is renamed: the shadow feature
/// keeps the old name, both are present in the merged view afterwards,
/// mentions stay bound to the old name, and
/// [`PropagateWarning::ShadowRemains`] is reported.
pub fn rename_feature(
    store: &mut DescriptorStore,
    type_name: &str,
    old_name: &str,
    new_name: &str,
) -> PropagateResult<Vec<PropagateWarning>> {
    if old_name == new_name {
        return Ok(Vec::new());
    }

    let shadow_backed;
    {
        let resolver = TypeMergeResolver::new(store);
        let Some(local) = resolver.local_type(type_name) else {
            return Err(PropagateError::NotLocal {
                name: full_feature_name(type_name, old_name),
            });
        };
        if local.feature(old_name).is_none() {
            return Err(PropagateError::NotLocal {
                name: full_feature_name(type_name, old_name),
            });
        }
        if local.feature(new_name).is_some() {
            return Err(PropagateError::DuplicateLocalName {
                name: full_feature_name(type_name, new_name),
            });
        }
        shadow_backed = resolver.is_imported_feature(type_name, old_name)
            || resolver.is_built_in_feature(type_name, old_name);
    }

    if let Some(fd) = store
        .local_types_mut()
        .get_mut(type_name)
        .and_then(|td| td.feature_mut(old_name))
    {
        fd.name = new_name.to_string();
    }

    if shadow_backed {
        let name = full_feature_name(type_name, old_name);
        warn!(%name, "renamed feature still provided by an import or built-in");
        return Ok(vec![PropagateWarning::ShadowRemains { name }]);
    }

    let old_full = full_feature_name(type_name, old_name);
    let new_full = full_feature_name(type_name, new_name);
    for c in store.capabilities_mut() {
        for items in [&mut c.inputs, &mut c.outputs] {
            for tf in items.iter_mut() {
                if let TypeOrFeature::Feature { name } = tf {
                    if *name == old_full {
                        *name = new_full.clone();
                    }
                }
            }
        }
    }
    for ix in &mut store.indexes_mut().indexes {
        if ix.type_name != type_name {
            continue;
        }
        for key in &mut ix.keys {
            if let annokit_types::FsIndexKeyDescription::Feature { feature_name, .. } = key {
                if feature_name == old_name {
                    *feature_name = new_name.to_string();
                }
            }
        }
    }
    debug!(type_name, old_name, new_name, "renamed feature");
    Ok(Vec::new())
}

// ── Removals (two-phase) ─────────────────────────────────────────

/// Enumerates everything that removing the local declaration of
/// `type_name` would change. Pure: the store is not modified.
///
/// If the type would become undeclared while other types still require
/// it, the removal is refused with [`PropagateError::DependentTypes`].
pub fn plan_remove_type(
    store: &DescriptorStore,
    type_name: &str,
) -> PropagateResult<CascadePlan> {
    let resolver = TypeMergeResolver::new(store);
    if resolver.local_type(type_name).is_none() {
        return Err(PropagateError::NotLocal {
            name: type_name.to_string(),
        });
    }
    let survives = resolver.is_imported(type_name) || resolver.is_built_in(type_name);

    let mut plan = CascadePlan {
        subject: CascadeSubject::Type {
            name: type_name.to_string(),
        },
        merged_survives: survives,
        vanishing_features: Vec::new(),
        capability_edits: Vec::new(),
        index_edits: Vec::new(),
        priority_edits: Vec::new(),
    };

    if survives {
        // The merged type persists; only features with no other
        // provider disappear, and only their mentions cascade.
        let vanishing = resolver.vanishing_features(type_name);
        for feature_name in &vanishing {
            collect_feature_edits(store, type_name, feature_name, &mut plan);
        }
        plan.vanishing_features = vanishing;
    } else {
        let dependents = dependent_types(store, type_name);
        if !dependents.is_empty() {
            return Err(PropagateError::DependentTypes {
                type_name: type_name.to_string(),
                dependents,
            });
        }
        let prefix = format!("{type_name}{FEATURE_SEPARATOR}");
        for (ci, c) in store.capabilities().iter().enumerate() {
            for (items, direction) in
                [(&c.inputs, Direction::Input), (&c.outputs, Direction::Output)]
            {
                for tf in items {
                    let mentions = (tf.is_type() && tf.name() == type_name)
                        || tf.name().starts_with(&prefix);
                    if mentions {
                        plan.capability_edits.push(CapabilityEdit {
                            capability: ci,
                            direction,
                            entry: tf.name().to_string(),
                        });
                    }
                }
            }
        }
        for ix in &store.indexes().indexes {
            if ix.type_name == type_name {
                plan.index_edits.push(IndexEdit::RemoveIndex {
                    label: ix.label.clone(),
                });
            }
        }
        for (li, pl) in store.type_priorities().priority_lists.iter().enumerate() {
            if pl.contains(type_name) {
                plan.priority_edits.push(PriorityEdit {
                    list: li,
                    type_name: type_name.to_string(),
                });
            }
        }
    }

    debug!(
        type_name,
        survives,
        capability_edits = plan.capability_edits.len(),
        index_edits = plan.index_edits.len(),
        priority_edits = plan.priority_edits.len(),
        "planned type removal"
    );
    Ok(plan)
}

/// Enumerates everything that removing the local declaration of a
/// feature would change. Pure: the store is not modified.
pub fn plan_remove_feature(
    store: &DescriptorStore,
    type_name: &str,
    feature_name: &str,
) -> PropagateResult<CascadePlan> {
    let resolver = TypeMergeResolver::new(store);
    let has_local = resolver
        .local_type(type_name)
        .is_some_and(|td| td.feature(feature_name).is_some());
    if !has_local {
        return Err(PropagateError::NotLocal {
            name: full_feature_name(type_name, feature_name),
        });
    }
    let survives = resolver.is_imported_feature(type_name, feature_name)
        || resolver.is_built_in_feature(type_name, feature_name);

    let mut plan = CascadePlan {
        subject: CascadeSubject::Feature {
            type_name: type_name.to_string(),
            feature_name: feature_name.to_string(),
        },
        merged_survives: survives,
        vanishing_features: Vec::new(),
        capability_edits: Vec::new(),
        index_edits: Vec::new(),
        priority_edits: Vec::new(),
    };
    if !survives {
        collect_feature_edits(store, type_name, feature_name, &mut plan);
    }
    Ok(plan)
}

fn collect_feature_edits(
    store: &DescriptorStore,
    type_name: &str,
    feature_name: &str,
    plan: &mut CascadePlan,
) {
    let full = full_feature_name(type_name, feature_name);
    for (ci, c) in store.capabilities().iter().enumerate() {
        for (items, direction) in [(&c.inputs, Direction::Input), (&c.outputs, Direction::Output)]
        {
            for tf in items {
                if !tf.is_type() && tf.name() == full {
                    plan.capability_edits.push(CapabilityEdit {
                        capability: ci,
                        direction,
                        entry: full.clone(),
                    });
                }
            }
        }
    }
    for ix in &store.indexes().indexes {
        if ix.type_name == type_name
            && ix
                .keys
                .iter()
                .any(|k| k.feature_name() == Some(feature_name))
        {
            plan.index_edits.push(IndexEdit::RemoveKeys {
                label: ix.label.clone(),
                feature_name: feature_name.to_string(),
            });
        }
    }
}

/// Applies a confirmed cascade plan: removes the local declaration and
/// every entry the plan enumerated. Infallible — all validation
/// happened during planning — so a confirmed cascade never partially
/// completes.
pub fn apply_cascade(store: &mut DescriptorStore, plan: &CascadePlan) {
    match &plan.subject {
        CascadeSubject::Type { name } => {
            store.local_types_mut().remove_type(name);
        }
        CascadeSubject::Feature {
            type_name,
            feature_name,
        } => {
            if let Some(td) = store.local_types_mut().get_mut(type_name) {
                td.features.retain(|f| f.name != *feature_name);
            }
        }
    }

    for edit in &plan.capability_edits {
        if let Some(c) = store.capabilities_mut().get_mut(edit.capability) {
            let items = match edit.direction {
                Direction::Input => &mut c.inputs,
                Direction::Output => &mut c.outputs,
            };
            items.retain(|tf| tf.name() != edit.entry);
        }
    }
    for edit in &plan.index_edits {
        match edit {
            IndexEdit::RemoveIndex { label } => {
                store.indexes_mut().indexes.retain(|ix| ix.label != *label);
            }
            IndexEdit::RemoveKeys {
                label,
                feature_name,
            } => {
                if let Some(ix) = store
                    .indexes_mut()
                    .indexes
                    .iter_mut()
                    .find(|ix| ix.label == *label)
                {
                    ix.keys
                        .retain(|k| k.feature_name() != Some(feature_name.as_str()));
                }
            }
        }
    }
    for edit in &plan.priority_edits {
        if let Some(pl) = store
            .type_priorities_mut()
            .priority_lists
            .get_mut(edit.list)
        {
            pl.types.retain(|t| *t != edit.type_name);
        }
    }
}

/// Plans a type removal, asks `decide` for confirmation when the plan
/// cascades, and applies it on [`CascadeDecision::Proceed`]. An abort
/// leaves the model completely unchanged.
pub fn remove_type_with<F>(
    store: &mut DescriptorStore,
    type_name: &str,
    decide: F,
) -> PropagateResult<CascadeOutcome>
where
    F: FnOnce(&CascadePlan) -> CascadeDecision,
{
    let plan = plan_remove_type(store, type_name)?;
    if plan.requires_confirmation() && decide(&plan) == CascadeDecision::Abort {
        debug!(type_name, "type removal aborted by caller");
        return Ok(CascadeOutcome::Aborted { plan });
    }
    apply_cascade(store, &plan);
    Ok(CascadeOutcome::Applied { plan })
}

/// Plans a feature removal, asks `decide` for confirmation when the
/// plan cascades, and applies it on [`CascadeDecision::Proceed`].
pub fn remove_feature_with<F>(
    store: &mut DescriptorStore,
    type_name: &str,
    feature_name: &str,
    decide: F,
) -> PropagateResult<CascadeOutcome>
where
    F: FnOnce(&CascadePlan) -> CascadeDecision,
{
    let plan = plan_remove_feature(store, type_name, feature_name)?;
    if plan.requires_confirmation() && decide(&plan) == CascadeDecision::Abort {
        debug!(type_name, feature_name, "feature removal aborted by caller");
        return Ok(CascadeOutcome::Aborted { plan });
    }
    apply_cascade(store, &plan);
    Ok(CascadeOutcome::Applied { plan })
}

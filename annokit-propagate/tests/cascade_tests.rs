mod common;

use annokit_merge::TypeMergeResolver;
use annokit_propagate::{
    apply_cascade, dependent_types, is_feature_in_use_elsewhere, is_type_in_use_elsewhere,
    plan_remove_feature, plan_remove_type, remove_feature_with, remove_type_with, CascadeDecision,
    CascadeOutcome, IndexEdit, PropagateError,
};
use annokit_store::DescriptorStore;
use annokit_types::names::{TYPE_ANNOTATION, TYPE_INTEGER, TYPE_STRING};
use annokit_types::{Capability, TypeOrFeature};
use common::{import_tree, local_feature, local_type, priority_list, snapshot, sorted_index};
use pretty_assertions::assert_eq;
use std::cell::Cell;

/// A store where demo.Alpha is referenced by a capability, an index,
/// and a priority list.
fn store_with_alpha_in_use() -> DescriptorStore {
    let mut store = DescriptorStore::new();
    local_type(&mut store, "demo.Alpha", TYPE_ANNOTATION);
    local_feature(&mut store, "demo.Alpha", "score", TYPE_INTEGER);

    let mut c = Capability::new();
    c.inputs.push(TypeOrFeature::type_entry("demo.Alpha"));
    c.outputs
        .push(TypeOrFeature::feature_entry("demo.Alpha", "score"));
    c.outputs.push(TypeOrFeature::type_entry("demo.Keep"));
    store.capabilities_mut().push(c);

    store
        .indexes_mut()
        .indexes
        .push(sorted_index("alpha-index", "demo.Alpha", "score"));
    store
        .indexes_mut()
        .indexes
        .push(sorted_index("keep-index", "demo.Keep", "kind"));
    priority_list(&mut store, &["demo.Alpha", "demo.Keep"]);
    store
}

// ── In-use queries ───────────────────────────────────────────────

#[test]
fn in_use_queries_cover_all_three_structures() {
    let store = store_with_alpha_in_use();
    assert!(is_type_in_use_elsewhere(&store, "demo.Alpha"));
    assert!(!is_type_in_use_elsewhere(&store, "demo.Nowhere"));
    assert!(is_feature_in_use_elsewhere(&store, "demo.Alpha", "score"));
    assert!(!is_feature_in_use_elsewhere(&store, "demo.Alpha", "other"));
}

#[test]
fn dependent_types_finds_supertype_and_range_users() {
    let mut store = DescriptorStore::new();
    local_type(&mut store, "demo.Alpha", TYPE_ANNOTATION);
    local_type(&mut store, "demo.Sub", "demo.Alpha");
    local_type(&mut store, "demo.User", TYPE_ANNOTATION);
    local_feature(&mut store, "demo.User", "ref", "demo.Alpha");
    local_type(&mut store, "demo.Bystander", TYPE_ANNOTATION);

    let deps = dependent_types(&store, "demo.Alpha");
    assert_eq!(deps, vec!["demo.Sub".to_string(), "demo.User".to_string()]);
}

// ── plan_remove_type ─────────────────────────────────────────────

#[test]
fn plan_enumerates_every_affected_entry_without_mutating() {
    let store = store_with_alpha_in_use();
    let before = snapshot(&store);

    let plan = plan_remove_type(&store, "demo.Alpha").expect("plan");
    assert!(plan.requires_confirmation());
    assert!(!plan.merged_survives);
    assert_eq!(plan.capability_edits.len(), 2);
    assert_eq!(
        plan.index_edits,
        vec![IndexEdit::RemoveIndex {
            label: "alpha-index".to_string()
        }]
    );
    assert_eq!(plan.priority_edits.len(), 1);

    // planning is pure
    assert_eq!(snapshot(&store), before);
}

#[test]
fn removal_with_dependent_types_is_refused() {
    let mut store = DescriptorStore::new();
    local_type(&mut store, "demo.Alpha", TYPE_ANNOTATION);
    local_type(&mut store, "demo.Sub", "demo.Alpha");

    let err = plan_remove_type(&store, "demo.Alpha").unwrap_err();
    assert_eq!(
        err,
        PropagateError::DependentTypes {
            type_name: "demo.Alpha".to_string(),
            dependents: vec!["demo.Sub".to_string()],
        }
    );
}

#[test]
fn removing_a_non_local_type_is_rejected() {
    let mut store = DescriptorStore::new();
    store.add_import(
        "alpha-ts",
        import_tree(&[("demo.Alpha", TYPE_ANNOTATION, &[])]),
    );
    let err = plan_remove_type(&store, "demo.Alpha").unwrap_err();
    assert!(matches!(err, PropagateError::NotLocal { .. }));
}

// ── Cascade atomicity ────────────────────────────────────────────

#[test]
fn declined_type_cascade_changes_nothing() {
    let mut store = store_with_alpha_in_use();
    let before = snapshot(&store);

    let outcome =
        remove_type_with(&mut store, "demo.Alpha", |_| CascadeDecision::Abort).expect("outcome");
    assert!(matches!(outcome, CascadeOutcome::Aborted { .. }));
    assert_eq!(snapshot(&store), before);
}

#[test]
fn confirmed_type_cascade_completes_fully() {
    let mut store = store_with_alpha_in_use();
    let outcome = remove_type_with(&mut store, "demo.Alpha", |_| CascadeDecision::Proceed)
        .expect("outcome");
    assert!(matches!(outcome, CascadeOutcome::Applied { .. }));

    assert!(!store.local_types().contains("demo.Alpha"));
    let c = &store.capabilities()[0];
    assert!(!c.has_input("demo.Alpha"));
    assert!(!c.has_output("demo.Alpha:score"));
    assert!(c.has_output("demo.Keep"));
    assert!(store.indexes().get("alpha-index").is_none());
    assert!(store.indexes().get("keep-index").is_some());
    assert_eq!(
        store.type_priorities().priority_lists[0].types,
        vec!["demo.Keep".to_string()]
    );
}

#[test]
fn unreferenced_removal_skips_the_confirmation() {
    let mut store = DescriptorStore::new();
    local_type(&mut store, "demo.Alpha", TYPE_ANNOTATION);

    let asked = Cell::new(false);
    let outcome = remove_type_with(&mut store, "demo.Alpha", |_| {
        asked.set(true);
        CascadeDecision::Abort
    })
    .expect("outcome");

    assert!(!asked.get());
    assert!(matches!(outcome, CascadeOutcome::Applied { .. }));
    assert!(!store.local_types().contains("demo.Alpha"));
}

// ── Feature removal ──────────────────────────────────────────────

#[test]
fn declined_feature_cascade_leaves_the_index_key_intact() {
    // Scenario: feature score of demo.Alpha is referenced by an index
    // key; the user declines the cascade confirmation.
    let mut store = store_with_alpha_in_use();
    let before = snapshot(&store);

    let outcome = remove_feature_with(&mut store, "demo.Alpha", "score", |_| {
        CascadeDecision::Abort
    })
    .expect("outcome");
    assert!(matches!(outcome, CascadeOutcome::Aborted { .. }));

    assert_eq!(snapshot(&store), before);
    assert_eq!(
        store.indexes().indexes[0].keys[0].feature_name(),
        Some("score")
    );
    assert!(store
        .local_types()
        .get("demo.Alpha")
        .and_then(|td| td.feature("score"))
        .is_some());
}

#[test]
fn confirmed_feature_cascade_removes_entries_and_keys() {
    let mut store = store_with_alpha_in_use();
    let outcome = remove_feature_with(&mut store, "demo.Alpha", "score", |_| {
        CascadeDecision::Proceed
    })
    .expect("outcome");
    assert!(matches!(outcome, CascadeOutcome::Applied { .. }));

    assert!(store
        .local_types()
        .get("demo.Alpha")
        .and_then(|td| td.feature("score"))
        .is_none());
    assert!(!store.capabilities()[0].has_output("demo.Alpha:score"));
    // the index itself survives, only the key goes
    let ix = store.indexes().get("alpha-index").expect("index survives");
    assert!(ix.keys.is_empty());
}

// ── Import/built-in-backed subjects ──────────────────────────────

#[test]
fn removing_an_import_backed_type_keeps_the_merged_entity_and_dependents() {
    let mut store = store_with_alpha_in_use();
    store.add_import(
        "alpha-ts",
        import_tree(&[("demo.Alpha", TYPE_ANNOTATION, &[])]),
    );

    let plan = plan_remove_type(&store, "demo.Alpha").expect("plan");
    assert!(plan.merged_survives);
    // the locally exclusive feature disappears, so its mentions cascade
    assert_eq!(plan.vanishing_features, vec!["score".to_string()]);
    assert_eq!(plan.capability_edits.len(), 1); // demo.Alpha:score output
    assert_eq!(
        plan.index_edits,
        vec![IndexEdit::RemoveKeys {
            label: "alpha-index".to_string(),
            feature_name: "score".to_string(),
        }]
    );
    // the type itself persists: no type-entry, index, or priority edits
    assert!(plan.priority_edits.is_empty());

    apply_cascade(&mut store, &plan);

    assert!(!store.local_types().contains("demo.Alpha"));
    let resolver = TypeMergeResolver::new(&store);
    assert!(resolver.merged_type("demo.Alpha").is_some());

    // dependents stay bound to the surviving merged type
    assert!(store.capabilities()[0].has_input("demo.Alpha"));
    assert!(store.indexes().get("alpha-index").is_some());
    assert!(store.type_priorities().priority_lists[0].contains("demo.Alpha"));
}

#[test]
fn removing_an_import_backed_feature_needs_no_cascade() {
    let mut store = DescriptorStore::new();
    local_type(&mut store, "demo.Token", TYPE_ANNOTATION);
    local_feature(&mut store, "demo.Token", "pos", TYPE_STRING);
    store.add_import(
        "token-ts",
        import_tree(&[("demo.Token", TYPE_ANNOTATION, &[("pos", TYPE_STRING)])]),
    );
    let mut c = Capability::new();
    c.inputs
        .push(TypeOrFeature::feature_entry("demo.Token", "pos"));
    store.capabilities_mut().push(c);

    let plan = plan_remove_feature(&store, "demo.Token", "pos").expect("plan");
    assert!(plan.merged_survives);
    assert!(!plan.requires_confirmation());

    apply_cascade(&mut store, &plan);

    // local copy gone, shadow remains, mention still bound
    let resolver = TypeMergeResolver::new(&store);
    let merged = resolver.merged_type("demo.Token").expect("merged");
    let pos = merged.feature("pos").expect("shadow feature");
    assert!(!pos.editable);
    assert!(store.capabilities()[0].has_input("demo.Token:pos"));
}

#[test]
fn removing_a_non_local_feature_is_rejected() {
    let mut store = DescriptorStore::new();
    local_type(&mut store, "demo.Token", TYPE_ANNOTATION);
    let err = plan_remove_feature(&store, "demo.Token", "ghost").unwrap_err();
    assert_eq!(
        err,
        PropagateError::NotLocal {
            name: "demo.Token:ghost".to_string()
        }
    );
}

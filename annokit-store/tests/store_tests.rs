use annokit_store::{builtin_catalog, DelegateSpecifier, DescriptorStore};
use annokit_types::names::{TYPE_ANNOTATION, TYPE_INTEGER, TYPE_STRING, TYPE_TOP};
use annokit_types::{
    ConfigurationParameter, ConfigurationParameterDeclarations, ParameterType,
    TypeDescription, TypeSystemDescription,
};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fn import_with(type_name: &str) -> TypeSystemDescription {
    let mut ts = TypeSystemDescription::new();
    ts.push_type(TypeDescription::new(type_name, TYPE_ANNOTATION, None));
    ts
}

// ── Built-in catalog ─────────────────────────────────────────────

#[test]
fn catalog_contains_the_root_and_primitives() {
    let catalog = builtin_catalog();
    let top = catalog.get(TYPE_TOP).expect("root type");
    assert_eq!(top.supertype_name, None);
    assert!(catalog.contains(TYPE_STRING));
    assert!(catalog.contains(TYPE_INTEGER));
}

#[test]
fn catalog_annotation_carries_offsets() {
    let catalog = builtin_catalog();
    let annotation = catalog.get(TYPE_ANNOTATION).expect("annotation type");
    assert_eq!(
        annotation.feature("begin").map(|f| f.range_type_name.as_str()),
        Some(TYPE_INTEGER)
    );
    assert_eq!(
        annotation.feature("end").map(|f| f.range_type_name.as_str()),
        Some(TYPE_INTEGER)
    );
}

#[test]
fn new_store_uses_the_standard_catalog() {
    let store = DescriptorStore::new();
    assert!(store.builtins().contains(TYPE_ANNOTATION));
}

// ── Imports ──────────────────────────────────────────────────────

#[test]
fn imports_get_distinct_session_ids() {
    let mut store = DescriptorStore::new();
    let a = store.add_import("typesystem-a", import_with("a.TypeA"));
    let b = store.add_import("typesystem-b", import_with("b.TypeB"));
    assert_ne!(a, b);
    assert_eq!(store.imports().len(), 2);
    assert_eq!(store.imports()[0].location, "typesystem-a");
}

#[test]
fn refresh_import_replaces_the_tree() {
    let mut store = DescriptorStore::new();
    let id = store.add_import("typesystem-a", import_with("a.TypeA"));
    assert!(store.refresh_import(id, import_with("a.TypeB")));
    assert!(store.imports()[0].types.contains("a.TypeB"));
    assert!(!store.imports()[0].types.contains("a.TypeA"));
}

#[test]
fn unresolved_import_does_not_drop_resolved_state() {
    let mut store = DescriptorStore::new();
    store.add_import("typesystem-a", import_with("a.TypeA"));
    store.mark_import_unresolved("typesystem-b", "file not found");

    assert_eq!(store.imports().len(), 1);
    assert_eq!(store.unresolved_imports().len(), 1);
    assert_eq!(store.unresolved_imports()[0].location, "typesystem-b");
}

#[test]
fn unresolved_import_surfaces_as_a_store_error() {
    let mut store = DescriptorStore::new();
    store.mark_import_unresolved("typesystem-b", "file not found");
    let err = store.unresolved_imports()[0].as_error();
    assert_eq!(
        err.to_string(),
        "import unresolved: typesystem-b: file not found"
    );
}

// ── Delegates ────────────────────────────────────────────────────

fn decls_with(name: &str) -> ConfigurationParameterDeclarations {
    let mut decls = ConfigurationParameterDeclarations::new();
    decls
        .parameters
        .push(ConfigurationParameter::new(name, ParameterType::String));
    decls
}

#[test]
fn delegate_entries_flatten_nested_aggregates() {
    let mut store = DescriptorStore::new();
    let mut inner = BTreeMap::new();
    inner.insert(
        "tagger".to_string(),
        DelegateSpecifier::primitive(decls_with("model")),
    );
    store.add_delegate(
        "pipeline",
        DelegateSpecifier::Aggregate {
            parameters: decls_with("flow"),
            delegates: inner,
        },
    );
    store.add_delegate("tokenizer", DelegateSpecifier::primitive(decls_with("mode")));

    let entries = store.delegate_entries();
    let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["pipeline", "pipeline/tagger", "tokenizer"]);

    let (_, nested) = &entries[1];
    assert!(nested.parameters().contains_parameter_name("model"));
}

#[test]
fn delegate_lookup_by_key() {
    let mut store = DescriptorStore::new();
    store.add_delegate("tokenizer", DelegateSpecifier::primitive(decls_with("mode")));

    let delegate = store.delegate("tokenizer").expect("registered key");
    assert!(delegate.parameters().contains_parameter_name("mode"));
    assert!(store.delegate("ghost").is_err());
}

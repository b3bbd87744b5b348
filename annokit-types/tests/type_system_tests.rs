use annokit_types::names::{
    self, TYPE_INTEGER, TYPE_RECORD_ARRAY, TYPE_STRING, TYPE_STRING_ARRAY, TYPE_TOP,
};
use annokit_types::{AllowedValue, FeatureDescription, TypeDescription, TypeSystemDescription};
use pretty_assertions::assert_eq;

fn token_type() -> TypeDescription {
    TypeDescription::new("demo.Token", "base.Annotation", Some("A token.".into()))
        .with_feature(FeatureDescription::new("pos", TYPE_STRING))
        .with_feature(FeatureDescription::new("length", TYPE_INTEGER))
}

// ── Name helpers ─────────────────────────────────────────────────

#[test]
fn full_feature_name_joins_with_colon() {
    assert_eq!(names::full_feature_name("demo.Token", "pos"), "demo.Token:pos");
}

#[test]
fn split_feature_name_roundtrip() {
    assert_eq!(
        names::split_feature_name("demo.Token:pos"),
        Some(("demo.Token", "pos"))
    );
    assert_eq!(names::split_feature_name("demo.Token"), None);
}

#[test]
fn short_name_and_namespace() {
    assert_eq!(names::short_type_name("demo.nlp.Token"), "Token");
    assert_eq!(names::namespace("demo.nlp.Token"), "demo.nlp");
    assert_eq!(names::short_type_name("Token"), "Token");
    assert_eq!(names::namespace("Token"), "");
}

#[test]
fn array_and_list_classification() {
    assert!(names::is_array_or_list_type(TYPE_STRING_ARRAY));
    assert!(names::is_array_or_list_type(TYPE_RECORD_ARRAY));
    assert!(!names::is_array_or_list_type(TYPE_STRING));
    assert!(names::is_record_array_or_list_type(TYPE_RECORD_ARRAY));
    assert!(!names::is_record_array_or_list_type(TYPE_STRING_ARRAY));
}

#[test]
fn indexable_ranges() {
    assert!(names::is_indexable_range(TYPE_INTEGER));
    assert!(names::is_indexable_range(TYPE_STRING));
    assert!(!names::is_indexable_range(TYPE_RECORD_ARRAY));
    assert!(!names::is_indexable_range(TYPE_TOP));
}

// ── TypeDescription ──────────────────────────────────────────────

#[test]
fn feature_lookup_by_short_name() {
    let td = token_type();
    assert_eq!(td.feature("pos").map(|f| f.range_type_name.as_str()), Some(TYPE_STRING));
    assert!(td.feature("missing").is_none());
}

#[test]
fn string_subtype_detection() {
    let td = TypeDescription::new("demo.PosTag", TYPE_STRING, None);
    assert!(td.is_string_subtype());
    assert!(!token_type().is_string_subtype());
}

#[test]
fn allowed_value_lookup() {
    let mut td = TypeDescription::new("demo.PosTag", TYPE_STRING, None);
    td.allowed_values.push(AllowedValue::new("NOUN", None));
    assert!(td.allowed_value("NOUN").is_some());
    assert!(td.allowed_value("VERB").is_none());
}

// ── FeatureDescription::normalize ────────────────────────────────

#[test]
fn normalize_clears_element_type_for_plain_range() {
    let mut fd = FeatureDescription::new("pos", TYPE_STRING).with_element_type("demo.Token");
    fd.multiple_references_allowed = Some(true);
    fd.normalize();
    assert_eq!(fd.element_type, None);
    assert_eq!(fd.multiple_references_allowed, None);
}

#[test]
fn normalize_keeps_element_type_for_record_array() {
    let mut fd = FeatureDescription::new("parts", TYPE_RECORD_ARRAY).with_element_type("demo.Token");
    fd.multiple_references_allowed = Some(false);
    fd.normalize();
    assert_eq!(fd.element_type.as_deref(), Some("demo.Token"));
    assert_eq!(fd.multiple_references_allowed, Some(false));
}

#[test]
fn normalize_keeps_multi_ref_for_plain_array() {
    let mut fd = FeatureDescription::new("tags", TYPE_STRING_ARRAY);
    fd.multiple_references_allowed = Some(true);
    fd.element_type = Some("demo.Token".into());
    fd.normalize();
    assert_eq!(fd.multiple_references_allowed, Some(true));
    // element type only applies to record arrays/lists
    assert_eq!(fd.element_type, None);
}

// ── TypeSystemDescription ────────────────────────────────────────

#[test]
fn get_and_remove_by_name() {
    let mut ts = TypeSystemDescription::new();
    ts.push_type(token_type());
    assert!(ts.contains("demo.Token"));
    let removed = ts.remove_type("demo.Token");
    assert_eq!(removed.map(|t| t.name), Some("demo.Token".to_string()));
    assert!(!ts.contains("demo.Token"));
    assert!(ts.remove_type("demo.Token").is_none());
}

// ── Serde contract ───────────────────────────────────────────────

#[test]
fn type_description_serde_roundtrip() {
    let original = token_type();
    let json = serde_json::to_string(&original).unwrap();
    let parsed: TypeDescription = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, original);
}

#[test]
fn optional_fields_are_omitted_when_empty() {
    let td = TypeDescription::new("demo.Span", TYPE_TOP, None);
    let json = serde_json::to_value(&td).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"name": "demo.Span", "supertype_name": "base.Top"})
    );
}

#[test]
fn tri_state_multi_ref_distinguishes_unset_from_false() {
    let mut fd = FeatureDescription::new("tags", TYPE_STRING_ARRAY);
    let unset = serde_json::to_value(&fd).unwrap();
    assert!(unset.get("multiple_references_allowed").is_none());

    fd.multiple_references_allowed = Some(false);
    let set_false = serde_json::to_value(&fd).unwrap();
    assert_eq!(
        set_false.get("multiple_references_allowed"),
        Some(&serde_json::Value::Bool(false))
    );
}

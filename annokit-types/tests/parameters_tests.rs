use annokit_types::{
    ConfigurationGroup, ConfigurationParameter, ConfigurationParameterDeclarations, GroupKey,
    ParameterType,
};
use pretty_assertions::assert_eq;

fn parm(name: &str, pt: ParameterType) -> ConfigurationParameter {
    ConfigurationParameter::new(name, pt)
}

fn sample_declarations() -> ConfigurationParameterDeclarations {
    let mut decls = ConfigurationParameterDeclarations::new();
    decls.parameters.push(parm("verbose", ParameterType::Boolean));
    decls
        .common_parameters
        .push(parm("model_path", ParameterType::String));
    let mut g1 = ConfigurationGroup::new(["english", "german"]);
    g1.parameters.push(parm("threshold", ParameterType::Float));
    let mut g2 = ConfigurationGroup::new(["french"]);
    g2.parameters.push(parm("lexicon", ParameterType::String));
    decls.groups.push(g1);
    decls.groups.push(g2);
    decls
}

// ── GroupKey ─────────────────────────────────────────────────────

#[test]
fn group_key_ignores_order() {
    let a = GroupKey::from_names(["english", "german"]);
    let b = GroupKey::from_names(["german", "english"]);
    assert_eq!(a, b);
}

#[test]
fn group_key_is_a_set() {
    let a = GroupKey::from_names(["english", "english", "german"]);
    let b = GroupKey::from_names(["german", "english"]);
    assert_eq!(a, b);
}

#[test]
fn group_key_inequality() {
    let a = GroupKey::from_names(["english"]);
    let b = GroupKey::from_names(["english", "german"]);
    assert_ne!(a, b);
}

#[test]
fn group_key_display_is_sorted() {
    let key = GroupKey::from_names(["german", "english"]);
    assert_eq!(key.to_string(), "english german");
}

#[test]
fn group_lookup_by_set_equality() {
    let decls = sample_declarations();
    let key = GroupKey::from_names(["german", "english"]);
    let group = decls.group(&key).expect("group should match by set");
    assert_eq!(group.names, vec!["english".to_string(), "german".to_string()]);
    assert!(decls.group(&GroupKey::from_names(["german"])).is_none());
}

// ── Declarations block ───────────────────────────────────────────

#[test]
fn iter_all_covers_every_scope() {
    let decls = sample_declarations();
    let names: Vec<&str> = decls.iter_all().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["verbose", "model_path", "threshold", "lexicon"]);
}

#[test]
fn contains_parameter_name_is_descriptor_global() {
    let decls = sample_declarations();
    assert!(decls.contains_parameter_name("verbose"));
    assert!(decls.contains_parameter_name("model_path"));
    assert!(decls.contains_parameter_name("threshold"));
    assert!(decls.contains_parameter_name("lexicon"));
    assert!(!decls.contains_parameter_name("missing"));
}

#[test]
fn all_group_names_is_the_union() {
    let decls = sample_declarations();
    assert_eq!(
        decls.all_group_names(),
        GroupKey::from_names(["english", "german", "french"])
    );
}

// ── ConfigurationParameter ───────────────────────────────────────

#[test]
fn spec_matches_requires_type_mandatory_and_multiplicity() {
    let mut a = parm("threshold", ParameterType::Float);
    let mut b = parm("other_name", ParameterType::Float);
    assert!(a.spec_matches(&b));

    b.mandatory = true;
    assert!(!a.spec_matches(&b));
    a.mandatory = true;
    assert!(a.spec_matches(&b));

    b.multi_valued = true;
    assert!(!a.spec_matches(&b));

    b.multi_valued = false;
    let c = parm("x", ParameterType::Integer);
    assert!(!a.spec_matches(&c));
}

#[test]
fn has_override_checks_exact_target() {
    let mut p = parm("threshold", ParameterType::Float);
    p.overrides.push("tagger/threshold".into());
    assert!(p.has_override("tagger/threshold"));
    assert!(!p.has_override("tagger/threshold2"));
}

#[test]
fn parameter_serde_uses_snake_case_types() {
    let p = parm("verbose", ParameterType::Boolean);
    let json = serde_json::to_value(&p).unwrap();
    assert_eq!(json.get("param_type"), Some(&serde_json::json!("boolean")));
}

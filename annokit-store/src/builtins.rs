//! The framework's fixed built-in type catalog.
//!
//! Built-in declarations are immutable from an editing session: a local
//! declaration of the same name is a partial override of the built-in
//! type, never a second type.

use annokit_types::names::{
    TYPE_ANNOTATION, TYPE_BOOLEAN, TYPE_BYTE, TYPE_DOUBLE, TYPE_FLOAT, TYPE_FLOAT_ARRAY,
    TYPE_INTEGER, TYPE_INTEGER_ARRAY, TYPE_LONG, TYPE_RECORD, TYPE_RECORD_ARRAY, TYPE_RECORD_LIST,
    TYPE_SHORT, TYPE_SOFA, TYPE_STRING, TYPE_STRING_ARRAY, TYPE_STRING_LIST, TYPE_TOP, TYPE_VIEW,
};
use annokit_types::{FeatureDescription, TypeDescription, TypeSystemDescription};

fn leaf(name: &str) -> TypeDescription {
    TypeDescription::new(name, TYPE_TOP, None)
}

/// Builds the standard built-in catalog.
#[must_use]
pub fn builtin_catalog() -> TypeSystemDescription {
    let mut ts = TypeSystemDescription {
        name: Some("base".to_string()),
        types: Vec::new(),
    };

    // The root type has no supertype.
    ts.push_type(TypeDescription {
        name: TYPE_TOP.to_string(),
        supertype_name: None,
        description: Some("The universal root type.".to_string()),
        features: Vec::new(),
        allowed_values: Vec::new(),
    });

    for name in [
        TYPE_STRING,
        TYPE_BOOLEAN,
        TYPE_BYTE,
        TYPE_SHORT,
        TYPE_INTEGER,
        TYPE_LONG,
        TYPE_FLOAT,
        TYPE_DOUBLE,
        TYPE_STRING_ARRAY,
        TYPE_INTEGER_ARRAY,
        TYPE_FLOAT_ARRAY,
        TYPE_RECORD_ARRAY,
        TYPE_STRING_LIST,
        TYPE_RECORD_LIST,
        TYPE_RECORD,
    ] {
        ts.push_type(leaf(name));
    }

    ts.push_type(
        TypeDescription::new(TYPE_ANNOTATION, TYPE_RECORD, None)
            .with_feature(FeatureDescription::new("begin", TYPE_INTEGER))
            .with_feature(FeatureDescription::new("end", TYPE_INTEGER)),
    );

    ts.push_type(
        TypeDescription::new(TYPE_SOFA, TYPE_TOP, None)
            .with_feature(FeatureDescription::new("sofa_id", TYPE_STRING))
            .with_feature(FeatureDescription::new("mime_type", TYPE_STRING)),
    );
    ts.push_type(leaf(TYPE_VIEW));

    ts
}

//! Built-in type names and name-manipulation helpers.
//!
//! Type names are fully qualified, dot-separated (`my.pkg.Token`). A
//! capability entry referring to a feature uses the combined form
//! `TypeName:featureName`.

/// Separator between a type name and a feature short name.
pub const FEATURE_SEPARATOR: char = ':';

/// The universal root type. Every supertype chain must terminate here.
pub const TYPE_TOP: &str = "base.Top";

/// The built-in string type. Types extending it may carry allowed values.
pub const TYPE_STRING: &str = "base.String";

pub const TYPE_BOOLEAN: &str = "base.Boolean";
pub const TYPE_BYTE: &str = "base.Byte";
pub const TYPE_SHORT: &str = "base.Short";
pub const TYPE_INTEGER: &str = "base.Integer";
pub const TYPE_LONG: &str = "base.Long";
pub const TYPE_FLOAT: &str = "base.Float";
pub const TYPE_DOUBLE: &str = "base.Double";

pub const TYPE_STRING_ARRAY: &str = "base.StringArray";
pub const TYPE_INTEGER_ARRAY: &str = "base.IntegerArray";
pub const TYPE_FLOAT_ARRAY: &str = "base.FloatArray";
pub const TYPE_RECORD_ARRAY: &str = "base.RecordArray";
pub const TYPE_STRING_LIST: &str = "base.StringList";
pub const TYPE_RECORD_LIST: &str = "base.RecordList";

/// The generic feature-structure type.
pub const TYPE_RECORD: &str = "base.Record";

/// The built-in annotation type (`begin`/`end` offsets into a sofa).
pub const TYPE_ANNOTATION: &str = "base.Annotation";

pub const TYPE_SOFA: &str = "base.Sofa";
pub const TYPE_VIEW: &str = "base.View";

/// Builds the combined `Type:feature` name used by capability entries.
#[must_use]
pub fn full_feature_name(type_name: &str, feature_name: &str) -> String {
    format!("{type_name}{FEATURE_SEPARATOR}{feature_name}")
}

/// Splits a combined `Type:feature` name into (type name, feature name).
#[must_use]
pub fn split_feature_name(full_name: &str) -> Option<(&str, &str)> {
    full_name.split_once(FEATURE_SEPARATOR)
}

/// Returns the last dot-separated segment of a type name.
#[must_use]
pub fn short_type_name(type_name: &str) -> &str {
    match type_name.rfind('.') {
        Some(i) => &type_name[i + 1..],
        None => type_name,
    }
}

/// Returns the namespace portion of a type name, or `""` if unqualified.
#[must_use]
pub fn namespace(type_name: &str) -> &str {
    match type_name.rfind('.') {
        Some(i) => &type_name[..i],
        None => "",
    }
}

/// True for ranges where the multiple-references-allowed flag is meaningful.
#[must_use]
pub fn is_array_or_list_type(range_type_name: &str) -> bool {
    matches!(
        range_type_name,
        TYPE_STRING_ARRAY
            | TYPE_INTEGER_ARRAY
            | TYPE_FLOAT_ARRAY
            | TYPE_RECORD_ARRAY
            | TYPE_STRING_LIST
            | TYPE_RECORD_LIST
    )
}

/// True for ranges where an element type may be specified.
#[must_use]
pub fn is_record_array_or_list_type(range_type_name: &str) -> bool {
    matches!(range_type_name, TYPE_RECORD_ARRAY | TYPE_RECORD_LIST)
}

/// True for ranges allowed as index key features.
#[must_use]
pub fn is_indexable_range(range_type_name: &str) -> bool {
    matches!(
        range_type_name,
        TYPE_BYTE
            | TYPE_SHORT
            | TYPE_INTEGER
            | TYPE_LONG
            | TYPE_FLOAT
            | TYPE_DOUBLE
            | TYPE_STRING
    )
}

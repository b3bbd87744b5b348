//! Warnings reported by rename propagation.
//!
//! Warnings are not failures: the operation completed, but part of the
//! model could not be updated (or the old name remains visible) because
//! a declaration is owned by an import or the built-in catalog.

use serde::Serialize;

/// How a type mentions the name being renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MentionKind {
    Supertype,
    FeatureRange { feature: String },
}

/// A consistency effect the caller must surface to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropagateWarning {
    /// The mentioning declaration is owned by an import or the built-in
    /// catalog and was left untouched; it must be edited in its own
    /// source.
    UnreachableUpdate {
        type_name: String,
        mention: MentionKind,
    },

    /// The local copy of the mentioning type was updated, but an
    /// imported copy of the same type still mentions the old name.
    ImportShadowRetained {
        type_name: String,
        mention: MentionKind,
    },

    /// The renamed or removed name remains in the merged view because an
    /// import or the built-in catalog still declares it. Both names are
    /// now present; downstream mentions stay bound to the old one.
    ShadowRemains { name: String },
}

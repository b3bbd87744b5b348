//! Error types for merge and local-edit operations.

use thiserror::Error;

/// Result type for merge operations.
pub type MergeResult<T> = Result<T, MergeError>;

/// Errors that can occur while merging or editing type declarations.
///
/// Recoverable errors are reported before any mutation occurs: a failed
/// operation leaves all three source trees unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// Attempt to mutate a declaration with no local counterpart.
    #[error("'{name}' is not declared locally and cannot be edited here")]
    NotLocal { name: String },

    /// A type, feature, or allowed-value name collides within the local
    /// descriptor.
    #[error("'{name}' is already declared in this descriptor")]
    DuplicateLocalName { name: String },

    /// A new feature duplicates a built-in feature of the same type.
    /// Built-in features are fixed and cannot be redeclared.
    #[error("'{name}' duplicates a built-in feature of this type")]
    BuiltInCollision { name: String },

    /// A new feature duplicates an imported feature with a different
    /// range. The imported declaration cannot be changed from here.
    #[error(
        "feature '{feature}' has range '{declared}' but an imported declaration has range '{imported}'"
    )]
    RangeMismatch {
        feature: String,
        declared: String,
        imported: String,
    },

    /// Allowed values are only valid on types whose supertype is the
    /// built-in string type.
    #[error("allowed values are not valid on '{type_name}': its supertype is not the string type")]
    InvalidAllowedValue { type_name: String },

    /// A feature used as an index key must keep an indexable range.
    #[error("feature '{feature}' is used in an index and '{range}' is not an indexable range")]
    NotIndexableRange { feature: String, range: String },

    /// A supertype chain does not terminate at the root type.
    #[error("supertype chain through '{type_name}' is cyclic")]
    CyclicSupertype { type_name: String },

    /// A referenced type is not declared in any source.
    #[error("type '{type_name}' is not declared locally, in an import, or as a built-in")]
    UnknownType { type_name: String },
}

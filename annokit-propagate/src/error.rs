//! Error types for mention propagation.

use thiserror::Error;

/// Result type for propagation operations.
pub type PropagateResult<T> = Result<T, PropagateError>;

/// Errors that can occur while renaming or removing types and features.
///
/// All are reported before any mutation occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropagateError {
    /// The subject has no local declaration; shadow copies cannot be
    /// renamed or removed from this descriptor.
    #[error("'{name}' is not declared locally and cannot be changed here")]
    NotLocal { name: String },

    /// The rename target is already declared locally.
    #[error("'{name}' is already declared locally in this descriptor")]
    DuplicateLocalName { name: String },

    /// The type would become undeclared while other types still require
    /// it (as supertype or feature range). Dependents must go first.
    #[error("type '{type_name}' is required by dependent types: {}", dependents.join(", "))]
    DependentTypes {
        type_name: String,
        dependents: Vec<String>,
    },
}

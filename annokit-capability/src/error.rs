//! Error types for capability maintenance.

use thiserror::Error;

/// Result type for capability operations.
pub type CapabilityResult<T> = Result<T, CapabilityError>;

/// Errors that can occur while maintaining capability declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    /// The all-features flag requires the type itself to be declared in
    /// the same direction; it is never created implicitly.
    #[error(
        "cannot mark all features of '{type_name}': the type is not declared in that direction"
    )]
    InvalidAllFeaturesState { type_name: String },

    /// Language tags are unique per capability set.
    #[error("language '{language}' is already declared in this capability")]
    DuplicateLanguage { language: String },
}

//! Error types for override resolution.

use thiserror::Error;

/// Result type for override operations.
pub type OverrideResult<T> = Result<T, OverrideError>;

/// Errors that can occur while resolving parameter overrides.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverrideError {
    /// An override target may be claimed by at most one parameter in the
    /// whole descriptor. The existing override must be removed first.
    #[error("'{target}' is already overridden by parameter '{parameter}'")]
    AlreadyOverridden { target: String, parameter: String },
}

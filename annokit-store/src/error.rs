//! Error types for the descriptor store.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No delegate is registered under the given key.
    #[error("unknown delegate key: {0}")]
    UnknownDelegate(String),

    /// An import target could not be read or parsed. The merge degrades
    /// to the sources that did resolve.
    #[error("import unresolved: {location}: {reason}")]
    ImportUnresolved { location: String, reason: String },
}

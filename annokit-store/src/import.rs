//! Resolved and unresolved descriptor imports.

use annokit_types::TypeSystemDescription;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one resolved import within an editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImportId(u32);

impl ImportId {
    #[must_use]
    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ImportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "import#{}", self.0)
    }
}

/// A successfully resolved import: the target's type system, re-read by
/// the surrounding framework whenever the target changes on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedImport {
    pub id: ImportId,
    /// Location string the import was declared with (name or path).
    pub location: String,
    pub types: TypeSystemDescription,
}

/// An import whose target could not be read. The merge continues with
/// the sources that did resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedImport {
    pub location: String,
    pub reason: String,
}

impl UnresolvedImport {
    /// The store error describing this import failure, for surfacing to
    /// the caller.
    #[must_use]
    pub fn as_error(&self) -> crate::StoreError {
        crate::StoreError::ImportUnresolved {
            location: self.location.clone(),
            reason: self.reason.clone(),
        }
    }
}

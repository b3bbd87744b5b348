//! The descriptor store: exclusive owner of one editing session's
//! descriptor trees.

use annokit_types::{
    Capability, ConfigurationParameterDeclarations, FsIndexCollection, SofaMapping,
    TypePriorities, TypeSystemDescription,
};
use std::collections::BTreeMap;
use tracing::warn;

use crate::builtins::builtin_catalog;
use crate::delegate::DelegateSpecifier;
use crate::error::{StoreError, StoreResult};
use crate::import::{ImportId, ResolvedImport, UnresolvedImport};

/// Owns the in-memory parse trees for a component descriptor: the local
/// tree (mutable), resolved imports (immutable from here), and the
/// built-in catalog (fixed). Also carries the descriptor's capability,
/// index, priority, and parameter declarations, and — for aggregates —
/// the resolved delegate specifiers.
///
/// The store performs no parsing or serialization; the surrounding
/// framework hands it already-parsed trees and re-reads import targets.
#[derive(Debug, Clone)]
pub struct DescriptorStore {
    local_types: TypeSystemDescription,
    imports: Vec<ResolvedImport>,
    unresolved_imports: Vec<UnresolvedImport>,
    builtins: TypeSystemDescription,
    capabilities: Vec<Capability>,
    sofa_mappings: Vec<SofaMapping>,
    indexes: FsIndexCollection,
    type_priorities: TypePriorities,
    parameters: ConfigurationParameterDeclarations,
    delegates: BTreeMap<String, DelegateSpecifier>,
    next_import: u32,
}

impl Default for DescriptorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorStore {
    /// Creates an empty store with the standard built-in catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_builtins(builtin_catalog())
    }

    /// Creates an empty store with a caller-supplied built-in catalog.
    #[must_use]
    pub fn with_builtins(builtins: TypeSystemDescription) -> Self {
        Self {
            local_types: TypeSystemDescription::new(),
            imports: Vec::new(),
            unresolved_imports: Vec::new(),
            builtins,
            capabilities: Vec::new(),
            sofa_mappings: Vec::new(),
            indexes: FsIndexCollection::new(),
            type_priorities: TypePriorities::new(),
            parameters: ConfigurationParameterDeclarations::new(),
            delegates: BTreeMap::new(),
            next_import: 0,
        }
    }

    // ── Type system sources ──────────────────────────────────────

    #[must_use]
    pub fn local_types(&self) -> &TypeSystemDescription {
        &self.local_types
    }

    pub fn local_types_mut(&mut self) -> &mut TypeSystemDescription {
        &mut self.local_types
    }

    #[must_use]
    pub fn builtins(&self) -> &TypeSystemDescription {
        &self.builtins
    }

    #[must_use]
    pub fn imports(&self) -> &[ResolvedImport] {
        &self.imports
    }

    /// Registers a resolved import and returns its session identity.
    pub fn add_import(
        &mut self,
        location: impl Into<String>,
        types: TypeSystemDescription,
    ) -> ImportId {
        let id = ImportId::new(self.next_import);
        self.next_import += 1;
        self.imports.push(ResolvedImport {
            id,
            location: location.into(),
            types,
        });
        id
    }

    /// Records an import whose target could not be read. Already-resolved
    /// imports are unaffected; the merge degrades to what did resolve.
    pub fn mark_import_unresolved(
        &mut self,
        location: impl Into<String>,
        reason: impl Into<String>,
    ) {
        let unresolved = UnresolvedImport {
            location: location.into(),
            reason: reason.into(),
        };
        warn!(
            location = %unresolved.location,
            reason = %unresolved.reason,
            "import unresolved; merge degrades to resolved sources"
        );
        self.unresolved_imports.push(unresolved);
    }

    #[must_use]
    pub fn unresolved_imports(&self) -> &[UnresolvedImport] {
        &self.unresolved_imports
    }

    /// Replaces the trees of an already-registered import (the target
    /// changed on disk and was re-read). Returns false if the id is
    /// unknown.
    pub fn refresh_import(&mut self, id: ImportId, types: TypeSystemDescription) -> bool {
        match self.imports.iter_mut().find(|imp| imp.id == id) {
            Some(imp) => {
                imp.types = types;
                true
            }
            None => false,
        }
    }

    // ── Capabilities and sofa mappings ───────────────────────────

    #[must_use]
    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    pub fn capabilities_mut(&mut self) -> &mut Vec<Capability> {
        &mut self.capabilities
    }

    #[must_use]
    pub fn sofa_mappings(&self) -> &[SofaMapping] {
        &self.sofa_mappings
    }

    pub fn sofa_mappings_mut(&mut self) -> &mut Vec<SofaMapping> {
        &mut self.sofa_mappings
    }

    // ── Indexes and priorities ───────────────────────────────────

    #[must_use]
    pub fn indexes(&self) -> &FsIndexCollection {
        &self.indexes
    }

    pub fn indexes_mut(&mut self) -> &mut FsIndexCollection {
        &mut self.indexes
    }

    #[must_use]
    pub fn type_priorities(&self) -> &TypePriorities {
        &self.type_priorities
    }

    pub fn type_priorities_mut(&mut self) -> &mut TypePriorities {
        &mut self.type_priorities
    }

    // ── Parameters and delegates ─────────────────────────────────

    #[must_use]
    pub fn parameters(&self) -> &ConfigurationParameterDeclarations {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut ConfigurationParameterDeclarations {
        &mut self.parameters
    }

    #[must_use]
    pub fn delegates(&self) -> &BTreeMap<String, DelegateSpecifier> {
        &self.delegates
    }

    /// Looks up a directly embedded delegate by key.
    pub fn delegate(&self, key: &str) -> StoreResult<&DelegateSpecifier> {
        self.delegates
            .get(key)
            .ok_or_else(|| StoreError::UnknownDelegate(key.to_string()))
    }

    /// Registers a resolved delegate under its key.
    pub fn add_delegate(&mut self, key: impl Into<String>, delegate: DelegateSpecifier) {
        self.delegates.insert(key.into(), delegate);
    }

    /// All delegates, flattened: nested aggregate delegates appear under
    /// slash-joined key paths, matching override target syntax.
    #[must_use]
    pub fn delegate_entries(&self) -> Vec<(String, &DelegateSpecifier)> {
        let mut out = Vec::new();
        for (key, delegate) in &self.delegates {
            delegate.collect_entries(key, &mut out);
        }
        out
    }
}

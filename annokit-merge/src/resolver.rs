//! Merge resolution across the local, imported, and built-in trees.

use annokit_store::DescriptorStore;
use annokit_types::names::TYPE_TOP;
use annokit_types::TypeDescription;
use std::collections::HashSet;
use tracing::debug;

use crate::error::{MergeError, MergeResult};
use crate::merged::{MergedAllowedValue, MergedFeature, MergedType, Source};

/// Read-only view over a store that answers merged-type queries.
///
/// The merged view is derived state: resolvers are cheap to construct
/// and are expected to be re-created after structural changes rather
/// than cached across them.
#[derive(Debug, Clone, Copy)]
pub struct TypeMergeResolver<'a> {
    store: &'a DescriptorStore,
}

impl<'a> TypeMergeResolver<'a> {
    #[must_use]
    pub fn new(store: &'a DescriptorStore) -> Self {
        Self { store }
    }

    // ── Source membership ────────────────────────────────────────

    /// The locally-owned declaration, if any.
    #[must_use]
    pub fn local_type(&self, type_name: &str) -> Option<&'a TypeDescription> {
        self.store.local_types().get(type_name)
    }

    #[must_use]
    pub fn is_local(&self, type_name: &str) -> bool {
        self.local_type(type_name).is_some()
    }

    #[must_use]
    pub fn is_imported(&self, type_name: &str) -> bool {
        self.store
            .imports()
            .iter()
            .any(|imp| imp.types.contains(type_name))
    }

    #[must_use]
    pub fn is_built_in(&self, type_name: &str) -> bool {
        self.store.builtins().contains(type_name)
    }

    /// True if any import declares the (type, feature) pair.
    #[must_use]
    pub fn is_imported_feature(&self, type_name: &str, feature_name: &str) -> bool {
        self.store.imports().iter().any(|imp| {
            imp.types
                .get(type_name)
                .is_some_and(|td| td.feature(feature_name).is_some())
        })
    }

    /// True if the built-in catalog declares the (type, feature) pair.
    #[must_use]
    pub fn is_built_in_feature(&self, type_name: &str, feature_name: &str) -> bool {
        self.store
            .builtins()
            .get(type_name)
            .is_some_and(|td| td.feature(feature_name).is_some())
    }

    /// The imported declaration of a feature, searched in import order.
    #[must_use]
    pub fn imported_feature(
        &self,
        type_name: &str,
        feature_name: &str,
    ) -> Option<&'a annokit_types::FeatureDescription> {
        self.store
            .imports()
            .iter()
            .filter_map(|imp| imp.types.get(type_name))
            .find_map(|td| td.feature(feature_name))
    }

    // ── Merge ────────────────────────────────────────────────────

    /// The effective type for `name`, or `None` if no source declares it.
    ///
    /// The local declaration is authoritative for identity and for any
    /// feature/allowed-value name it defines; the built-in catalog and
    /// each import contribute entries not already present. Ranges that
    /// disagree across sources are a pre-existing, user-visible
    /// inconsistency and are not reconciled here.
    #[must_use]
    pub fn merged_type(&self, name: &str) -> Option<MergedType> {
        let local = self.store.local_types().get(name);
        let builtin = self.store.builtins().get(name);
        let imported: Vec<_> = self
            .store
            .imports()
            .iter()
            .filter_map(|imp| imp.types.get(name).map(|td| (imp.id, td)))
            .collect();

        let identity = local
            .or_else(|| imported.first().map(|(_, td)| *td))
            .or(builtin)?;

        let mut sources = Vec::new();
        if local.is_some() {
            sources.push(Source::Local);
        }
        sources.extend(
            imported
                .iter()
                .map(|(id, _)| Source::Imported { import: *id }),
        );
        if builtin.is_some() {
            sources.push(Source::BuiltIn);
        }

        let mut features: Vec<MergedFeature> = Vec::new();
        let mut allowed_values: Vec<MergedAllowedValue> = Vec::new();

        if let Some(td) = local {
            for f in &td.features {
                features.push(MergedFeature {
                    feature: f.clone(),
                    source: Source::Local,
                    editable: true,
                });
            }
            for av in &td.allowed_values {
                allowed_values.push(MergedAllowedValue {
                    value: av.clone(),
                    source: Source::Local,
                    editable: true,
                });
            }
        }

        let mut add_shadows = |td: &TypeDescription, source: Source| {
            for f in &td.features {
                if !features.iter().any(|mf| mf.feature.name == f.name) {
                    features.push(MergedFeature {
                        feature: f.clone(),
                        source,
                        editable: false,
                    });
                }
            }
            for av in &td.allowed_values {
                if !allowed_values.iter().any(|mav| mav.value.value == av.value) {
                    allowed_values.push(MergedAllowedValue {
                        value: av.clone(),
                        source,
                        editable: false,
                    });
                }
            }
        };

        if let Some(td) = builtin {
            add_shadows(td, Source::BuiltIn);
        }
        for &(id, td) in &imported {
            add_shadows(td, Source::Imported { import: id });
        }

        Some(MergedType {
            name: name.to_string(),
            supertype_name: identity.supertype_name.clone(),
            description: identity.description.clone(),
            features,
            allowed_values,
            sources,
        })
    }

    /// All merged types the descriptor declares: the union of local and
    /// imported names. Built-ins contribute shadow features to those
    /// types but are not enumerated on their own.
    #[must_use]
    pub fn merged_types(&self) -> Vec<MergedType> {
        let mut names: Vec<&str> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for td in &self.store.local_types().types {
            if seen.insert(&td.name) {
                names.push(&td.name);
            }
        }
        for imp in self.store.imports() {
            for td in &imp.types.types {
                if seen.insert(&td.name) {
                    names.push(&td.name);
                }
            }
        }
        debug!(count = names.len(), "recomputing merged type system");
        names
            .into_iter()
            .filter_map(|n| self.merged_type(n))
            .collect()
    }

    // ── Supertype walks ──────────────────────────────────────────

    /// Finds a feature on a merged type, walking the merged supertype
    /// chain up to the root type. The walk never loops: a supertype
    /// cycle is reported as [`MergeError::CyclicSupertype`], and an
    /// undeclared supertype as [`MergeError::UnknownType`].
    pub fn feature_of(
        &self,
        merged: &MergedType,
        feature_name: &str,
    ) -> MergeResult<Option<MergedFeature>> {
        if let Some(f) = merged.feature(feature_name) {
            return Ok(Some(f.clone()));
        }

        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(merged.name.clone());
        let mut supertype = merged.supertype_name.clone();

        while let Some(name) = supertype {
            if name == TYPE_TOP {
                return Ok(None);
            }
            if !visited.insert(name.clone()) {
                return Err(MergeError::CyclicSupertype { type_name: name });
            }
            let st = self
                .merged_type(&name)
                .ok_or(MergeError::UnknownType { type_name: name })?;
            if let Some(f) = st.feature(feature_name) {
                return Ok(Some(f.clone()));
            }
            supertype = st.supertype_name;
        }
        Ok(None)
    }

    /// Checks that a type's supertype chain terminates at the root type.
    pub fn validate_supertype_chain(&self, type_name: &str) -> MergeResult<()> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut current = type_name.to_string();
        loop {
            if !visited.insert(current.clone()) {
                return Err(MergeError::CyclicSupertype { type_name: current });
            }
            let merged = self
                .merged_type(&current)
                .ok_or_else(|| MergeError::UnknownType {
                    type_name: current.clone(),
                })?;
            match merged.supertype_name {
                None => return Ok(()),
                Some(s) if s == TYPE_TOP => return Ok(()),
                Some(s) => current = s,
            }
        }
    }

    // ── Removal support ──────────────────────────────────────────

    /// Feature names that would disappear from the merged view of
    /// `type_name` if its local declaration were removed: the locally
    /// declared features with no import or built-in backing.
    #[must_use]
    pub fn vanishing_features(&self, type_name: &str) -> Vec<String> {
        let Some(local) = self.local_type(type_name) else {
            return Vec::new();
        };
        local
            .features
            .iter()
            .filter(|f| {
                !self.is_built_in_feature(type_name, &f.name)
                    && !self.is_imported_feature(type_name, &f.name)
            })
            .map(|f| f.name.clone())
            .collect()
    }
}

//! Validated edits to the local type-system tree.
//!
//! Every operation validates first and mutates only after all checks
//! pass: a returned error guarantees the store is unchanged. Shadow
//! declarations (import- or built-in-owned) are never touched; attempts
//! to edit them fail with [`MergeError::NotLocal`].

use annokit_store::DescriptorStore;
use annokit_types::names::is_indexable_range;
use annokit_types::{AllowedValue, FeatureDescription, TypeDescription};
use tracing::debug;

use crate::error::{MergeError, MergeResult};
use crate::resolver::TypeMergeResolver;

/// Adds a type declaration to the local tree.
///
/// Duplicating an imported or built-in name is allowed — that is a
/// partial local override of the one logical type — but duplicating a
/// local name is not.
pub fn add_local_type(store: &mut DescriptorStore, td: TypeDescription) -> MergeResult<()> {
    if store.local_types().contains(&td.name) {
        return Err(MergeError::DuplicateLocalName { name: td.name });
    }
    debug!(type_name = %td.name, "adding local type");
    store.local_types_mut().push_type(td);
    Ok(())
}

/// Adds a feature to the local declaration of `type_name`.
///
/// The type must have a local declaration. The feature name must not
/// duplicate a local or built-in feature; duplicating an imported
/// feature is allowed only when the ranges agree (the import cannot be
/// changed from here, so a disagreement would be unresolvable).
pub fn add_local_feature(
    store: &mut DescriptorStore,
    type_name: &str,
    mut fd: FeatureDescription,
) -> MergeResult<()> {
    {
        let resolver = TypeMergeResolver::new(store);
        let Some(local) = resolver.local_type(type_name) else {
            return Err(MergeError::NotLocal {
                name: type_name.to_string(),
            });
        };
        if local.feature(&fd.name).is_some() {
            return Err(MergeError::DuplicateLocalName { name: fd.name });
        }
        if resolver.is_built_in_feature(type_name, &fd.name) {
            return Err(MergeError::BuiltInCollision { name: fd.name });
        }
        if let Some(imported) = resolver.imported_feature(type_name, &fd.name) {
            if imported.range_type_name != fd.range_type_name {
                return Err(MergeError::RangeMismatch {
                    feature: fd.name,
                    declared: fd.range_type_name,
                    imported: imported.range_type_name.clone(),
                });
            }
        }
    }
    fd.normalize();
    debug!(type_name, feature = %fd.name, "adding local feature");
    let local = store
        .local_types_mut()
        .get_mut(type_name)
        .ok_or_else(|| MergeError::NotLocal {
            name: type_name.to_string(),
        })?;
    local.features.push(fd);
    Ok(())
}

/// Replaces the local declaration of a feature with `fd`, which must
/// keep the same name (renames go through the mention propagator).
///
/// Fails with [`MergeError::NotLocal`] when the feature is visible only
/// through an import or the built-in catalog. A feature used as an
/// index key must keep an indexable range.
pub fn update_local_feature(
    store: &mut DescriptorStore,
    type_name: &str,
    mut fd: FeatureDescription,
) -> MergeResult<()> {
    {
        let resolver = TypeMergeResolver::new(store);
        let has_local = resolver
            .local_type(type_name)
            .is_some_and(|td| td.feature(&fd.name).is_some());
        if !has_local {
            return Err(MergeError::NotLocal { name: fd.name });
        }
        if store.indexes().references_feature(type_name, &fd.name)
            && !is_indexable_range(&fd.range_type_name)
        {
            return Err(MergeError::NotIndexableRange {
                feature: fd.name,
                range: fd.range_type_name,
            });
        }
    }
    fd.normalize();
    let feature = store
        .local_types_mut()
        .get_mut(type_name)
        .and_then(|td| td.feature_mut(&fd.name))
        .ok_or_else(|| MergeError::NotLocal {
            name: fd.name.clone(),
        })?;
    *feature = fd;
    Ok(())
}

/// Adds an allowed value to the local declaration of `type_name`.
///
/// Only valid on types whose supertype is the built-in string type.
pub fn add_local_allowed_value(
    store: &mut DescriptorStore,
    type_name: &str,
    av: AllowedValue,
) -> MergeResult<()> {
    {
        let Some(local) = store.local_types().get(type_name) else {
            return Err(MergeError::NotLocal {
                name: type_name.to_string(),
            });
        };
        if !local.is_string_subtype() {
            return Err(MergeError::InvalidAllowedValue {
                type_name: type_name.to_string(),
            });
        }
        if local.allowed_value(&av.value).is_some() {
            return Err(MergeError::DuplicateLocalName { name: av.value });
        }
    }
    let local = store
        .local_types_mut()
        .get_mut(type_name)
        .ok_or_else(|| MergeError::NotLocal {
            name: type_name.to_string(),
        })?;
    local.allowed_values.push(av);
    Ok(())
}

/// Removes an allowed value from the local declaration. A value visible
/// only through an import stays in the merged view; removing it here is
/// [`MergeError::NotLocal`].
pub fn remove_local_allowed_value(
    store: &mut DescriptorStore,
    type_name: &str,
    value: &str,
) -> MergeResult<AllowedValue> {
    let local = store
        .local_types_mut()
        .get_mut(type_name)
        .ok_or_else(|| MergeError::NotLocal {
            name: type_name.to_string(),
        })?;
    let i = local
        .allowed_values
        .iter()
        .position(|av| av.value == value)
        .ok_or_else(|| MergeError::NotLocal {
            name: value.to_string(),
        })?;
    Ok(local.allowed_values.remove(i))
}

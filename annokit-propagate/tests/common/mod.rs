//! Shared fixtures for propagation tests.

use annokit_store::DescriptorStore;
use annokit_types::{
    Capability, FeatureDescription, FsIndexCollection, FsIndexDescription, FsIndexKeyDescription,
    FsIndexKind, SortOrder, TypeDescription, TypePriorities, TypePriorityList,
    TypeSystemDescription,
};

pub fn local_type(store: &mut DescriptorStore, name: &str, supertype: &str) {
    store
        .local_types_mut()
        .push_type(TypeDescription::new(name, supertype, None));
}

pub fn local_feature(store: &mut DescriptorStore, type_name: &str, feature: &str, range: &str) {
    store
        .local_types_mut()
        .get_mut(type_name)
        .expect("local type")
        .features
        .push(FeatureDescription::new(feature, range));
}

pub fn import_tree(types: &[(&str, &str, &[(&str, &str)])]) -> TypeSystemDescription {
    let mut ts = TypeSystemDescription::new();
    for (name, supertype, features) in types {
        let mut td = TypeDescription::new(*name, *supertype, None);
        for (fname, frange) in *features {
            td.features.push(FeatureDescription::new(*fname, *frange));
        }
        ts.push_type(td);
    }
    ts
}

pub fn sorted_index(label: &str, type_name: &str, feature: &str) -> FsIndexDescription {
    FsIndexDescription {
        label: label.into(),
        type_name: type_name.into(),
        kind: FsIndexKind::Sorted,
        keys: vec![FsIndexKeyDescription::Feature {
            feature_name: feature.into(),
            comparator: SortOrder::Ascending,
        }],
    }
}

/// Everything a cascade may touch, for before/after comparison.
pub type Snapshot = (
    TypeSystemDescription,
    Vec<Capability>,
    FsIndexCollection,
    TypePriorities,
);

pub fn snapshot(store: &DescriptorStore) -> Snapshot {
    (
        store.local_types().clone(),
        store.capabilities().to_vec(),
        store.indexes().clone(),
        store.type_priorities().clone(),
    )
}

pub fn priority_list(store: &mut DescriptorStore, types: &[&str]) {
    store
        .type_priorities_mut()
        .priority_lists
        .push(TypePriorityList::new(
            types.iter().map(|t| (*t).to_string()).collect(),
        ));
}

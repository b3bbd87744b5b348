//! Type merge resolver for annokit descriptors.
//!
//! A type name may be declared in up to three places at once: the local
//! descriptor, a resolved import, and the built-in catalog. Those copies
//! are one logical type. This crate computes the effective, merged view —
//! local declarations win for identity and editability; import- and
//! built-in-only entries appear as read-only shadows — and gates edits to
//! the local tree so shadow declarations can never be mutated.
//!
//! The merged view is derived state: recompute it after structural
//! changes, never treat it as a source of truth.

mod edit;
mod error;
mod merged;
mod resolver;

pub use edit::{
    add_local_allowed_value, add_local_feature, add_local_type, remove_local_allowed_value,
    update_local_feature,
};
pub use error::{MergeError, MergeResult};
pub use merged::{MergedAllowedValue, MergedFeature, MergedType, Source};
pub use resolver::TypeMergeResolver;

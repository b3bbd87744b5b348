//! Mention propagator for annokit descriptors.
//!
//! When a type or feature is renamed or removed, every dependent
//! structure — other type declarations, capability entries, index
//! descriptions, type-priority lists — must follow. Renames update the
//! mentions they can reach and report warnings for declarations owned
//! by imports or the built-in catalog. Removals are two-phase: a pure
//! [`CascadePlan`] enumerates the affected entries, the caller supplies
//! a [`CascadeDecision`], and only a confirmed plan is applied. An
//! aborted cascade leaves the model completely unchanged.

mod error;
mod plan;
mod propagator;
mod warning;

pub use error::{PropagateError, PropagateResult};
pub use plan::{
    CapabilityEdit, CascadeDecision, CascadeOutcome, CascadePlan, CascadeSubject, Direction,
    IndexEdit, PriorityEdit,
};
pub use propagator::{
    apply_cascade, dependent_types, is_feature_in_use_elsewhere, is_type_in_use_elsewhere,
    plan_remove_feature, plan_remove_type, remove_feature_with, remove_type_with, rename_feature,
    rename_type, type_requires_type,
};
pub use warning::{MentionKind, PropagateWarning};

//! Capability consistency tracker for annokit descriptors.
//!
//! Maintains, for each capability set, the declared input/output types,
//! features, languages, and sofas, and recomputes the derived
//! presentation view when declarations change. Entry lists never hold
//! duplicates; the all-features marker is only ever set on an existing
//! type entry.

mod error;
mod summary;
mod tracker;

pub use error::{CapabilityError, CapabilityResult};
pub use summary::{summarize, CapabilitySummary, FeatureSummary, TypeSummary};
pub use tracker::{
    add_input_feature, add_input_sofa, add_input_type, add_language, add_output_feature,
    add_output_sofa, add_output_type, remove_feature, remove_type,
    replace_features_keeping_types, rename_sofa, set_all_features, undeclared_mapping_sofas,
};

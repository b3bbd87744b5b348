//! Parameter override resolver for annokit aggregate descriptors.
//!
//! An aggregate supplies values for its delegates' parameters by
//! declaring aggregate-level parameters that *override* them, recorded
//! as target paths `delegateKey[/delegateKey...]/parameterName`. This
//! crate enforces the two invariants of that mechanism: a target is
//! claimed by at most one parameter in the whole descriptor, and
//! parameter names are unique across the descriptor even between
//! groups.

mod error;
mod resolver;

pub use error::{OverrideError, OverrideResult};
pub use resolver::{
    add_override, find_overriding_parameter_name, generate_unique_name, override_target,
    remove_override, remove_parameter, DelegateGroup, OverrideOutcome,
};

//! Descriptor data model for annokit.
//!
//! Defines the in-memory form of component descriptors that the
//! consistency engine operates on:
//! - [`TypeDescription`] / [`FeatureDescription`] / [`AllowedValue`] — the
//!   type system of a descriptor
//! - [`Capability`] / [`TypeOrFeature`] — declared inputs and outputs
//! - [`FsIndexDescription`] / [`TypePriorities`] — index and priority
//!   declarations
//! - [`ConfigurationParameterDeclarations`] — parameters, groups, and
//!   override targets
//!
//! Parsing and serialization of the on-disk descriptor format is owned by
//! the surrounding framework; these types are its already-parsed form.

pub mod names;

mod capability;
mod index;
mod parameters;
mod priorities;
mod type_system;

pub use capability::{Capability, SofaMapping, TypeOrFeature};
pub use index::{
    FsIndexCollection, FsIndexDescription, FsIndexKeyDescription, FsIndexKind, SortOrder,
};
pub use parameters::{
    ConfigurationGroup, ConfigurationParameter, ConfigurationParameterDeclarations, GroupKey,
    ParameterType,
};
pub use priorities::{TypePriorities, TypePriorityList};
pub use type_system::{
    AllowedValue, FeatureDescription, TypeDescription, TypeSystemDescription,
};

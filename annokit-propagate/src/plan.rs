//! Cascade plans: the pure, side-effect-free half of a removal.
//!
//! A removal is two-phase: `plan_remove_*` enumerates every dependent
//! entry that would change, the caller confirms (or not), and only then
//! is the plan applied. A declined plan leaves the model untouched.

use serde::Serialize;

/// The caller's answer to a cascade confirmation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadeDecision {
    Proceed,
    Abort,
}

/// What a removal operation is removing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CascadeSubject {
    Type {
        name: String,
    },
    Feature {
        type_name: String,
        feature_name: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Input,
    Output,
}

/// Removal of one entry from one capability set's entry list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityEdit {
    /// Index of the capability set in the descriptor.
    pub capability: usize,
    pub direction: Direction,
    /// Entry name: a type name or a combined `Type:feature` name.
    pub entry: String,
}

/// Removal of an index description or of keys within one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndexEdit {
    /// The whole index goes: its type is being removed.
    RemoveIndex { label: String },
    /// Keys naming the feature go; the index stays.
    RemoveKeys {
        label: String,
        feature_name: String,
    },
}

/// Removal of a type entry from one priority list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityEdit {
    /// Index of the priority list in the descriptor.
    pub list: usize,
    pub type_name: String,
}

/// Everything a removal would change beyond the local declaration
/// itself. Computed without side effects; applied atomically or not at
/// all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CascadePlan {
    pub subject: CascadeSubject,
    /// True when an import or the built-in catalog still declares the
    /// name: the merged entity persists and downstream dependents stay
    /// bound to it, so no cross-structure entries are removed for the
    /// subject itself.
    pub merged_survives: bool,
    /// Feature names that disappear from the merged view because only
    /// the local copy declared them (type removal with a surviving
    /// merged type). Their mentions are included in the edit lists.
    pub vanishing_features: Vec<String>,
    pub capability_edits: Vec<CapabilityEdit>,
    pub index_edits: Vec<IndexEdit>,
    pub priority_edits: Vec<PriorityEdit>,
}

impl CascadePlan {
    /// True when applying the plan would change any capability, index,
    /// or priority-list entry. Such plans require an explicit
    /// continue/abort decision from the caller before being applied.
    #[must_use]
    pub fn requires_confirmation(&self) -> bool {
        !self.capability_edits.is_empty()
            || !self.index_edits.is_empty()
            || !self.priority_edits.is_empty()
    }
}

/// The result of a confirmed-or-declined removal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CascadeOutcome {
    /// The plan was applied (confirmation granted or not required).
    Applied { plan: CascadePlan },
    /// The caller declined; nothing changed.
    Aborted { plan: CascadePlan },
}

//! Override resolution across an aggregate's parameter declarations.

use annokit_types::{
    ConfigurationGroup, ConfigurationParameter, ConfigurationParameterDeclarations, GroupKey,
};
use serde::Serialize;
use tracing::debug;

use crate::error::{OverrideError, OverrideResult};

/// The group a delegate parameter was declared in.
///
/// A delegate's *common* parameters belong to every group the delegate
/// declares, so at the aggregate level they correspond to the group
/// whose name set is the union of all the delegate's group names.
#[derive(Debug, Clone, Copy)]
pub enum DelegateGroup<'a> {
    Ungrouped,
    Common,
    Named(&'a [String]),
}

/// What `add_override` did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OverrideOutcome {
    /// The intended parameter already records this target; nothing
    /// changed.
    AlreadyRecorded { parameter: String },
    /// The target was added to an existing parameter with a matching
    /// spec.
    SharedExisting { parameter: String },
    /// A new override-holding parameter was created (renamed if the
    /// delegate's name was taken anywhere in the descriptor).
    CreatedParameter { parameter: String },
}

impl OverrideOutcome {
    /// The name of the parameter now holding the override.
    #[must_use]
    pub fn parameter(&self) -> &str {
        match self {
            Self::AlreadyRecorded { parameter }
            | Self::SharedExisting { parameter }
            | Self::CreatedParameter { parameter } => parameter,
        }
    }
}

/// Builds the override target for a delegate parameter. Nested
/// aggregate delegates use slash-joined key paths.
#[must_use]
pub fn override_target(delegate_key: &str, parameter_name: &str) -> String {
    format!("{delegate_key}/{parameter_name}")
}

/// Scans common parameters, ungrouped parameters, and every group for a
/// parameter whose `overrides` list claims `target`. Returns the owning
/// parameter's name.
#[must_use]
pub fn find_overriding_parameter_name<'a>(
    target: &str,
    declarations: &'a ConfigurationParameterDeclarations,
) -> Option<&'a str> {
    declarations
        .iter_all()
        .find(|p| p.has_override(target))
        .map(|p| p.name.as_str())
}

/// Synthesizes a parameter name unique across the whole declarations
/// block: `base` suffixed with the smallest positive integer not in
/// use.
#[must_use]
pub fn generate_unique_name(
    base: &str,
    declarations: &ConfigurationParameterDeclarations,
) -> String {
    let mut suffix = 1u32;
    loop {
        let candidate = format!("{base}{suffix}");
        if !declarations.contains_parameter_name(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Records an override of one delegate parameter in the aggregate's
/// declarations.
///
/// The override target is `delegate_key/parameter`. The receiving
/// parameter lives in the aggregate group corresponding to the
/// delegate's group (matched by name *set*); it is reused when a
/// same-named parameter with an identical spec exists and `non_shared`
/// was not requested, and synthesized with a descriptor-unique name
/// otherwise. A target already claimed by a different parameter is
/// [`OverrideError::AlreadyOverridden`]; repeating an identical request
/// is a no-op.
pub fn add_override(
    aggregate: &mut ConfigurationParameterDeclarations,
    delegate_declarations: &ConfigurationParameterDeclarations,
    delegate_group: DelegateGroup<'_>,
    delegate_key: &str,
    parameter: &ConfigurationParameter,
    non_shared: bool,
) -> OverrideResult<OverrideOutcome> {
    let target = override_target(delegate_key, &parameter.name);

    let group_key = match delegate_group {
        DelegateGroup::Ungrouped => None,
        DelegateGroup::Common => Some(delegate_declarations.all_group_names()),
        DelegateGroup::Named(names) => Some(GroupKey::from_names(names.iter().cloned())),
    };

    // Resolve the intended receiver before touching anything, so the
    // exclusivity check can tell a repeat request from a conflict.
    let scope: Option<&[ConfigurationParameter]> = match &group_key {
        None => Some(&aggregate.parameters),
        Some(key) => aggregate.group(key).map(|g| g.parameters.as_slice()),
    };
    let receiver = scope
        .and_then(|params| params.iter().find(|p| p.name == parameter.name))
        .filter(|p| !non_shared && p.spec_matches(parameter))
        .map(|p| p.name.clone());

    if let Some(existing) = find_overriding_parameter_name(&target, aggregate) {
        if receiver.as_deref() == Some(existing) {
            return Ok(OverrideOutcome::AlreadyRecorded {
                parameter: existing.to_string(),
            });
        }
        return Err(OverrideError::AlreadyOverridden {
            target,
            parameter: existing.to_string(),
        });
    }

    if let Some(name) = receiver {
        let params = match &group_key {
            None => &mut aggregate.parameters,
            Some(key) => {
                // The group exists: the receiver was found in it.
                match aggregate.group_mut(key) {
                    Some(g) => &mut g.parameters,
                    None => &mut aggregate.parameters,
                }
            }
        };
        if let Some(p) = params.iter_mut().find(|p| p.name == name) {
            p.overrides.push(target.clone());
        }
        debug!(%target, parameter = %name, "override shared with existing parameter");
        return Ok(OverrideOutcome::SharedExisting { parameter: name });
    }

    // A fresh parameter is needed. Parameter names are unique across
    // the whole descriptor, even between groups.
    let name = if aggregate.contains_parameter_name(&parameter.name) {
        generate_unique_name(&parameter.name, aggregate)
    } else {
        parameter.name.clone()
    };
    let new_parameter = ConfigurationParameter {
        name: name.clone(),
        description: parameter.description.clone(),
        param_type: parameter.param_type,
        mandatory: parameter.mandatory,
        multi_valued: parameter.multi_valued,
        overrides: vec![target.clone()],
    };
    match group_key {
        None => aggregate.parameters.push(new_parameter),
        Some(key) => ensure_group(aggregate, &key).parameters.push(new_parameter),
    }
    debug!(%target, parameter = %name, "override recorded on new parameter");
    Ok(OverrideOutcome::CreatedParameter { parameter: name })
}

/// Finds the group matching `key` by name set, creating it if absent.
fn ensure_group<'a>(
    aggregate: &'a mut ConfigurationParameterDeclarations,
    key: &GroupKey,
) -> &'a mut ConfigurationGroup {
    if let Some(i) = aggregate.groups.iter().position(|g| g.key() == *key) {
        return &mut aggregate.groups[i];
    }
    aggregate
        .groups
        .push(ConfigurationGroup::new(key.names().iter().cloned()));
    let last = aggregate.groups.len() - 1;
    &mut aggregate.groups[last]
}

/// Removes one override target from a parameter. Returns true when the
/// target was present.
pub fn remove_override(
    declarations: &mut ConfigurationParameterDeclarations,
    parameter_name: &str,
    target: &str,
) -> bool {
    for p in declarations.iter_all_mut() {
        if p.name == parameter_name {
            let before = p.overrides.len();
            p.overrides.retain(|o| o != target);
            return p.overrides.len() != before;
        }
    }
    false
}

/// Removes a parameter from whichever scope declares it, releasing all
/// its override targets. Returns the removed parameter.
pub fn remove_parameter(
    declarations: &mut ConfigurationParameterDeclarations,
    parameter_name: &str,
) -> Option<ConfigurationParameter> {
    let scopes = std::iter::once(&mut declarations.parameters)
        .chain(std::iter::once(&mut declarations.common_parameters))
        .chain(declarations.groups.iter_mut().map(|g| &mut g.parameters));
    for params in scopes {
        if let Some(i) = params.iter().position(|p| p.name == parameter_name) {
            return Some(params.remove(i));
        }
    }
    None
}

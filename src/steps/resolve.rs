//! Coordinate resolution.
//!
//! Turns a step's terse or explicit goal reference into a fully-qualified
//! [`ResolvedTarget`] by searching the project's declared plugins, and folds
//! a named execution's configuration beneath the step's own overlay when an
//! execution id is given. No I/O happens here; the registry is supplied in
//! full by the caller.

use tracing::debug;

use crate::config::{merge, prune_empty, ConfigTree};
use crate::error::{GoalseqError, Result};
use crate::registry::{DeclaredPlugin, PluginRegistry};
use crate::steps::spec::{candidate_artifact_names, StepSpec};

/// Fully-qualified reference to a goal on a declared plugin.
///
/// All of group, artifact, goal, and version are non-empty once resolution
/// has succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Group identifier.
    pub group: String,

    /// Artifact identifier.
    pub artifact: String,

    /// Goal name.
    pub goal: String,

    /// Version, filled from the declared plugin when not given.
    pub version: String,

    /// Execution identifier, when one was referenced.
    pub execution_id: Option<String>,
}

impl ResolvedTarget {
    /// The `group:artifact` lookup key.
    pub fn key(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }
}

/// A step after resolution.
#[derive(Debug, Clone)]
pub struct ResolvedStep {
    /// The fully-qualified target.
    pub target: ResolvedTarget,

    /// The step's effective configuration: the user overlay, already merged
    /// over the named execution's configuration when one was resolved.
    pub configuration: Option<ConfigTree>,

    /// Whether the step carried a non-empty user override.
    pub overlay: bool,
}

/// Resolve a step against the project's declared plugins.
pub fn resolve(spec: &StepSpec, plugins: &dyn PluginRegistry) -> Result<ResolvedStep> {
    match spec.coordinates.as_deref().map(str::trim) {
        Some(coordinates) if !coordinates.is_empty() => {
            resolve_coordinates(spec, coordinates, plugins)
        }
        _ => resolve_explicit(spec, plugins),
    }
}

fn resolve_coordinates(
    spec: &StepSpec,
    coordinates: &str,
    plugins: &dyn PluginRegistry,
) -> Result<ResolvedStep> {
    if spec.has_explicit_fields() {
        return Err(GoalseqError::ConflictingSpecification);
    }

    let (reference, execution_id) = split_execution_id(coordinates)?;

    let parts: Vec<&str> = reference.split(':').collect();
    let (group, artifact, goal, version) = match parts.as_slice() {
        [group, artifact, goal] => (
            group.trim().to_string(),
            artifact.trim().to_string(),
            goal.trim().to_string(),
            None,
        ),
        [identifier, goal] => {
            let identifier = identifier.trim();
            let plugin = find_by_identifier(identifier, plugins)?;
            debug!(
                "Resolved identifier '{}' to declared plugin {}",
                identifier,
                plugin.key()
            );
            (
                plugin.group.clone(),
                plugin.artifact.clone(),
                goal.trim().to_string(),
                plugin.version.clone(),
            )
        }
        _ => {
            return Err(GoalseqError::MalformedReference {
                coordinates: coordinates.to_string(),
            })
        }
    };

    // Fold the named execution's configuration beneath the step overlay.
    // A missing execution (or a plugin without executions) is not an error;
    // the overlay is used as-is.
    let mut configuration = prune_empty(spec.configuration.clone());
    if let Some(id) = execution_id {
        if let Some(execution_config) = plugins
            .lookup(&group, &artifact)
            .and_then(|p| p.execution(id))
            .and_then(|e| e.configuration.as_ref())
        {
            debug!("Layering configuration of execution '{}' beneath the step overlay", id);
            configuration = prune_empty(merge(configuration.as_ref(), Some(execution_config)));
        }
    }

    let version = resolve_version(version, &group, &artifact, plugins)?;

    Ok(ResolvedStep {
        target: ResolvedTarget {
            group,
            artifact,
            goal,
            version,
            execution_id: execution_id.map(str::to_string),
        },
        configuration,
        overlay: spec.has_overlay(),
    })
}

fn resolve_explicit(spec: &StepSpec, plugins: &dyn PluginRegistry) -> Result<ResolvedStep> {
    let goal = required_field(&spec.goal, "no coordinates and no goal specified")?;
    let group = required_field(
        &spec.group,
        "an explicit goal reference requires a group identifier",
    )?;
    let artifact = required_field(
        &spec.artifact,
        "an explicit goal reference requires an artifact identifier",
    )?;

    let version = spec
        .version
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);
    let version = resolve_version(version, &group, &artifact, plugins)?;

    let execution_id = spec
        .execution_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    Ok(ResolvedStep {
        target: ResolvedTarget {
            group,
            artifact,
            goal,
            version,
            execution_id,
        },
        configuration: prune_empty(spec.configuration.clone()),
        overlay: spec.has_overlay(),
    })
}

/// Split an optional trailing `@<executionId>` off the reference.
///
/// An `@` with nothing after it is malformed.
fn split_execution_id(coordinates: &str) -> Result<(&str, Option<&str>)> {
    match coordinates.rsplit_once('@') {
        Some((reference, id)) => {
            let id = id.trim();
            if id.is_empty() {
                return Err(GoalseqError::MalformedReference {
                    coordinates: coordinates.to_string(),
                });
            }
            Ok((reference.trim(), Some(id)))
        }
        None => Ok((coordinates, None)),
    }
}

/// Search top-level and managed declarations for a short identifier.
fn find_by_identifier<'a>(
    identifier: &str,
    plugins: &'a dyn PluginRegistry,
) -> Result<&'a DeclaredPlugin> {
    let candidates = candidate_artifact_names(identifier);
    let matches: Vec<&DeclaredPlugin> = plugins
        .declared()
        .iter()
        .chain(plugins.managed().iter())
        .filter(|p| candidates.contains(&p.artifact))
        .collect();

    match matches.as_slice() {
        [] => Err(GoalseqError::PluginNotFound {
            identifier: identifier.to_string(),
        }),
        [plugin] => Ok(plugin),
        _ => Err(GoalseqError::AmbiguousPlugin {
            identifier: identifier.to_string(),
        }),
    }
}

/// Adopt the declared plugin's version when the reference carried none.
fn resolve_version(
    version: Option<String>,
    group: &str,
    artifact: &str,
    plugins: &dyn PluginRegistry,
) -> Result<String> {
    if let Some(version) = version.filter(|v| !v.trim().is_empty()) {
        return Ok(version);
    }
    plugins
        .lookup(group, artifact)
        .and_then(|p| p.version.clone())
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| GoalseqError::VersionUnresolved {
            key: format!("{group}:{artifact}"),
        })
}

fn required_field(value: &Option<String>, message: &str) -> Result<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| GoalseqError::IncompleteSpecification {
            message: message.to_string(),
        })
}

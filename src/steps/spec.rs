//! Declarative step entries.
//!
//! A [`StepSpec`] is one entry of the host's ordered step list. It refers to
//! its goal either through the terse `coordinates` string or through the
//! explicit fields, never both.

use std::collections::HashSet;

use serde::Deserialize;

use crate::config::ConfigTree;

/// One declared step of a sequence.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StepSpec {
    /// Terse goal reference: `identifier:goal` or `group:artifact:goal`,
    /// optionally suffixed with `@<executionId>`. Mutually exclusive with
    /// the explicit fields.
    pub coordinates: Option<String>,

    /// Explicit group identifier.
    pub group: Option<String>,

    /// Explicit artifact identifier.
    pub artifact: Option<String>,

    /// Explicit version.
    pub version: Option<String>,

    /// Explicit goal name.
    pub goal: Option<String>,

    /// Explicit execution identifier.
    pub execution_id: Option<String>,

    /// Display id. Defaults to `<sequence id>-<step index>`.
    pub id: Option<String>,

    /// Configuration overlay, applied over lower layers.
    pub configuration: Option<ConfigTree>,

    /// Skip execution. A skipped step is still resolved and numbered.
    pub skip: bool,
}

impl StepSpec {
    /// A step referring to its goal by terse coordinates.
    pub fn for_coordinates(coordinates: impl Into<String>) -> Self {
        Self {
            coordinates: Some(coordinates.into()),
            ..Self::default()
        }
    }

    /// Whether any explicit target field is populated.
    pub(crate) fn has_explicit_fields(&self) -> bool {
        is_present(&self.group)
            || is_present(&self.artifact)
            || is_present(&self.version)
            || is_present(&self.goal)
            || is_present(&self.execution_id)
    }

    /// Whether the step carries a non-empty configuration override.
    pub fn has_overlay(&self) -> bool {
        self.configuration.as_ref().is_some_and(|c| !c.is_empty())
    }
}

pub(crate) fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Candidate artifact names for a short plugin identifier.
///
/// The identifier itself always matches. Unless the identifier already
/// carries the conventional prefix or suffix, the `maven-<id>-plugin` and
/// `<id>-maven-plugin` forms are added.
pub fn candidate_artifact_names(identifier: &str) -> HashSet<String> {
    let mut candidates = HashSet::new();
    candidates.insert(identifier.to_string());
    if !identifier.starts_with("maven-") {
        candidates.insert(format!("maven-{identifier}-plugin"));
    }
    if !identifier.ends_with("-maven-plugin") {
        candidates.insert(format!("{identifier}-maven-plugin"));
    }
    candidates
}

//! Declared plugins and the capability seams around them.
//!
//! The enclosing project supplies its plugin declarations in full; this crate
//! never touches the network or the filesystem to find one. Two injected
//! traits model the host collaborators:
//!
//! - [`PluginRegistry`] - the project's declared plugins (top-level and
//!   plugin-management sections)
//! - [`GoalMetadata`] - tool-default configuration per goal, resolved by the
//!   host from the plugin descriptor
//!
//! [`ProjectPlugins`] is the in-memory registry used by hosts and tests.

use serde::Deserialize;

use crate::config::ConfigTree;
use crate::error::Result;

/// A plugin entry already registered in the project's build configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeclaredPlugin {
    /// Group identifier.
    pub group: String,

    /// Artifact identifier.
    pub artifact: String,

    /// Declared version, if pinned.
    pub version: Option<String>,

    /// Named executions declared for this plugin, in declaration order.
    pub executions: Vec<NamedExecution>,
}

impl DeclaredPlugin {
    /// The `group:artifact` lookup key.
    pub fn key(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }

    /// Find a named execution by id.
    pub fn execution(&self, id: &str) -> Option<&NamedExecution> {
        self.executions.iter().find(|e| e.id == id)
    }
}

/// A previously configured invocation declared under a specific identifier.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamedExecution {
    /// Execution identifier.
    pub id: String,

    /// Configuration overlay declared on the execution.
    pub configuration: Option<ConfigTree>,
}

/// Read-only view of the project's declared plugins.
pub trait PluginRegistry {
    /// Look up a top-level declared plugin by group and artifact.
    fn lookup(&self, group: &str, artifact: &str) -> Option<&DeclaredPlugin>;

    /// Top-level plugin declarations, in declaration order.
    fn declared(&self) -> &[DeclaredPlugin];

    /// Plugin-management declarations, in declaration order.
    fn managed(&self) -> &[DeclaredPlugin];
}

/// Tool-default goal configuration, resolved by the host.
pub trait GoalMetadata {
    /// The default configuration template for a goal.
    ///
    /// Returns `Ok(None)` when the goal exists but declares no defaults.
    /// Implementations fail with [`crate::GoalseqError::GoalNotFound`] when
    /// the plugin does not expose the goal.
    fn describe_goal(&self, group: &str, artifact: &str, goal: &str)
        -> Result<Option<ConfigTree>>;
}

/// In-memory plugin registry built from the project's declarations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectPlugins {
    /// Top-level plugin declarations.
    pub plugins: Vec<DeclaredPlugin>,

    /// Plugin-management declarations.
    pub plugin_management: Vec<DeclaredPlugin>,
}

impl ProjectPlugins {
    /// Create a registry from top-level declarations only.
    pub fn new(plugins: Vec<DeclaredPlugin>) -> Self {
        Self {
            plugins,
            plugin_management: Vec::new(),
        }
    }
}

impl PluginRegistry for ProjectPlugins {
    fn lookup(&self, group: &str, artifact: &str) -> Option<&DeclaredPlugin> {
        self.plugins
            .iter()
            .find(|p| p.group == group && p.artifact == artifact)
    }

    fn declared(&self) -> &[DeclaredPlugin] {
        &self.plugins
    }

    fn managed(&self) -> &[DeclaredPlugin] {
        &self.plugin_management
    }
}

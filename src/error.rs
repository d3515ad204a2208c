//! Error types for goalseq operations.
//!
//! This module defines [`GoalseqError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `GoalseqError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `GoalseqError::Other`) for unexpected errors
//! - Every error is terminal for the running sequence: resolution errors are
//!   raised before the executor is invoked, executor errors are wrapped with
//!   the failing step and goal and rethrown

use thiserror::Error;

/// Core error type for goalseq operations.
#[derive(Debug, Error)]
pub enum GoalseqError {
    /// A step populated both the terse coordinates and explicit fields.
    #[error("Invalid step: configure either coordinates or individual fields (group, artifact, goal, etc.), not both")]
    ConflictingSpecification,

    /// A step populated neither form, or left out a required explicit field.
    #[error("Invalid step: {message}")]
    IncompleteSpecification { message: String },

    /// The terse coordinates string does not follow the accepted grammar.
    #[error("Invalid coordinates '{coordinates}'. Expected: <group>:<artifact>:<goal>[@<executionId>] or <identifier>:<goal>[@<executionId>]")]
    MalformedReference { coordinates: String },

    /// No declared plugin matched the short identifier.
    #[error("No plugin found among the declared plugins for identifier: {identifier}")]
    PluginNotFound { identifier: String },

    /// More than one declared plugin matched the short identifier.
    #[error("Multiple plugins found among the declared plugins for identifier: {identifier}. Please use the full group:artifact:goal format to disambiguate.")]
    AmbiguousPlugin { identifier: String },

    /// No version in the coordinates and none declared for the plugin.
    #[error("Version not specified in coordinates and no version declared for {key}")]
    VersionUnresolved { key: String },

    /// A resolved step refers to a plugin the project never declared.
    #[error("Plugin {key} is not configured in the project")]
    PluginNotConfigured { key: String },

    /// The resolved plugin does not expose the requested goal.
    #[error("Goal '{goal}' not found on plugin {key}")]
    GoalNotFound { key: String, goal: String },

    /// The executor rejected the merged configuration during parameter binding.
    #[error("Parameter binding failed for {goal}: {message}")]
    ParameterBindingFailure { goal: String, message: String },

    /// The executor ran the goal and it failed.
    #[error("Failed to execute {artifact}:{goal}: {message}")]
    ExecutionFailure {
        artifact: String,
        goal: String,
        message: String,
    },

    /// A configuration overlay could not be represented as a tree.
    #[error("Invalid configuration for '{name}': {message}")]
    InvalidConfiguration { name: String, message: String },

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for goalseq operations.
pub type Result<T> = std::result::Result<T, GoalseqError>;

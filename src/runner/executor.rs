//! The goal execution seam.
//!
//! Actual goal execution belongs to the host build tool. The runner hands a
//! resolved target and its merged configuration to a [`GoalExecutor`] and
//! wraps whatever comes back.

use thiserror::Error;

use crate::config::ConfigTree;
use crate::steps::ResolvedTarget;

/// Failure raised by a [`GoalExecutor`].
///
/// Parameter-binding failures are reported distinctly from general execution
/// failures; the runner wraps each with the failing step and goal before
/// aborting the sequence.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The merged configuration could not be bound to the goal's parameters.
    #[error("parameter binding failed: {0}")]
    ParameterBinding(String),

    /// The goal ran and failed.
    #[error("{0}")]
    Failed(String),
}

/// Executes a resolved goal. Supplied by the host build tool.
///
/// The call is synchronous and may block for as long as the goal runs;
/// timeout policy belongs to the executor, not to this crate.
pub trait GoalExecutor {
    /// Run one goal with its merged configuration.
    ///
    /// `configuration` is `None` when the merged tree carried no
    /// configuration; the executor applies its own defaults in that case.
    fn execute(
        &mut self,
        target: &ResolvedTarget,
        configuration: Option<&ConfigTree>,
        display_id: &str,
    ) -> std::result::Result<(), ExecutorError>;
}

//! Sequence execution orchestration.
//!
//! [`SequenceRunner`] walks the declared step list strictly in order:
//! resolve, look up the declared plugin, merge configuration layers, log a
//! progress line, execute (unless skipped), log the timed completion line.
//! The first failure aborts the whole sequence; completed steps are not
//! rolled back.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use crate::config::{merge, prune_empty};
use crate::error::{GoalseqError, Result};
use crate::format::{format_coordinate, format_duration};
use crate::registry::{GoalMetadata, PluginRegistry};
use crate::runner::executor::{ExecutorError, GoalExecutor};
use crate::steps::{resolve, ResolvedStep, ResolvedTarget, StepSpec};

/// Progress events emitted during sequence execution.
#[derive(Debug)]
pub enum RunProgress<'a> {
    /// A step is about to start (skipped steps included).
    StepStarting {
        index: usize,
        display_id: &'a str,
        coordinate: &'a str,
        skip: bool,
    },
    /// A step finished. Skipped steps finish immediately.
    StepCompleted {
        index: usize,
        display_id: &'a str,
        duration: Duration,
    },
}

/// Record of one executed (or skipped) step.
#[derive(Debug, Clone)]
pub struct StepRecord {
    /// 1-based position in the sequence.
    pub index: usize,

    /// Display id used in log lines.
    pub display_id: String,

    /// The fully-qualified target that ran.
    pub target: ResolvedTarget,

    /// Whether the skip flag suppressed execution.
    pub skipped: bool,

    /// Wall-clock start time.
    pub started_at: DateTime<Utc>,

    /// Elapsed time for the step.
    pub duration: Duration,
}

/// Result of running a sequence to completion.
#[derive(Debug)]
pub struct SequenceOutcome {
    /// One record per step, in execution order.
    pub records: Vec<StepRecord>,

    /// Total elapsed time.
    pub duration: Duration,
}

/// Orchestrates the sequential execution of declared steps.
pub struct SequenceRunner<'a> {
    plugins: &'a dyn PluginRegistry,
    metadata: &'a dyn GoalMetadata,
    name: String,
    id: String,
    label: Option<String>,
}

impl<'a> SequenceRunner<'a> {
    /// Create a runner for the given project.
    ///
    /// `name` is the sequence name shown in log lines; `id` seeds the
    /// default display id of steps that declare none (`<id>-<index>`).
    pub fn new(
        plugins: &'a dyn PluginRegistry,
        metadata: &'a dyn GoalMetadata,
        name: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            plugins,
            metadata,
            name: name.into(),
            id: id.into(),
            label: None,
        }
    }

    /// Builder-style: set the label rendered in progress lines.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Run the declared steps in order, aborting at the first failure.
    pub fn run(
        &self,
        steps: &[StepSpec],
        executor: &mut dyn GoalExecutor,
    ) -> Result<SequenceOutcome> {
        self.run_with_progress(steps, executor, |_| {})
    }

    /// Run the declared steps with a progress callback.
    pub fn run_with_progress(
        &self,
        steps: &[StepSpec],
        executor: &mut dyn GoalExecutor,
        mut on_progress: impl FnMut(RunProgress<'_>),
    ) -> Result<SequenceOutcome> {
        let start = Instant::now();

        if steps.is_empty() {
            info!("{}: no steps declared - nothing to do", self.name);
            return Ok(SequenceOutcome {
                records: Vec::new(),
                duration: start.elapsed(),
            });
        }

        let label = self
            .label
            .as_deref()
            .filter(|l| !l.is_empty())
            .map(|l| format!("'{l}' "))
            .unwrap_or_default();

        let mut records = Vec::with_capacity(steps.len());

        for (position, spec) in steps.iter().enumerate() {
            let index = position + 1;

            // Resolution happens even for skipped steps; a skipped step can
            // still fail here and abort the sequence.
            let ResolvedStep {
                target,
                configuration,
                overlay,
            } = resolve(spec, self.plugins)?;

            let display_id = spec
                .id
                .clone()
                .unwrap_or_else(|| format!("{}-{}", self.id, index));

            let key = target.key();
            let plugin = self
                .plugins
                .lookup(&target.group, &target.artifact)
                .ok_or_else(|| GoalseqError::PluginNotConfigured { key: key.clone() })?;
            debug!(
                "Found declared plugin {} (version {})",
                key,
                plugin.version.as_deref().unwrap_or("unset")
            );

            let defaults =
                self.metadata
                    .describe_goal(&target.group, &target.artifact, &target.goal)?;

            let merged = prune_empty(merge(configuration.as_ref(), defaults.as_ref()));
            match &merged {
                Some(config) => {
                    debug!("Applying merged configuration for {}:\n{}", display_id, config)
                }
                None => debug!(
                    "No configuration provided for {}; executor defaults apply",
                    display_id
                ),
            }

            let coordinate = format_coordinate(&target, overlay);
            info!(
                "---- {}: {}{}step {} ({}) {} starting",
                self.name,
                label,
                if spec.skip { "SKIPPING " } else { "" },
                index,
                display_id,
                coordinate,
            );
            on_progress(RunProgress::StepStarting {
                index,
                display_id: &display_id,
                coordinate: &coordinate,
                skip: spec.skip,
            });

            let started_at = Utc::now();
            let step_start = Instant::now();

            if !spec.skip {
                executor
                    .execute(&target, merged.as_ref(), &display_id)
                    .map_err(|e| wrap_executor_error(e, &target))?;
            }

            let duration = step_start.elapsed();
            info!(
                "---- {}: {}step {} ({}) completed in {}",
                self.name,
                label,
                index,
                display_id,
                format_duration(duration),
            );
            on_progress(RunProgress::StepCompleted {
                index,
                display_id: &display_id,
                duration,
            });

            records.push(StepRecord {
                index,
                display_id,
                target,
                skipped: spec.skip,
                started_at,
                duration,
            });
        }

        Ok(SequenceOutcome {
            records,
            duration: start.elapsed(),
        })
    }
}

fn wrap_executor_error(err: ExecutorError, target: &ResolvedTarget) -> GoalseqError {
    match err {
        ExecutorError::ParameterBinding(message) => {
            error!("Parameter binding failed for {}: {}", target.goal, message);
            GoalseqError::ParameterBindingFailure {
                goal: target.goal.clone(),
                message,
            }
        }
        ExecutorError::Failed(message) => {
            error!("Execution failed for {}: {}", target.goal, message);
            GoalseqError::ExecutionFailure {
                artifact: target.artifact.clone(),
                goal: target.goal.clone(),
                message,
            }
        }
    }
}

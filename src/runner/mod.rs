//! Sequence execution orchestration.

pub mod executor;
pub mod sequence;

pub use executor::{ExecutorError, GoalExecutor};
pub use sequence::{RunProgress, SequenceOutcome, SequenceRunner, StepRecord};

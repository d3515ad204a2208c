//! Step declarations and coordinate resolution.

pub mod resolve;
pub mod spec;

pub use resolve::{resolve, ResolvedStep, ResolvedTarget};
pub use spec::{candidate_artifact_names, StepSpec};

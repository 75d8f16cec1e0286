//! Build orchestration.
//!
//! Planning turns a configuration document into external tool invocations;
//! the runner executes them through a [`ProcessExecutor`](crate::util::process::ProcessExecutor).

pub mod errors;
pub mod plan;
pub mod runner;
pub mod submodules;

pub use errors::BuildError;
pub use plan::{plan, FailurePolicy, Invocation, Plan, PlanContext, Step, StepKind};
pub use runner::{PipelineReport, StepOutcome, StepRunner};

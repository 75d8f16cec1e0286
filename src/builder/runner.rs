//! Executes a [`Plan`] step by step.
//!
//! Every step runs with the build directory as its working directory. A
//! failing step either aborts the run or is reported and skipped over,
//! according to its [`FailurePolicy`].

use std::path::Path;

use crate::builder::errors::BuildError;
use crate::builder::plan::{FailurePolicy, Plan, Step, StepKind};
use crate::util::fs::{ensure_dir, remove_dir_all_if_exists};
use crate::util::process::ProcessExecutor;
use crate::util::shell::{Shell, Status};

/// Result of a pipeline run that did not abort.
#[derive(Debug, Default)]
pub struct PipelineReport {
    /// Steps that exited successfully, in order.
    pub completed: Vec<StepKind>,
    /// Failures of steps whose policy is [`FailurePolicy::ReportAndContinue`].
    pub advisory_failures: Vec<BuildError>,
    /// Whether `--clean` removed an existing build directory.
    pub cleaned: bool,
}

impl PipelineReport {
    /// True if every step succeeded.
    pub fn all_passed(&self) -> bool {
        self.advisory_failures.is_empty()
    }
}

/// What happened to a single step that did not abort the run.
#[derive(Debug)]
pub enum StepOutcome {
    Succeeded,
    FailedAdvisory(BuildError),
}

pub struct StepRunner<'a, E: ProcessExecutor> {
    exec: &'a mut E,
    shell: &'a Shell,
}

impl<'a, E: ProcessExecutor> StepRunner<'a, E> {
    pub fn new(exec: &'a mut E, shell: &'a Shell) -> Self {
        StepRunner { exec, shell }
    }

    /// Run configure, build and (when planned) test.
    ///
    /// With `clean`, an existing build directory is removed first. The build
    /// directory is created if missing.
    pub fn run_pipeline(&mut self, plan: &Plan, clean: bool) -> Result<PipelineReport, BuildError> {
        let build_dir = plan.build_dir();
        let mut report = PipelineReport::default();

        if clean {
            report.cleaned = remove_dir_all_if_exists(build_dir)
                .map_err(|e| BuildError::filesystem(build_dir, e))?;
            if report.cleaned {
                self.shell
                    .status(Status::Removed, format!("{}", build_dir.display()));
            }
        }
        ensure_dir(build_dir).map_err(|e| BuildError::filesystem(build_dir, e))?;

        for step in plan.pipeline() {
            match self.run_step(step, build_dir)? {
                StepOutcome::Succeeded => report.completed.push(step.kind),
                StepOutcome::FailedAdvisory(err) => report.advisory_failures.push(err),
            }
        }

        Ok(report)
    }

    /// Run the install step against an already configured build directory.
    pub fn install(&mut self, plan: &Plan) -> Result<(), BuildError> {
        let build_dir = plan.build_dir();
        if !build_dir.is_dir() {
            return Err(BuildError::NotConfigured {
                path: build_dir.to_path_buf(),
            });
        }
        match self.run_step(plan.install(), build_dir)? {
            StepOutcome::Succeeded => Ok(()),
            StepOutcome::FailedAdvisory(err) => Err(err),
        }
    }

    /// Echo, run and judge one step.
    pub fn run_step(&mut self, step: &Step, cwd: &Path) -> Result<StepOutcome, BuildError> {
        let command = step.invocation.to_string();
        let span = self.shell.span(status_for(step.kind), &command);
        if self.shell.is_verbose() {
            self.shell.note(format!("working directory {}", cwd.display()));
        }

        // A step that cannot be spawned has failed like any other.
        let err = match self.exec.status(&step.invocation, cwd) {
            Ok(status) if status.success() => {
                span.finish(format!("{} step", step.kind));
                return Ok(StepOutcome::Succeeded);
            }
            Ok(status) => BuildError::step_failed(step.kind, command, status),
            Err(e) => BuildError::Spawn {
                command,
                message: format!("{:#}", e),
            },
        };

        match step.policy {
            FailurePolicy::AbortPipeline => Err(err),
            FailurePolicy::ReportAndContinue => {
                tracing::debug!("{} step failed, continuing", step.kind);
                self.shell.warn(format!("{}; continuing", err));
                Ok(StepOutcome::FailedAdvisory(err))
            }
        }
    }
}

fn status_for(kind: StepKind) -> Status {
    match kind {
        StepKind::Configure => Status::Configuring,
        StepKind::Build => Status::Building,
        StepKind::Test => Status::Testing,
        StepKind::Install => Status::Installing,
    }
}

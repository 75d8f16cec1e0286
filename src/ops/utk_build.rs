//! Implementation of `utk-build`.

use std::path::PathBuf;

use anyhow::Result;

use crate::builder::plan::{plan, Plan, PlanContext};
use crate::builder::runner::{PipelineReport, StepRunner};
use crate::builder::submodules;
use crate::core::Document;
use crate::util::fs::absolute;
use crate::util::process::ProcessExecutor;
use crate::util::prompt::Prompter;
use crate::util::shell::{Shell, Status};

/// Options for the build command.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Project root (where the top-level `CMakeLists.txt` lives)
    pub source_dir: PathBuf,

    /// Build directory (default: `<source_dir>/build`)
    pub build_dir: Option<PathBuf>,

    /// Parallel jobs (default: logical CPU count)
    pub jobs: Option<usize>,

    /// CMake generator passed with `-G`
    pub generator: Option<String>,

    /// Remove the build directory before configuring
    pub clean: bool,

    /// Look for uninitialized submodules before configuring
    pub submodule_check: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            source_dir: PathBuf::from("."),
            build_dir: None,
            jobs: None,
            generator: None,
            clean: false,
            submodule_check: true,
        }
    }
}

impl BuildOptions {
    /// Resolve directories to absolute paths and fill in detected defaults.
    pub fn plan_context(&self) -> Result<PlanContext> {
        let source_dir = absolute(&self.source_dir)?;
        let build_dir = match self.build_dir {
            Some(ref dir) => absolute(dir)?,
            None => source_dir.join("build"),
        };

        let mut ctx = PlanContext::new(source_dir, build_dir).with_generator(self.generator.clone());
        if let Some(jobs) = self.jobs {
            ctx = ctx.with_jobs(jobs);
        }
        Ok(ctx)
    }

    /// Plan for `doc` under these options.
    pub fn plan(&self, doc: &Document) -> Result<Plan> {
        Ok(plan(doc, &self.plan_context()?))
    }
}

/// Run the configure, build and test pipeline.
///
/// Test failures are reported on the shell and recorded in the returned
/// report; only configure and build failures make this return an error.
pub fn build<E, P>(
    doc: &Document,
    opts: &BuildOptions,
    exec: &mut E,
    prompter: &mut P,
    shell: &Shell,
) -> Result<PipelineReport>
where
    E: ProcessExecutor,
    P: Prompter,
{
    for warning in doc.warnings() {
        shell.warn(warning);
    }

    let plan = opts.plan(doc)?;
    tracing::debug!(
        "building in {} with {} step(s)",
        plan.build_dir().display(),
        plan.pipeline().len()
    );

    if opts.submodule_check {
        check_submodules(opts, exec, prompter, shell)?;
    }

    let report = StepRunner::new(exec, shell).run_pipeline(&plan, opts.clean)?;

    if report.all_passed() {
        shell.status(Status::Finished, format!("{} build", plan.build_type));
    } else {
        shell.warn(format!(
            "{} build finished with failing tests",
            plan.build_type
        ));
    }

    Ok(report)
}

/// Install the already-built tree.
pub fn install<E: ProcessExecutor>(
    doc: &Document,
    opts: &BuildOptions,
    exec: &mut E,
    shell: &Shell,
) -> Result<()> {
    let plan = opts.plan(doc)?;
    StepRunner::new(exec, shell).install(&plan)?;
    shell.status(Status::Finished, "install");
    Ok(())
}

/// Initialize all submodules of the source tree.
pub fn init_submodules<E: ProcessExecutor>(
    opts: &BuildOptions,
    exec: &mut E,
    shell: &Shell,
) -> Result<()> {
    let source_dir = absolute(&opts.source_dir)?;
    shell.status(Status::Updating, "submodules");
    submodules::init(exec, &source_dir)?;
    shell.status(Status::Finished, "submodule initialization");
    Ok(())
}

/// Offer to initialize submodules that were never checked out.
///
/// A failed query (no git, not a repository) only warns. Declining continues
/// the build as is.
fn check_submodules<E, P>(
    opts: &BuildOptions,
    exec: &mut E,
    prompter: &mut P,
    shell: &Shell,
) -> Result<()>
where
    E: ProcessExecutor,
    P: Prompter,
{
    let source_dir = absolute(&opts.source_dir)?;
    if !source_dir.join(".gitmodules").exists() {
        tracing::debug!("no .gitmodules in {}", source_dir.display());
        return Ok(());
    }

    let found = match submodules::query(exec, &source_dir) {
        Ok(found) => found,
        Err(e) => {
            shell.warn(format!("{}; skipping submodule check", e));
            return Ok(());
        }
    };

    let missing = submodules::uninitialized(&found);
    if missing.is_empty() {
        return Ok(());
    }

    shell.warn(format!("{} uninitialized submodule(s):", missing.len()));
    for sub in &missing {
        shell.note(format!("  - {}", sub));
    }

    if prompter.confirm("Initialize submodules?", false)? {
        shell.status(Status::Updating, "submodules");
        submodules::init(exec, &source_dir)?;
    } else {
        shell.status(Status::Skipped, "submodule initialization");
    }
    Ok(())
}

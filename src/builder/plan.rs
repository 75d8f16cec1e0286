//! Translation of a configuration document into external invocations.
//!
//! Planning is pure: the same document and [`PlanContext`] always produce the
//! same [`Plan`], and the document is only ever borrowed. Map-valued sections
//! are emitted in lexicographic key order.

use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::core::document::on_off;
use crate::core::platform::{self, PlatformId};
use crate::core::Document;

pub use crate::util::process::Invocation;

/// Build-generation and build-execution tool.
pub const CMAKE: &str = "cmake";

/// Test runner.
pub const CTEST: &str = "ctest";

/// Parallelism used when the CPU count cannot be detected.
pub const FALLBACK_JOBS: usize = 4;

/// Prefix of every project-level CMake variable this tool sets.
pub const VAR_PREFIX: &str = "UTOOLKIT";

/// Logical CPU count, or [`FALLBACK_JOBS`] if it cannot be determined.
pub fn detect_jobs() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(FALLBACK_JOBS)
}

/// The kinds of step a plan can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Configure,
    Build,
    Test,
    Install,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Configure => "configure",
            StepKind::Build => "build",
            StepKind::Test => "test",
            StepKind::Install => "install",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a non-zero exit of a step means for the rest of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the pipeline; the run fails.
    AbortPipeline,
    /// Report the failure and carry on; the run still succeeds.
    ReportAndContinue,
}

/// One planned invocation with its failure policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub kind: StepKind,
    pub invocation: Invocation,
    pub policy: FailurePolicy,
}

impl Step {
    fn new(kind: StepKind, invocation: Invocation) -> Self {
        let policy = match kind {
            StepKind::Test => FailurePolicy::ReportAndContinue,
            StepKind::Configure | StepKind::Build | StepKind::Install => {
                FailurePolicy::AbortPipeline
            }
        };
        Step {
            kind,
            invocation,
            policy,
        }
    }
}

/// Everything besides the document that planning depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanContext {
    /// Platform `auto` resolves to.
    pub host: PlatformId,
    /// Project root containing the top-level `CMakeLists.txt`.
    pub source_dir: PathBuf,
    /// Directory the tree is configured into; all steps run here.
    pub build_dir: PathBuf,
    /// Parallelism forwarded to the build and test tools.
    pub jobs: usize,
    /// Generator passed with `-G`; CMake's default applies when unset.
    pub generator: Option<String>,
}

impl PlanContext {
    /// Context for the current host with detected parallelism.
    pub fn new(source_dir: impl Into<PathBuf>, build_dir: impl Into<PathBuf>) -> Self {
        PlanContext {
            host: platform::detect(),
            source_dir: source_dir.into(),
            build_dir: build_dir.into(),
            jobs: detect_jobs(),
            generator: None,
        }
    }

    pub fn with_host(mut self, host: PlatformId) -> Self {
        self.host = host;
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn with_generator(mut self, generator: Option<String>) -> Self {
        self.generator = generator;
        self
    }
}

/// The ordered steps for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Resolved platform; never `auto`.
    pub platform: PlatformId,
    /// Build type handed to CMake.
    pub build_type: String,
    pipeline: Vec<Step>,
    install: Step,
    build_dir: PathBuf,
}

impl Plan {
    /// Steps of the default pipeline: configure, build, and test when enabled.
    pub fn pipeline(&self) -> &[Step] {
        &self.pipeline
    }

    /// The install step, run only on explicit request.
    pub fn install(&self) -> &Step {
        &self.install
    }

    /// Find a pipeline step by kind.
    pub fn step(&self, kind: StepKind) -> Option<&Step> {
        if kind == StepKind::Install {
            return Some(&self.install);
        }
        self.pipeline.iter().find(|s| s.kind == kind)
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }
}

/// Plan the configure, build, test and install steps for `doc`.
pub fn plan(doc: &Document, ctx: &PlanContext) -> Plan {
    let platform = platform::resolve(&doc.platform, &ctx.host);
    let build_type = doc.effective_build_type().to_string();

    let mut pipeline = vec![
        Step::new(StepKind::Configure, configure_invocation(doc, ctx)),
        Step::new(StepKind::Build, build_invocation(&build_type, ctx)),
    ];
    if doc.tests_enabled() {
        pipeline.push(Step::new(StepKind::Test, test_invocation(ctx)));
    }

    tracing::debug!(
        "planned {} step(s) for {} ({})",
        pipeline.len(),
        platform,
        build_type
    );

    Plan {
        platform,
        build_type,
        pipeline,
        install: Step::new(StepKind::Install, install_invocation(ctx)),
        build_dir: ctx.build_dir.clone(),
    }
}

/// `cmake -S <src> -B <build> [-G <gen>] -DCMAKE_BUILD_TYPE=... -D...`
pub fn configure_invocation(doc: &Document, ctx: &PlanContext) -> Invocation {
    let mut inv = Invocation::new(CMAKE)
        .arg("-S")
        .arg(path_arg(&ctx.source_dir))
        .arg("-B")
        .arg(path_arg(&ctx.build_dir));

    if let Some(ref generator) = ctx.generator {
        inv = inv.arg("-G").arg(generator.as_str());
    }

    inv.arg(format!("-DCMAKE_BUILD_TYPE={}", doc.effective_build_type()))
        .args(definitions(doc))
}

/// The `-D` definitions derived from the document, in emission order:
/// `cmake_options`, then third-party switches, then module switches. A module
/// switch never repeats a variable set earlier.
pub fn definitions(doc: &Document) -> Vec<String> {
    let mut defs = Vec::new();

    for (key, value) in &doc.cmake_options {
        defs.push(format!("-D{}={}", key, value.render()));
    }

    for (name, dep) in &doc.third_party {
        defs.push(format!(
            "-D{}_ENABLE_{}={}",
            VAR_PREFIX,
            name.to_uppercase(),
            on_off(dep.enabled)
        ));
    }

    for (var, on) in doc.module_flags() {
        defs.push(format!("-D{}={}", var, on_off(on)));
    }

    defs
}

/// `cmake --build <build> --config <type> --parallel <n>`
pub fn build_invocation(build_type: &str, ctx: &PlanContext) -> Invocation {
    Invocation::new(CMAKE)
        .arg("--build")
        .arg(path_arg(&ctx.build_dir))
        .arg("--config")
        .arg(build_type)
        .arg("--parallel")
        .arg(ctx.jobs.to_string())
}

/// `ctest --output-on-failure -j <n>`, run from the build directory.
pub fn test_invocation(ctx: &PlanContext) -> Invocation {
    Invocation::new(CTEST)
        .arg("--output-on-failure")
        .arg("-j")
        .arg(ctx.jobs.to_string())
}

/// `cmake --install <build>`
pub fn install_invocation(ctx: &PlanContext) -> Invocation {
    Invocation::new(CMAKE)
        .arg("--install")
        .arg(path_arg(&ctx.build_dir))
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

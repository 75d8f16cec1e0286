//! utoolkit-build - configuration-driven CMake orchestration
//!
//! Reads a JSON build configuration, turns it into `cmake`/`ctest`
//! invocations and runs them as a configure, build and test pipeline.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for unit tests.
///
/// Only compiled for `cfg(test)`. Provides a recording process executor and
/// project fixtures.
#[cfg(test)]
pub mod test_support;

pub use builder::{plan, BuildError, Plan, PlanContext};
pub use core::{Document, PlatformId, Preset};
pub use util::config::ConfigError;

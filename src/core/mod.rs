//! Core data structures.
//!
//! - The configuration document and its value types
//! - Host platform detection
//! - The shipped presets

pub mod document;
pub mod platform;
pub mod presets;

pub use document::{
    BuildType, Document, ModuleConfig, OptionValue, PlatformSetting, ThirdPartyConfig,
};
pub use platform::{Generator, PlatformId};
pub use presets::Preset;

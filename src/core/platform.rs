//! Host platform detection.
//!
//! The document may pin a platform or leave it as `"auto"`; `auto` is only
//! ever resolved here, at plan time, and never written back.

use std::fmt;

use crate::core::document::PlatformSetting;

/// A concrete platform identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlatformId {
    Windows,
    Macos,
    Linux,
    /// Any other operating system, by name.
    Other(String),
}

impl PlatformId {
    /// Map an operating system name as reported by the host (`std::env::consts::OS`
    /// style, any case) to a platform id.
    pub fn from_os(os: &str) -> Self {
        let os = os.to_lowercase();
        match os.as_str() {
            "windows" => PlatformId::Windows,
            "macos" | "darwin" => PlatformId::Macos,
            "linux" => PlatformId::Linux,
            _ => PlatformId::Other(os),
        }
    }

    /// Interpret a platform name stored in a configuration document.
    ///
    /// Known names are matched exactly; anything else is kept verbatim.
    pub fn from_stored(name: &str) -> Self {
        match name {
            "windows" => PlatformId::Windows,
            "macos" => PlatformId::Macos,
            "linux" => PlatformId::Linux,
            other => PlatformId::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PlatformId::Windows => "windows",
            PlatformId::Macos => "macos",
            PlatformId::Linux => "linux",
            PlatformId::Other(name) => name,
        }
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CMake generator families we know a sensible default for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    VisualStudio2022,
    UnixMakefiles,
}

impl Generator {
    /// Default generator for a platform.
    pub fn for_platform(platform: &PlatformId) -> Self {
        match platform {
            PlatformId::Windows => Generator::VisualStudio2022,
            _ => Generator::UnixMakefiles,
        }
    }

    /// The generator name as CMake expects it after `-G`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Generator::VisualStudio2022 => "Visual Studio 17 2022",
            Generator::UnixMakefiles => "Unix Makefiles",
        }
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detect the platform this process is running on.
pub fn detect() -> PlatformId {
    PlatformId::from_os(std::env::consts::OS)
}

/// Advisory generator for the host.
///
/// Plans never carry this unless the caller passes it explicitly; CMake's own
/// default applies otherwise.
pub fn default_generator() -> Generator {
    Generator::for_platform(&detect())
}

/// Resolve a stored platform setting against the host platform.
pub fn resolve(setting: &PlatformSetting, host: &PlatformId) -> PlatformId {
    match setting {
        PlatformSetting::Auto => host.clone(),
        PlatformSetting::Fixed(id) => id.clone(),
    }
}

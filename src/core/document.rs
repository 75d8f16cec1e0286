//! The build configuration document.
//!
//! A document is loaded once per run and handed around by reference. Validation
//! is relaxed: unknown build types, platforms and top-level keys are
//! accepted and carried through a save unchanged.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::platform::PlatformId;
use crate::core::presets::Preset;

/// Option that gates the test step.
pub const BUILD_TESTS_OPTION: &str = "UTOOLKIT_BUILD_TESTS";

/// Option that toggles example programs project-wide.
pub const BUILD_EXAMPLES_OPTION: &str = "UTOOLKIT_BUILD_EXAMPLES";

/// Prefix of the per-module switches; the module name follows, uppercased.
pub const MODULE_FLAG_PREFIX: &str = "UTOOLKIT_BUILD_";

/// Platform selection as stored in a document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlatformSetting {
    /// Detect the host platform when planning.
    #[default]
    Auto,
    Fixed(PlatformId),
}

impl From<String> for PlatformSetting {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case("auto") {
            PlatformSetting::Auto
        } else {
            PlatformSetting::Fixed(PlatformId::from_stored(&s))
        }
    }
}

impl From<PlatformSetting> for String {
    fn from(setting: PlatformSetting) -> Self {
        setting.to_string()
    }
}

impl fmt::Display for PlatformSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformSetting::Auto => f.write_str("auto"),
            PlatformSetting::Fixed(id) => write!(f, "{}", id),
        }
    }
}

/// The CMake build types the interactive flow offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildType {
    #[default]
    Release,
    Debug,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    pub const ALL: [BuildType; 4] = [
        BuildType::Release,
        BuildType::Debug,
        BuildType::RelWithDebInfo,
        BuildType::MinSizeRel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Release => "Release",
            BuildType::Debug => "Debug",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
            BuildType::MinSizeRel => "MinSizeRel",
        }
    }
}

impl FromStr for BuildType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuildType::ALL
            .into_iter()
            .find(|bt| bt.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "invalid build type '{}'; expected one of Release, Debug, RelWithDebInfo, MinSizeRel",
                    s
                )
            })
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a `cmake_options` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    String(String),
    /// Numbers and anything else JSON can hold, rendered in plain form.
    Other(Value),
}

impl OptionValue {
    /// Render the value as it appears after `-D<KEY>=`.
    pub fn render(&self) -> String {
        match self {
            OptionValue::Bool(b) => on_off(*b).to_string(),
            OptionValue::String(s) => s.clone(),
            OptionValue::Other(v) => v.to_string(),
        }
    }

    /// Whether CMake would treat this value as true.
    pub fn is_truthy(&self) -> bool {
        match self {
            OptionValue::Bool(b) => *b,
            OptionValue::String(s) => cmake_truthy(s),
            OptionValue::Other(Value::Null) => false,
            OptionValue::Other(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            OptionValue::Other(_) => true,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::String(s.to_string())
    }
}

/// `ON`/`OFF` token for a boolean.
pub fn on_off(b: bool) -> &'static str {
    if b {
        "ON"
    } else {
        "OFF"
    }
}

/// CMake's notion of a false constant, case-insensitive.
fn cmake_truthy(s: &str) -> bool {
    let upper = s.trim().to_uppercase();
    if upper.is_empty() || upper.ends_with("-NOTFOUND") {
        return false;
    }
    if let Ok(n) = upper.parse::<f64>() {
        return n != 0.0;
    }
    !matches!(
        upper.as_str(),
        "OFF" | "NO" | "FALSE" | "N" | "IGNORE" | "NOTFOUND"
    )
}

fn default_true() -> bool {
    true
}

fn default_build_type() -> String {
    BuildType::Release.as_str().to_string()
}

/// Per-module switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub tests: bool,
    #[serde(default = "default_true")]
    pub examples: bool,
}

impl ModuleConfig {
    pub fn new(enabled: bool, tests: bool, examples: bool) -> Self {
        ModuleConfig {
            enabled,
            tests,
            examples,
        }
    }

    pub fn disabled() -> Self {
        ModuleConfig::new(false, false, false)
    }

    /// Tests are wanted only for an enabled module.
    pub fn wants_tests(&self) -> bool {
        self.enabled && self.tests
    }

    /// Examples are wanted only for an enabled module.
    pub fn wants_examples(&self) -> bool {
        self.enabled && self.examples
    }

    /// CMake switches for the module called `name`. A disabled module only
    /// gets its main switch.
    pub fn flags(&self, name: &str) -> Vec<(String, bool)> {
        let var = format!("{}{}", MODULE_FLAG_PREFIX, name.to_uppercase());
        let mut flags = vec![(var.clone(), self.enabled)];
        if self.enabled {
            flags.push((format!("{}_TESTS", var), self.wants_tests()));
            flags.push((format!("{}_EXAMPLES", var), self.wants_examples()));
        }
        flags
    }
}

impl Default for ModuleConfig {
    fn default() -> Self {
        ModuleConfig::new(true, true, true)
    }
}

/// Per-dependency switches. `examples` and `tests` are optional and stay
/// absent through a save when they were absent on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThirdPartyConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tests: Option<bool>,
}

impl ThirdPartyConfig {
    pub fn new(enabled: bool, examples: bool, tests: bool) -> Self {
        ThirdPartyConfig {
            enabled,
            examples: Some(examples),
            tests: Some(tests),
        }
    }

    pub fn wants_tests(&self) -> bool {
        self.enabled && self.tests.unwrap_or(false)
    }

    pub fn wants_examples(&self) -> bool {
        self.enabled && self.examples.unwrap_or(false)
    }
}

impl Default for ThirdPartyConfig {
    fn default() -> Self {
        ThirdPartyConfig {
            enabled: true,
            examples: None,
            tests: None,
        }
    }
}

/// The configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub platform: PlatformSetting,

    #[serde(default = "default_build_type")]
    pub build_type: String,

    #[serde(default)]
    pub modules: BTreeMap<String, ModuleConfig>,

    #[serde(default)]
    pub third_party: BTreeMap<String, ThirdPartyConfig>,

    #[serde(default)]
    pub cmake_options: BTreeMap<String, OptionValue>,

    /// Top-level keys this tool does not interpret.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Document {
    /// A document with no modules, dependencies or options.
    pub fn empty() -> Self {
        Document {
            platform: PlatformSetting::Auto,
            build_type: default_build_type(),
            modules: BTreeMap::new(),
            third_party: BTreeMap::new(),
            cmake_options: BTreeMap::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Build type to pass to CMake; `Release` when absent or blank.
    pub fn effective_build_type(&self) -> &str {
        let bt = self.build_type.trim();
        if bt.is_empty() {
            BuildType::Release.as_str()
        } else {
            bt
        }
    }

    /// Whether the test step should run. Defaults to true when the option is absent.
    pub fn tests_enabled(&self) -> bool {
        self.cmake_options
            .get(BUILD_TESTS_OPTION)
            .map_or(true, OptionValue::is_truthy)
    }

    /// Per-module switches in key order, leaving out any whose variable is a
    /// project-wide option or is set explicitly in `cmake_options`.
    pub fn module_flags(&self) -> Vec<(String, bool)> {
        self.modules
            .iter()
            .flat_map(|(name, module)| module.flags(name))
            .filter(|(var, _)| !self.is_reserved_variable(var))
            .collect()
    }

    fn is_reserved_variable(&self, var: &str) -> bool {
        var == BUILD_TESTS_OPTION
            || var == BUILD_EXAMPLES_OPTION
            || self.cmake_options.contains_key(var)
    }

    /// Non-fatal observations about values this tool does not recognise.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.build_type.parse::<BuildType>().is_err() && !self.build_type.trim().is_empty() {
            warnings.push(format!(
                "unrecognised build type `{}`; passing it to CMake unchanged",
                self.build_type
            ));
        }

        if let PlatformSetting::Fixed(PlatformId::Other(name)) = &self.platform {
            warnings.push(format!("unrecognised platform `{}`", name));
        }

        for key in self.extra.keys() {
            warnings.push(format!("unknown configuration key `{}` is ignored", key));
        }

        for (name, module) in &self.modules {
            for (var, _) in module.flags(name) {
                if self.is_reserved_variable(&var) {
                    warnings.push(format!(
                        "module `{}` would override `{}`; its switch is not passed to CMake",
                        name, var
                    ));
                }
            }
        }

        warnings
    }
}

impl Default for Document {
    fn default() -> Self {
        Preset::Default.document()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_setting_parse() {
        assert_eq!(PlatformSetting::from("auto".to_string()), PlatformSetting::Auto);
        assert_eq!(PlatformSetting::from("AUTO".to_string()), PlatformSetting::Auto);
        assert_eq!(
            PlatformSetting::from("linux".to_string()),
            PlatformSetting::Fixed(PlatformId::Linux)
        );
        assert_eq!(PlatformSetting::Auto.to_string(), "auto");
    }

    #[test]
    fn test_build_type_parse() {
        assert_eq!("Debug".parse::<BuildType>().unwrap(), BuildType::Debug);
        assert_eq!(
            "MinSizeRel".parse::<BuildType>().unwrap(),
            BuildType::MinSizeRel
        );
        assert!("debug".parse::<BuildType>().is_err());
        assert!("".parse::<BuildType>().is_err());
    }

    #[test]
    fn test_option_value_render() {
        assert_eq!(OptionValue::Bool(true).render(), "ON");
        assert_eq!(OptionValue::Bool(false).render(), "OFF");
        assert_eq!(OptionValue::from("/usr/local").render(), "/usr/local");
        assert_eq!(OptionValue::Other(serde_json::json!(17)).render(), "17");
    }

    #[test]
    fn test_option_value_truthiness() {
        assert!(OptionValue::Bool(true).is_truthy());
        assert!(!OptionValue::Bool(false).is_truthy());
        assert!(OptionValue::from("ON").is_truthy());
        assert!(OptionValue::from("yes").is_truthy());
        assert!(!OptionValue::from("OFF").is_truthy());
        assert!(!OptionValue::from("false").is_truthy());
        assert!(!OptionValue::from("0").is_truthy());
        assert!(!OptionValue::from("").is_truthy());
        assert!(!OptionValue::from("GTest-NOTFOUND").is_truthy());
        assert!(!OptionValue::Other(serde_json::json!(0)).is_truthy());
        assert!(OptionValue::Other(serde_json::json!(2)).is_truthy());
    }

    #[test]
    fn test_option_value_deserialize_variants() {
        let v: OptionValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, OptionValue::Bool(true));
        let v: OptionValue = serde_json::from_str("\"x\"").unwrap();
        assert_eq!(v, OptionValue::from("x"));
        let v: OptionValue = serde_json::from_str("20").unwrap();
        assert_eq!(v.render(), "20");
    }

    #[test]
    fn test_module_defaults_when_fields_missing() {
        let m: ModuleConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(m, ModuleConfig::new(true, true, true));
    }

    #[test]
    fn test_disabled_module_dominates() {
        let m = ModuleConfig::new(false, true, true);
        assert!(!m.wants_tests());
        assert!(!m.wants_examples());
    }

    #[test]
    fn test_third_party_enabled_defaults_true() {
        let tp: ThirdPartyConfig = serde_json::from_str("{\"examples\": true}").unwrap();
        assert!(tp.enabled);
        assert_eq!(tp.tests, None);
        assert!(tp.wants_examples());
        assert!(!tp.wants_tests());
    }

    #[test]
    fn test_third_party_absent_fields_not_serialized() {
        let tp = ThirdPartyConfig::default();
        assert_eq!(serde_json::to_string(&tp).unwrap(), "{\"enabled\":true}");
    }

    #[test]
    fn test_document_missing_fields_default() {
        let doc: Document = serde_json::from_str("{}").unwrap();
        assert_eq!(doc.platform, PlatformSetting::Auto);
        assert_eq!(doc.build_type, "Release");
        assert!(doc.modules.is_empty());
        assert!(doc.tests_enabled());
    }

    #[test]
    fn test_effective_build_type_blank() {
        let mut doc = Document::empty();
        doc.build_type = "  ".to_string();
        assert_eq!(doc.effective_build_type(), "Release");
        doc.build_type = "Debug".to_string();
        assert_eq!(doc.effective_build_type(), "Debug");
    }

    #[test]
    fn test_tests_enabled_follows_option() {
        let mut doc = Document::empty();
        doc.cmake_options
            .insert(BUILD_TESTS_OPTION.to_string(), OptionValue::Bool(false));
        assert!(!doc.tests_enabled());
        doc.cmake_options
            .insert(BUILD_TESTS_OPTION.to_string(), OptionValue::from("ON"));
        assert!(doc.tests_enabled());
    }

    #[test]
    fn test_unknown_keys_preserved() {
        let doc: Document =
            serde_json::from_str("{\"build_type\": \"Debug\", \"owner\": \"ci\"}").unwrap();
        assert_eq!(doc.extra.get("owner"), Some(&serde_json::json!("ci")));
        let out = serde_json::to_string(&doc).unwrap();
        assert!(out.contains("\"owner\":\"ci\""));
    }

    #[test]
    fn test_warnings() {
        let doc: Document = serde_json::from_str(
            "{\"build_type\": \"Fast\", \"platform\": \"plan9\", \"owner\": \"ci\"}",
        )
        .unwrap();
        let warnings = doc.warnings();
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("Fast"));
        assert!(warnings[1].contains("plan9"));
        assert!(warnings[2].contains("owner"));

        assert!(Document::default().warnings().is_empty());
    }

    #[test]
    fn test_module_flags() {
        let mut doc = Document::empty();
        doc.modules.insert("utils".into(), ModuleConfig::new(true, false, true));
        doc.modules.insert("logging".into(), ModuleConfig::disabled());

        assert_eq!(
            doc.module_flags(),
            vec![
                ("UTOOLKIT_BUILD_LOGGING".to_string(), false),
                ("UTOOLKIT_BUILD_UTILS".to_string(), true),
                ("UTOOLKIT_BUILD_UTILS_TESTS".to_string(), false),
                ("UTOOLKIT_BUILD_UTILS_EXAMPLES".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_module_flags_never_override_project_options() {
        let doc: Document = serde_json::from_str(
            r#"{
                "cmake_options": {"UTOOLKIT_BUILD_TESTS": false, "UTOOLKIT_BUILD_UTILS_TESTS": "ON"},
                "modules": {"tests": {}, "examples": {"enabled": false}, "utils": {}}
            }"#,
        )
        .unwrap();

        let vars: Vec<_> = doc.module_flags().into_iter().map(|(var, _)| var).collect();
        assert_eq!(
            vars,
            vec![
                "UTOOLKIT_BUILD_TESTS_TESTS",
                "UTOOLKIT_BUILD_TESTS_EXAMPLES",
                "UTOOLKIT_BUILD_UTILS",
                "UTOOLKIT_BUILD_UTILS_EXAMPLES",
            ]
        );

        let warnings = doc.warnings();
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("module `examples` would override `UTOOLKIT_BUILD_EXAMPLES`"));
        assert!(warnings[1].contains("module `tests` would override `UTOOLKIT_BUILD_TESTS`"));
        assert!(warnings[2].contains("`UTOOLKIT_BUILD_UTILS_TESTS`"));
    }
}

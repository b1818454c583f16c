//! Output-generator selection.
//!
//! The generators themselves live outside this crate; what lives here is
//! the seam they plug into (a name registry behind a small trait) plus
//! the rules for picking formats and merging generator flags from the
//! command line and the environment.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use anyhow::Result;
use regex::Regex;

use crate::util::envvars::EnvSnapshot;

/// Environment variable listing output formats, consulted only when no
/// explicit selection is given.
pub const GENERATORS_VAR: &str = "SLIPWAY_GENERATORS";

/// Environment variable carrying `NAME=VALUE` generator flags.
pub const GENERATOR_FLAGS_VAR: &str = "SLIPWAY_GENERATOR_FLAGS";

/// Parameters handed to a generator's emission entry point.
#[derive(Debug, Clone, Default)]
pub struct GeneratorParams {
    /// Merged generator flags
    pub flags: GeneratorFlags,
    /// Where generated build files go, when overridden
    pub output_dir: Option<PathBuf>,
}

/// An output generator.
///
/// Implementations supply their default variable table, may adjust it
/// once the run parameters are known, and emit build files for a
/// flattened target graph they receive out of band.
pub trait Generator {
    /// The format name this generator serves.
    fn name(&self) -> &str;

    /// Variable defaults this generator contributes.
    fn default_variables(&self) -> BTreeMap<String, String>;

    /// Hook to adjust variables once run parameters are known.
    fn calculate_variables(&self, _defaults: &mut BTreeMap<String, String>, _params: &GeneratorParams) {}

    /// Emit output for the current run.
    fn generate(&self, params: &GeneratorParams) -> Result<()>;
}

type GeneratorCtor = Box<dyn Fn() -> Box<dyn Generator>>;

/// Registry mapping a format name to a generator constructor.
///
/// Built-in formats are pre-registered by the embedding tool; externally
/// supplied generators register through the same interface.
#[derive(Default)]
pub struct GeneratorRegistry {
    entries: BTreeMap<String, GeneratorCtor>,
}

impl GeneratorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        GeneratorRegistry::default()
    }

    /// Register a constructor for a format name. A later registration
    /// for the same name replaces the earlier one.
    pub fn register(&mut self, name: impl Into<String>, ctor: impl Fn() -> Box<dyn Generator> + 'static) {
        self.entries.insert(name.into(), Box::new(ctor));
    }

    /// Construct the generator for a format name.
    pub fn create(&self, name: &str) -> Option<Box<dyn Generator>> {
        self.entries.get(name).map(|ctor| ctor())
    }

    /// Registered format names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|name| name.as_str())
    }
}

/// The default output format for a platform.
pub fn default_format(os_name: &str) -> &'static str {
    match os_name {
        "macos" => "xcode",
        "windows" | "cygwin" => "msvs",
        _ => "make",
    }
}

/// Select the output formats for a run.
///
/// Explicit selections win. Otherwise the generator-selection variable
/// is consulted (when environment influence is enabled), split on
/// whitespace and commas. Failing both, the platform default applies.
pub fn select_formats(explicit: &[String], use_environment: bool, env: &EnvSnapshot) -> Vec<String> {
    if !explicit.is_empty() {
        return explicit.to_vec();
    }
    if use_environment {
        if let Some(value) = env.get(GENERATORS_VAR) {
            let formats: Vec<String> = Regex::new(r"[\s,]+")
                .unwrap()
                .split(value)
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .collect();
            if !formats.is_empty() {
                return formats;
            }
        }
    }
    vec![default_format(std::env::consts::OS).to_string()]
}

/// A generator-flag value.
///
/// Values that look like integers are stored as integers; a bare name
/// with no `=` means boolean true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Bool(b) => write!(f, "{}", b),
            FlagValue::Int(i) => write!(f, "{}", i),
            FlagValue::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Merged `NAME=VALUE` generator flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorFlags(pub BTreeMap<String, FlagValue>);

impl GeneratorFlags {
    /// Merge environment-supplied flags with explicit ones.
    ///
    /// Environment tokens come first so that explicit flags override
    /// them on name collisions.
    pub fn merge(explicit: &[String], use_environment: bool, env: &EnvSnapshot) -> Self {
        let mut items = Vec::new();
        if use_environment {
            items.extend(env.shell_split(GENERATOR_FLAGS_VAR));
        }
        items.extend(explicit.iter().cloned());
        GeneratorFlags(parse_name_value_list(&items))
    }

    /// Look up a flag value.
    pub fn get(&self, name: &str) -> Option<&FlagValue> {
        self.0.get(name)
    }
}

/// Turn `NAME=VALUE` strings into a map. `NAME` alone becomes boolean
/// true; a `VALUE` that parses as an integer is stored as one.
pub fn parse_name_value_list(items: &[String]) -> BTreeMap<String, FlagValue> {
    let mut result = BTreeMap::new();
    for item in items {
        match item.split_once('=') {
            Some((name, value)) => {
                let value = match value.parse::<i64>() {
                    Ok(n) => FlagValue::Int(n),
                    Err(_) => FlagValue::Str(value.to_string()),
                };
                result.insert(name.to_string(), value);
            }
            None => {
                result.insert(item.clone(), FlagValue::Bool(true));
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeGenerator;

    impl Generator for FakeGenerator {
        fn name(&self) -> &str {
            "fake"
        }

        fn default_variables(&self) -> BTreeMap<String, String> {
            BTreeMap::from([("OS".to_string(), "linux".to_string())])
        }

        fn generate(&self, _params: &GeneratorParams) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = GeneratorRegistry::new();
        registry.register("fake", || Box::new(FakeGenerator));

        let generator = registry.create("fake").unwrap();
        assert_eq!(generator.name(), "fake");
        assert_eq!(generator.default_variables()["OS"], "linux");
        assert!(registry.create("msvs").is_none());
    }

    #[test]
    fn test_explicit_formats_win() {
        let env = EnvSnapshot::empty().with(GENERATORS_VAR, "msvs");
        let formats = select_formats(&["ninja".to_string()], true, &env);
        assert_eq!(formats, vec!["ninja"]);
    }

    #[test]
    fn test_formats_from_environment() {
        let env = EnvSnapshot::empty().with(GENERATORS_VAR, "make, ninja xcode");
        let formats = select_formats(&[], true, &env);
        assert_eq!(formats, vec!["make", "ninja", "xcode"]);

        // With environment influence disabled the variable is ignored.
        let formats = select_formats(&[], false, &env);
        assert_eq!(formats, vec![default_format(std::env::consts::OS)]);
    }

    #[test]
    fn test_default_format_by_platform() {
        assert_eq!(default_format("macos"), "xcode");
        assert_eq!(default_format("windows"), "msvs");
        assert_eq!(default_format("cygwin"), "msvs");
        assert_eq!(default_format("linux"), "make");
    }

    #[test]
    fn test_name_value_parsing() {
        let items: Vec<String> = ["debug", "jobs=4", "suffix=dev", "label=a=b"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let flags = parse_name_value_list(&items);
        assert_eq!(flags["debug"], FlagValue::Bool(true));
        assert_eq!(flags["jobs"], FlagValue::Int(4));
        assert_eq!(flags["suffix"], FlagValue::Str("dev".to_string()));
        // Only the first `=` splits.
        assert_eq!(flags["label"], FlagValue::Str("a=b".to_string()));
    }

    #[test]
    fn test_flag_merge_explicit_overrides_env() {
        let env = EnvSnapshot::empty().with(GENERATOR_FLAGS_VAR, "jobs=2 color=auto");
        let explicit = vec!["jobs=8".to_string()];
        let flags = GeneratorFlags::merge(&explicit, true, &env);
        assert_eq!(flags.get("jobs"), Some(&FlagValue::Int(8)));
        assert_eq!(flags.get("color"), Some(&FlagValue::Str("auto".to_string())));

        let flags = GeneratorFlags::merge(&explicit, false, &env);
        assert_eq!(flags.get("color"), None);
    }
}

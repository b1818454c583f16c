//! Command-line regeneration.
//!
//! A sub-build needs to re-invoke this program with flags that reproduce
//! the current configuration even though the environment variables that
//! helped shape it may be gone or changed. Each CLI option registers its
//! regeneration metadata once, at declaration; after parsing, the
//! orchestrator captures an [`OptionsSnapshot`] and [`regenerate`] turns
//! it back into tokens.
//!
//! The output always opens with `--ignore-environment` so that parsing
//! the regenerated command line is unaffected by whatever environment it
//! runs under, which is also what makes regeneration idempotent.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::error::ConfigError;
use crate::util::envvars::EnvSnapshot;
use crate::util::paths;

/// Token that disables environment-variable influence when parsed.
pub const IGNORE_ENVIRONMENT_FLAG: &str = "--ignore-environment";

/// How an option consumes the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionAction {
    /// One value, last occurrence wins
    Store,
    /// Bare flag setting the value to true
    StoreTrue,
    /// Bare flag setting the value to false
    StoreFalse,
    /// Repeatable, values accumulate in order
    Append,
}

impl OptionAction {
    /// The action name as it appears in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionAction::Store => "store",
            OptionAction::StoreTrue => "store_true",
            OptionAction::StoreFalse => "store_false",
            OptionAction::Append => "append",
        }
    }
}

/// How an option's value is interpreted during regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Emit the value as-is
    Plain,
    /// Re-express the value relative to the regeneration base directory
    Path,
}

/// Static regeneration metadata for one CLI option.
#[derive(Debug, Clone)]
pub struct RegisteredOption {
    /// The flag as typed on the command line (e.g. `--depth`, `-D`)
    pub flag: String,
    /// Parsing action
    pub action: OptionAction,
    /// Value interpretation
    pub value_kind: ValueKind,
    /// Environment variable that supplies additional or fallback values
    pub env_name: Option<String>,
}

impl RegisteredOption {
    /// Create metadata for a plain option with no environment tie-in.
    pub fn new(flag: impl Into<String>, action: OptionAction) -> Self {
        RegisteredOption {
            flag: flag.into(),
            action,
            value_kind: ValueKind::Plain,
            env_name: None,
        }
    }

    /// Mark the value as a path to be rebased during regeneration.
    pub fn path(mut self) -> Self {
        self.value_kind = ValueKind::Path;
        self
    }

    /// Tie the option to an environment variable.
    pub fn env(mut self, name: impl Into<String>) -> Self {
        self.env_name = Some(name.into());
        self
    }
}

/// The option table, in declaration order.
///
/// Built once when options are declared; immutable afterwards. Options
/// excluded from regeneration simply never get registered here.
#[derive(Debug, Clone, Default)]
pub struct OptionRegistry {
    entries: Vec<(String, RegisteredOption)>,
}

impl OptionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        OptionRegistry::default()
    }

    /// Register an option under its destination name.
    pub fn register(&mut self, name: impl Into<String>, option: RegisteredOption) {
        self.entries.push((name.into(), option));
    }

    /// Look up an option by destination name.
    pub fn get(&self, name: &str) -> Option<&RegisteredOption> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, option)| option)
    }

    /// Iterate in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, RegisteredOption)> {
        self.entries.iter()
    }
}

/// A parsed option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Str(String),
    Bool(bool),
    List(Vec<String>),
}

/// The current option values, paired with their registration table.
///
/// Constructed once after CLI parsing and read-only from then on.
#[derive(Debug, Clone)]
pub struct OptionsSnapshot {
    registry: OptionRegistry,
    values: HashMap<String, OptionValue>,
}

impl OptionsSnapshot {
    /// Create a snapshot over a registry.
    pub fn new(registry: OptionRegistry) -> Self {
        OptionsSnapshot {
            registry,
            values: HashMap::new(),
        }
    }

    /// Record an option's value. Every recorded name must be registered;
    /// the reverse is not required.
    pub fn with(mut self, name: impl Into<String>, value: OptionValue) -> Self {
        let name = name.into();
        debug_assert!(
            self.registry.get(&name).is_some(),
            "option `{}` has no registration",
            name
        );
        self.values.insert(name, value);
        self
    }

    /// The registration table.
    pub fn registry(&self) -> &OptionRegistry {
        &self.registry
    }

    /// Look up a current value.
    pub fn value(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }
}

/// Inputs that vary per regeneration run.
#[derive(Debug, Clone)]
pub struct RegenContext {
    /// Whether environment variables may contribute values
    pub use_environment: bool,
    /// Base directory path values are re-expressed against
    pub base_dir: PathBuf,
    /// The environment to consult
    pub env: EnvSnapshot,
}

/// Render a flag/value pair as a single token.
///
/// Long flags take `--flag=value`; anything else concatenates directly.
pub fn format_opt(flag: &str, value: &str) -> String {
    if flag.starts_with("--") {
        format!("{}={}", flag, value)
    } else {
        format!("{}{}", flag, value)
    }
}

/// Reconstruct a command line equivalent to the snapshot.
///
/// Parsing the result with environment influence disabled yields the
/// same effective configuration, and regenerating from that parse yields
/// the same tokens again.
pub fn regenerate(
    snapshot: &OptionsSnapshot,
    ctx: &RegenContext,
) -> Result<Vec<String>, ConfigError> {
    let mut flags = vec![IGNORE_ENVIRONMENT_FLAG.to_string()];

    for (name, option) in snapshot.registry.iter() {
        let value = snapshot.values.get(name);
        match option.action {
            OptionAction::Append => {
                flags.extend(regenerate_append(option, value, ctx));
            }
            OptionAction::Store => {
                let explicit = match value {
                    Some(OptionValue::Str(s)) if !s.is_empty() => Some(s.as_str()),
                    _ => None,
                };
                if let Some(explicit) = explicit {
                    flags.push(format_opt(&option.flag, &fix_value(option, explicit, ctx)));
                } else if ctx.use_environment {
                    if let Some(env_name) = &option.env_name {
                        if let Some(env_value) = ctx.env.get(env_name).filter(|v| !v.is_empty()) {
                            flags.push(format_opt(&option.flag, &fix_value(option, env_value, ctx)));
                        }
                    }
                }
            }
            OptionAction::StoreTrue | OptionAction::StoreFalse => {
                let active = matches!(
                    (option.action, value),
                    (OptionAction::StoreTrue, Some(OptionValue::Bool(true)))
                        | (OptionAction::StoreFalse, Some(OptionValue::Bool(false)))
                );
                if active {
                    flags.push(option.flag.clone());
                } else if ctx.use_environment {
                    if let Some(env_name) = &option.env_name {
                        // There is no way to express "read this boolean
                        // from the environment" in the regenerated
                        // command line; surface it instead of guessing.
                        return Err(ConfigError::UnsupportedFallback {
                            flag: option.flag.clone(),
                            action: option.action.as_str(),
                            env_name: env_name.clone(),
                        });
                    }
                }
            }
        }
    }

    Ok(flags)
}

/// Regenerate one `append` option.
///
/// Environment-supplied values come first so that explicit command-line
/// values override them on re-parse, without requiring the environment
/// to be set when the flags are used again. A repeated environment token
/// moves to the end rather than appearing twice.
fn regenerate_append(
    option: &RegisteredOption,
    value: Option<&OptionValue>,
    ctx: &RegenContext,
) -> Vec<String> {
    let mut out = Vec::new();
    if ctx.use_environment {
        if let Some(env_name) = &option.env_name {
            for token in ctx.env.shell_split(env_name) {
                let formatted = format_opt(&option.flag, &fix_value(option, &token, ctx));
                if let Some(pos) = out.iter().position(|existing| existing == &formatted) {
                    out.remove(pos);
                }
                out.push(formatted);
            }
        }
    }
    if let Some(OptionValue::List(values)) = value {
        for item in values {
            out.push(format_opt(&option.flag, &fix_value(option, item, ctx)));
        }
    }
    out
}

fn fix_value(option: &RegisteredOption, value: &str, ctx: &RegenContext) -> String {
    match option.value_kind {
        ValueKind::Plain => value.to_string(),
        ValueKind::Path => paths::fix_if_relative(Path::new(value), &ctx.base_dir)
            .display()
            .to_string(),
    }
}

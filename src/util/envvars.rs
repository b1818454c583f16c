//! Environment variable access.
//!
//! Discovery and regeneration read the environment through an owned
//! snapshot rather than live `std::env` lookups, so components stay
//! deterministic and testable without process-global mocking.

use std::collections::BTreeMap;

/// An immutable snapshot of environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn from_process() -> Self {
        EnvSnapshot {
            vars: std::env::vars().collect(),
        }
    }

    /// An empty snapshot.
    pub fn empty() -> Self {
        EnvSnapshot::default()
    }

    /// Set a variable (snapshot construction only).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Look up a variable.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(|s| s.as_str())
    }

    /// Whether a variable is set (possibly to an empty string).
    pub fn is_set(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Split a variable's value into shell tokens.
    ///
    /// An unset variable, or one whose value does not lex, yields no
    /// tokens.
    pub fn shell_split(&self, key: &str) -> Vec<String> {
        self.get(key)
            .and_then(shlex::split)
            .unwrap_or_default()
    }
}

impl FromIterator<(String, String)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        EnvSnapshot {
            vars: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_is_set() {
        let env = EnvSnapshot::empty().with("CC", "gcc").with("EMPTY", "");
        assert_eq!(env.get("CC"), Some("gcc"));
        assert!(env.is_set("EMPTY"));
        assert!(!env.is_set("CXX"));
    }

    #[test]
    fn test_shell_split() {
        let env = EnvSnapshot::empty().with("FLAGS", "-Ifoo \"-I bar\" baz");
        assert_eq!(env.shell_split("FLAGS"), vec!["-Ifoo", "-I bar", "baz"]);
        assert!(env.shell_split("UNSET").is_empty());
    }

    #[test]
    fn test_shell_split_bad_quoting_yields_nothing() {
        let env = EnvSnapshot::empty().with("FLAGS", "\"unterminated");
        assert!(env.shell_split("FLAGS").is_empty());
    }
}

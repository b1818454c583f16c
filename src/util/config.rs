//! Configuration file support for Slipway.
//!
//! The configuration directory is resolved in this order:
//! 1. An explicit `--config-dir` value
//! 2. The `SLIPWAY_CONFIG_DIR` environment variable (only when
//!    environment influence is enabled)
//! 3. `~/.slipway`, if it exists
//!
//! Toolchain overrides live in `toolchain.toml` inside that directory
//! and take precedence over both environment variables and search.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::util::envvars::EnvSnapshot;

/// Environment variable naming the configuration directory.
pub const CONFIG_DIR_VAR: &str = "SLIPWAY_CONFIG_DIR";

/// File name of the toolchain override file.
pub const TOOLCHAIN_FILE: &str = "toolchain.toml";

/// Toolchain configuration for tool-path overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Toolchain settings
    pub toolchain: ToolchainSettings,
}

/// Explicit tool paths, each optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainSettings {
    /// Path to the C compiler
    pub cc: Option<PathBuf>,

    /// Path to the C++ compiler
    pub cxx: Option<PathBuf>,

    /// Path to the archiver
    pub ar: Option<PathBuf>,

    /// Path to the linker
    pub link: Option<PathBuf>,
}

impl ToolchainConfig {
    /// Load toolchain configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read toolchain config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse toolchain config: {}", path.display()))
    }

    /// Load toolchain configuration, defaulting when the file is absent
    /// or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!(
                    "Failed to load toolchain config from {}: {}",
                    path.display(),
                    e
                );
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Whether any tool path is overridden.
    pub fn has_overrides(&self) -> bool {
        let tc = &self.toolchain;
        tc.cc.is_some() || tc.cxx.is_some() || tc.ar.is_some() || tc.link.is_some()
    }
}

/// Resolve the configuration directory.
///
/// Returns `None` when nothing is configured and `~/.slipway` does not
/// exist; a missing config dir is not an error.
pub fn config_dir(
    explicit: Option<&Path>,
    use_environment: bool,
    env: &EnvSnapshot,
) -> Option<PathBuf> {
    if let Some(dir) = explicit {
        return Some(dir.to_path_buf());
    }

    if use_environment {
        if let Some(dir) = env.get(CONFIG_DIR_VAR) {
            if !dir.is_empty() {
                return Some(PathBuf::from(dir));
            }
        }
    }

    let home = directories::BaseDirs::new()?.home_dir().to_path_buf();
    let default = home.join(".slipway");
    default.exists().then_some(default)
}

/// Path of the toolchain override file inside a config directory.
pub fn toolchain_config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(TOOLCHAIN_FILE)
}

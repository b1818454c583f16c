//! Toolchain discovery.
//!
//! This module locates the compiler, linker, archiver, and native build
//! driver for a target platform and classifies what it found.
//!
//! Resolution priority for each tool:
//! 1. Toolchain config file (`toolchain.toml` in the config dir)
//! 2. Environment variables (`CC`, `CXX`, `AR`, `LINK`)
//! 3. Search of the configured directories, cross-prefixed names first
//!
//! Discovery never fails: a tool that cannot be found or classified is
//! recorded as absent or `unknown`, and the caller decides whether that
//! matters.

use std::path::{Path, PathBuf};

use crate::core::tool::{DriverIdentity, ToolIdentity};
use crate::core::triple::Triple;
use crate::util::config::ToolchainConfig;
use crate::util::envvars::EnvSnapshot;

pub mod host;
pub mod identify;
pub mod locate;
pub mod ndk;

pub use host::detect_build;
pub use identify::{identify_compiler, identify_driver};
pub use locate::ExecutableSearch;

/// Inputs to a discovery run.
#[derive(Debug, Clone, Default)]
pub struct DiscoverOptions {
    /// Target platform; cross-prefixed tool names are tried first when
    /// set. Defaults to the build machine.
    pub host: Option<Triple>,

    /// Override of the executable search directories (e.g. the prebuilt
    /// `bin` dirs of a mobile NDK). Defaults to `PATH`.
    pub search_paths: Option<Vec<PathBuf>>,
}

/// A resolved toolchain: whichever tools were found, plus what they
/// turned out to be.
#[derive(Debug, Clone)]
pub struct Toolchain {
    /// C compiler path
    pub cc: Option<PathBuf>,
    /// C++ compiler path
    pub cxx: Option<PathBuf>,
    /// Archiver path
    pub ar: Option<PathBuf>,
    /// Linker path
    pub link: Option<PathBuf>,
    /// Build driver path
    pub driver: Option<PathBuf>,
    /// Classification of the C compiler
    pub cc_identity: ToolIdentity,
    /// Classification of the build driver
    pub driver_identity: DriverIdentity,
}

impl Toolchain {
    /// Discover the toolchain for `opts`, consulting `config` overrides
    /// first and the environment second.
    pub fn discover(opts: &DiscoverOptions, config: &ToolchainConfig, env: &EnvSnapshot) -> Self {
        let host = opts.host.as_ref();
        let paths = opts.search_paths.as_deref();

        let cc = resolve_tool(config.toolchain.cc.as_deref(), || {
            locate::find_cc(host, paths, env).next()
        });
        let cxx = resolve_tool(config.toolchain.cxx.as_deref(), || {
            locate::find_cxx(host, paths, env).next()
        });
        let ar = resolve_tool(config.toolchain.ar.as_deref(), || {
            locate::find_ar(host, paths, env).next()
        });
        let link = resolve_tool(config.toolchain.link.as_deref(), || {
            locate::find_link(host, paths, env).next()
        });
        let driver = locate::find_driver(paths, env).next();

        let cc_identity = cc
            .as_deref()
            .map(identify::identify_compiler)
            .unwrap_or_else(ToolIdentity::unknown);
        let driver_identity = driver
            .as_deref()
            .map(identify::identify_driver)
            .unwrap_or_else(DriverIdentity::unknown);

        if let Some(ref cc) = cc {
            tracing::debug!(
                "discovered cc {} ({} {})",
                cc.display(),
                cc_identity.kind,
                cc_identity.version
            );
        }

        Toolchain {
            cc,
            cxx,
            ar,
            link,
            driver,
            cc_identity,
            driver_identity,
        }
    }

    /// Export the discovered tool paths into the process environment.
    ///
    /// Downstream collaborators (generators, sub-invocations) read
    /// `CC`/`CXX`/`AR`/`LINK` and must observe a resolved toolchain
    /// without re-probing. Only found tools are written.
    pub fn export_env(&self) {
        for (var, path) in [
            ("CC", &self.cc),
            ("CXX", &self.cxx),
            ("AR", &self.ar),
            ("LINK", &self.link),
        ] {
            if let Some(path) = path {
                std::env::set_var(var, path);
            }
        }
    }
}

/// Prefer a configured tool when it resolves; fall back to search.
///
/// A bare name in the config (e.g. `cc = "clang"`) is looked up on PATH
/// the way a shell would run it.
fn resolve_tool(
    configured: Option<&Path>,
    search: impl FnOnce() -> Option<PathBuf>,
) -> Option<PathBuf> {
    match configured {
        Some(path) if path.exists() => Some(path.to_path_buf()),
        Some(path) if path.components().count() == 1 => {
            crate::util::process::find_executable(&path.to_string_lossy()).or_else(|| {
                tracing::warn!("configured tool not found: {}", path.display());
                search()
            })
        }
        Some(path) => {
            tracing::warn!("configured tool not found: {}", path.display());
            search()
        }
        None => search(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[cfg(unix)]
    fn make_executable(dir: &Path, name: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    #[cfg(unix)]
    fn test_discover_uses_first_match_in_search_order() {
        let dir = tempfile::tempdir().unwrap();
        let gcc = make_executable(dir.path(), "gcc");
        make_executable(dir.path(), "gcc-12");

        let opts = DiscoverOptions {
            host: None,
            search_paths: Some(vec![dir.path().to_path_buf()]),
        };
        let toolchain = Toolchain::discover(&opts, &ToolchainConfig::default(), &EnvSnapshot::empty());
        assert_eq!(toolchain.cc, Some(gcc));
    }

    #[test]
    fn test_discover_tolerates_empty_world() {
        let opts = DiscoverOptions {
            host: None,
            search_paths: Some(Vec::new()),
        };
        let env = EnvSnapshot::empty();
        let toolchain = Toolchain::discover(&opts, &ToolchainConfig::default(), &env);
        assert_eq!(toolchain.cc, None);
        assert!(toolchain.cc_identity.is_unknown());
        assert!(toolchain.driver_identity.is_unknown());
    }

    #[test]
    #[cfg(unix)]
    fn test_config_override_beats_search() {
        let dir = tempfile::tempdir().unwrap();
        make_executable(dir.path(), "gcc");
        let pinned = make_executable(dir.path(), "pinned-cc");

        let mut config = ToolchainConfig::default();
        config.toolchain.cc = Some(pinned.clone());

        let opts = DiscoverOptions {
            host: None,
            search_paths: Some(vec![dir.path().to_path_buf()]),
        };
        let toolchain = Toolchain::discover(&opts, &config, &EnvSnapshot::empty());
        assert_eq!(toolchain.cc, Some(pinned));
    }

    #[test]
    #[cfg(unix)]
    fn test_config_bare_name_resolved_on_path() {
        let mut config = ToolchainConfig::default();
        config.toolchain.cc = Some(PathBuf::from("sh"));

        let opts = DiscoverOptions {
            host: None,
            search_paths: Some(Vec::new()),
        };
        let toolchain = Toolchain::discover(&opts, &config, &EnvSnapshot::empty());
        let cc = toolchain.cc.expect("sh should exist on PATH");
        assert!(cc.is_absolute());
        assert!(cc.ends_with("sh"));
    }

    #[test]
    fn test_env_override_is_used_verbatim() {
        let env = EnvSnapshot::empty().with("CC", "/opt/cross/bin/funky-cc");
        let opts = DiscoverOptions {
            host: None,
            search_paths: Some(Vec::new()),
        };
        let toolchain = Toolchain::discover(&opts, &ToolchainConfig::default(), &env);
        // The override is taken as-is even though nothing exists there;
        // identification of it then falls out as unknown.
        assert_eq!(toolchain.cc, Some(PathBuf::from("/opt/cross/bin/funky-cc")));
        assert!(toolchain.cc_identity.is_unknown());
    }
}

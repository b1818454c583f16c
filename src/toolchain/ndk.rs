//! Mobile NDK toolchain enumeration.
//!
//! Cross-compiling to a mobile target requires a native development kit;
//! its location must be configured, so a missing root is a configuration
//! error rather than a probe miss.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::core::error::ConfigError;
use crate::core::triple::Triple;
use crate::util::envvars::EnvSnapshot;

/// Environment variable naming the NDK installation root.
pub const NDK_ROOT_VAR: &str = "ANDROID_NDK_ROOT";

/// Resolve the NDK root from the environment.
pub fn ndk_root(env: &EnvSnapshot) -> Result<PathBuf, ConfigError> {
    env.get(NDK_ROOT_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .ok_or(ConfigError::MissingEnvVar { name: NDK_ROOT_VAR })
}

/// Prebuilt toolchain `bin` directories for the given build machine.
///
/// These replace `PATH` as the executable search directories when
/// targeting the NDK.
pub fn toolchain_bin_dirs(root: &Path, build: &Triple) -> Vec<PathBuf> {
    let pattern = format!(
        "{}/toolchains/*/prebuilt/{}-{}/bin",
        root.display(),
        build.os,
        build.arch
    );
    glob::glob(&pattern)
        .map(|entries| entries.filter_map(Result::ok).collect())
        .unwrap_or_default()
}

/// Host triples the NDK can target, read from the `*-gcc` executables
/// shipped in its prebuilt toolchains.
pub fn available_hosts(root: &Path, build: &Triple) -> BTreeSet<Triple> {
    let pattern = format!(
        "{}/toolchains/*/prebuilt/{}-{}/bin/*-gcc",
        root.display(),
        build.os,
        build.arch
    );
    let entries = match glob::glob(&pattern) {
        Ok(entries) => entries,
        Err(_) => return BTreeSet::new(),
    };
    entries
        .filter_map(Result::ok)
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?;
            let prefix = name.strip_suffix("-gcc")?;
            Some(Triple::parse(prefix))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_root_is_a_config_error() {
        let env = EnvSnapshot::empty();
        let err = ndk_root(&env).unwrap_err();
        assert!(err.to_string().contains(NDK_ROOT_VAR));

        let env = EnvSnapshot::empty().with(NDK_ROOT_VAR, "");
        assert!(ndk_root(&env).is_err());
    }

    #[test]
    fn test_root_from_env() {
        let env = EnvSnapshot::empty().with(NDK_ROOT_VAR, "/opt/ndk");
        assert_eq!(ndk_root(&env).unwrap(), PathBuf::from("/opt/ndk"));
    }

    #[test]
    fn test_enumerate_prebuilt_toolchains() {
        let root = tempfile::tempdir().unwrap();
        let build = Triple::new("x86_64", "linux", "gnu");

        let bin = root
            .path()
            .join("toolchains/arm-4.9/prebuilt/linux-x86_64/bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("arm-linux-androideabi-gcc"), "").unwrap();

        // A toolchain prebuilt for another machine must not appear.
        let other = root
            .path()
            .join("toolchains/x86-4.9/prebuilt/darwin-x86_64/bin");
        fs::create_dir_all(&other).unwrap();
        fs::write(other.join("i686-linux-android-gcc"), "").unwrap();

        assert_eq!(toolchain_bin_dirs(root.path(), &build), vec![bin]);

        let hosts = available_hosts(root.path(), &build);
        assert_eq!(hosts.len(), 1);
        assert!(hosts.contains(&Triple::parse("arm-linux-androideabi")));
    }
}

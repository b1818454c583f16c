//! Executable location.
//!
//! The search enumerates candidate base names over an ordered list of
//! directories, directory-major, trying each platform filename suffix.
//! It is lazy and restartable: nothing is memoized, and a fresh call
//! re-scans the filesystem. Absence is silent; a missing or
//! non-executable candidate simply produces no element.

use std::path::{Path, PathBuf};

use crate::core::triple::Triple;
use crate::util::envvars::EnvSnapshot;

/// Compiler base names, most preferred first.
const CC_CANDIDATES: &[&str] = &["gcc", "gcc-12", "gcc-11", "gcc-10"];

/// C++ compiler base names. Also used for the linker, since the C++
/// driver is what links mixed-language objects correctly.
const CXX_CANDIDATES: &[&str] = &["g++", "g++-12", "g++-11", "g++-10"];

/// Archiver base names.
const AR_CANDIDATES: &[&str] = &["ar", "gcc-ar-12", "gcc-ar-11"];

/// A configured executable search.
#[derive(Debug, Clone)]
pub struct ExecutableSearch {
    names: Vec<String>,
    dirs: Vec<PathBuf>,
    exts: Vec<String>,
    prepend_curdir: bool,
}

impl ExecutableSearch {
    /// Search the given directories with no filename suffixes.
    pub fn with_dirs(
        names: impl IntoIterator<Item = impl Into<String>>,
        dirs: impl IntoIterator<Item = PathBuf>,
    ) -> Self {
        ExecutableSearch {
            names: names.into_iter().map(|n| n.into()).collect(),
            dirs: dirs.into_iter().collect(),
            exts: vec![String::new()],
            prepend_curdir: false,
        }
    }

    /// Search with platform defaults: directories from `PATH`, and on
    /// Windows-like hosts the current directory prepended plus suffixes
    /// from `PATHEXT`.
    pub fn from_env(
        names: impl IntoIterator<Item = impl Into<String>>,
        env: &EnvSnapshot,
    ) -> Self {
        let dirs = split_search_path(env.get("PATH").unwrap_or_default());
        let search = ExecutableSearch::with_dirs(names, dirs);
        if cfg!(windows) {
            search.windows_semantics(split_extension_list(env.get("PATHEXT").unwrap_or_default()))
        } else {
            search
        }
    }

    /// Apply Windows search semantics: the current directory is searched
    /// first and each candidate is tried with every suffix in `exts`.
    /// An empty suffix list degrades to the bare name.
    pub fn windows_semantics(mut self, exts: Vec<String>) -> Self {
        self.prepend_curdir = true;
        self.exts = if exts.is_empty() {
            vec![String::new()]
        } else {
            exts
        };
        self
    }

    /// Begin a fresh scan.
    pub fn matches(&self) -> Matches {
        let mut dirs = Vec::with_capacity(self.dirs.len() + 1);
        if self.prepend_curdir {
            dirs.push(PathBuf::from("."));
        }
        dirs.extend(self.dirs.iter().cloned());

        Matches {
            names: self.names.clone(),
            dirs,
            exts: self.exts.clone(),
            dir_idx: 0,
            name_idx: 0,
            ext_idx: 0,
        }
    }
}

/// Lazy iterator over executable candidates, in directory, then name,
/// then suffix order.
#[derive(Debug)]
pub struct Matches {
    names: Vec<String>,
    dirs: Vec<PathBuf>,
    exts: Vec<String>,
    dir_idx: usize,
    name_idx: usize,
    ext_idx: usize,
}

impl Iterator for Matches {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        if self.names.is_empty() || self.exts.is_empty() {
            return None;
        }
        while self.dir_idx < self.dirs.len() {
            let candidate = self.dirs[self.dir_idx].join(format!(
                "{}{}",
                self.names[self.name_idx], self.exts[self.ext_idx]
            ));

            self.ext_idx += 1;
            if self.ext_idx == self.exts.len() {
                self.ext_idx = 0;
                self.name_idx += 1;
                if self.name_idx == self.names.len() {
                    self.name_idx = 0;
                    self.dir_idx += 1;
                }
            }

            if is_executable(&candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

/// Split a `PATH`-style value on the platform's list separator.
pub fn split_search_path(value: &str) -> Vec<PathBuf> {
    std::env::split_paths(value)
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}

/// Split a `PATHEXT`-style value into filename suffixes.
pub fn split_extension_list(value: &str) -> Vec<String> {
    std::env::split_paths(value)
        .map(|p| p.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Whether a path exists and is an executable file.
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Prefix each base name with the host triple, then append the bare
/// names, so cross tools are preferred when a host is given.
fn hosted_names(host: Option<&Triple>, base: &[&str]) -> Vec<String> {
    let mut names = Vec::with_capacity(base.len() * 2);
    if let Some(host) = host {
        names.extend(base.iter().map(|name| format!("{}-{}", host, name)));
    }
    names.extend(base.iter().map(|name| name.to_string()));
    names
}

fn search(
    names: Vec<String>,
    paths: Option<&[PathBuf]>,
    env: &EnvSnapshot,
) -> Box<dyn Iterator<Item = PathBuf>> {
    let search = match paths {
        Some(dirs) => {
            let search = ExecutableSearch::with_dirs(names, dirs.to_vec());
            if cfg!(windows) {
                search.windows_semantics(split_extension_list(
                    env.get("PATHEXT").unwrap_or_default(),
                ))
            } else {
                search
            }
        }
        None => ExecutableSearch::from_env(names, env),
    };
    Box::new(search.matches())
}

fn env_override(env: &EnvSnapshot, var: &str) -> Option<Box<dyn Iterator<Item = PathBuf>>> {
    if env.is_set(var) {
        let value = PathBuf::from(env.get(var).unwrap_or_default());
        Some(Box::new(std::iter::once(value)))
    } else {
        None
    }
}

/// Find candidate C compilers.
///
/// `CC` in the environment bypasses the search entirely; its value is
/// the sole candidate, taken verbatim.
pub fn find_cc(
    host: Option<&Triple>,
    paths: Option<&[PathBuf]>,
    env: &EnvSnapshot,
) -> Box<dyn Iterator<Item = PathBuf>> {
    env_override(env, "CC").unwrap_or_else(|| search(hosted_names(host, CC_CANDIDATES), paths, env))
}

/// Find candidate C++ compilers. `CXX` overrides.
pub fn find_cxx(
    host: Option<&Triple>,
    paths: Option<&[PathBuf]>,
    env: &EnvSnapshot,
) -> Box<dyn Iterator<Item = PathBuf>> {
    env_override(env, "CXX")
        .unwrap_or_else(|| search(hosted_names(host, CXX_CANDIDATES), paths, env))
}

/// Find candidate archivers. `AR` overrides.
pub fn find_ar(
    host: Option<&Triple>,
    paths: Option<&[PathBuf]>,
    env: &EnvSnapshot,
) -> Box<dyn Iterator<Item = PathBuf>> {
    env_override(env, "AR").unwrap_or_else(|| search(hosted_names(host, AR_CANDIDATES), paths, env))
}

/// Find candidate linkers. `LINK` overrides; otherwise the C++ driver
/// candidates are used.
pub fn find_link(
    host: Option<&Triple>,
    paths: Option<&[PathBuf]>,
    env: &EnvSnapshot,
) -> Box<dyn Iterator<Item = PathBuf>> {
    env_override(env, "LINK")
        .unwrap_or_else(|| search(hosted_names(host, CXX_CANDIDATES), paths, env))
}

/// Build-driver base names for the given host flavor.
///
/// Makefiles break too easily on Windows, so only msbuild is searched
/// there. Elsewhere ninja is preferred, then GNU Make.
pub fn driver_candidates(windows_like: bool) -> &'static [&'static str] {
    if windows_like {
        &["msbuild"]
    } else {
        &["ninja", "gmake", "make"]
    }
}

/// Find candidate build drivers.
pub fn find_driver(
    paths: Option<&[PathBuf]>,
    env: &EnvSnapshot,
) -> Box<dyn Iterator<Item = PathBuf>> {
    let names: Vec<String> = driver_candidates(cfg!(windows))
        .iter()
        .map(|s| s.to_string())
        .collect();
    search(names, paths, env)
}

/// Find candidate pkg-config executables. None exist on Windows-like
/// hosts.
pub fn find_pkg_config(
    host: Option<&Triple>,
    paths: Option<&[PathBuf]>,
    env: &EnvSnapshot,
) -> Box<dyn Iterator<Item = PathBuf>> {
    if cfg!(windows) {
        return Box::new(std::iter::empty());
    }
    search(hosted_names(host, &["pkg-config"]), paths, env)
}

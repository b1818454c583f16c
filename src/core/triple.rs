//! Platform triple and tool version value types.
//!
//! A triple names a platform as `arch-os-env` (e.g. `x86_64-linux-gnu`).
//! Two normalization dialects exist: GNU-style naming (what a configure
//! script expects) and Slipway's own naming (what build files use).
//! Both are idempotent.

use std::fmt;

use regex::Regex;

/// Platform triple components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triple {
    /// CPU architecture (x86_64, aarch64, etc.)
    pub arch: String,
    /// Operating system (linux, win, etc.)
    pub os: String,
    /// Environment/ABI (gnu, msvc, cygwin, etc.)
    pub env: String,
}

impl Triple {
    /// Create a new triple.
    pub fn new(arch: &str, os: &str, env: &str) -> Self {
        Triple {
            arch: arch.to_string(),
            os: os.to_string(),
            env: env.to_string(),
        }
    }

    /// The sentinel triple for an unidentified platform.
    pub fn unknown() -> Self {
        Triple::new("unknown", "unknown", "unknown")
    }

    /// Parse a triple string.
    ///
    /// Splits on the first two `-` only, so an env component containing
    /// `-` survives intact. Missing trailing components are left empty;
    /// parsing never fails.
    pub fn parse(text: &str) -> Self {
        let mut parts = text.splitn(3, '-');
        Triple {
            arch: parts.next().unwrap_or("").to_string(),
            os: parts.next().unwrap_or("").to_string(),
            env: parts.next().unwrap_or("").to_string(),
        }
    }

    /// GNU normalization: `i?86` becomes `x86`, `x64` becomes `x86_64`.
    pub fn to_gnu(&self) -> Self {
        let mut arch = self.arch.clone();
        if Regex::new(r"^i\d86$").unwrap().is_match(&arch) {
            arch = "x86".to_string();
        }
        if arch == "x64" {
            arch = "x86_64".to_string();
        }
        Triple::new(&arch, &self.os, &self.env)
    }

    /// Slipway normalization: `i?86` becomes `x86`, `x86_64` becomes `x64`.
    pub fn to_native(&self) -> Self {
        let mut arch = self.arch.clone();
        if Regex::new(r"^i\d86$").unwrap().is_match(&arch) {
            arch = "x86".to_string();
        }
        if arch == "x86_64" {
            arch = "x64".to_string();
        }
        Triple::new(&arch, &self.os, &self.env)
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.arch, self.os, self.env)
    }
}

/// A tool version: an ordered sequence of non-negative integers.
///
/// Ordering is lexicographic. The empty version means "no version was
/// detected" and is distinct from version `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(Vec<u32>);

impl Version {
    /// Create a version from components.
    pub fn new(components: impl Into<Vec<u32>>) -> Self {
        Version(components.into())
    }

    /// The empty version (nothing detected).
    pub fn empty() -> Self {
        Version(Vec::new())
    }

    /// Parse a dotted version string like `4.8.1`.
    ///
    /// Returns `None` if any component is not a non-negative integer,
    /// or if the input is empty.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let components: Option<Vec<u32>> =
            text.split('.').map(|part| part.parse().ok()).collect();
        components.map(Version)
    }

    /// Whether no version was detected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The version components.
    pub fn components(&self) -> &[u32] {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|x| x.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

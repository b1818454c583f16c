//! Identified tool kinds.

use std::fmt;

use crate::core::triple::{Triple, Version};

/// The family of an identified tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// GCC (GNU Compiler Collection)
    Gcc,
    /// Microsoft Visual C++
    Msvc,
    /// GNU Make
    GnuMake,
    /// Ninja
    Ninja,
    /// MSBuild
    MsBuild,
    /// Unrecognized tool
    Unknown,
}

impl ToolKind {
    /// Get the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::Gcc => "gcc",
            ToolKind::Msvc => "msvc",
            ToolKind::GnuMake => "gmake",
            ToolKind::Ninja => "ninja",
            ToolKind::MsBuild => "msbuild",
            ToolKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The classification of a probed compiler.
///
/// `unknown` is total: an empty version and the unknown triple, never a
/// partially filled guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolIdentity {
    /// Compiler family
    pub kind: ToolKind,
    /// Detected version (empty when none was found)
    pub version: Version,
    /// Target triple the compiler emits code for
    pub target: Triple,
}

impl ToolIdentity {
    /// Create an identity for a recognized compiler.
    pub fn new(kind: ToolKind, version: Version, target: Triple) -> Self {
        ToolIdentity {
            kind,
            version,
            target,
        }
    }

    /// The sentinel for an unrecognized compiler.
    pub fn unknown() -> Self {
        ToolIdentity {
            kind: ToolKind::Unknown,
            version: Version::empty(),
            target: Triple::unknown(),
        }
    }

    /// Whether this identity is the unknown sentinel.
    pub fn is_unknown(&self) -> bool {
        self.kind == ToolKind::Unknown
    }
}

/// The classification of a probed build driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverIdentity {
    /// Driver family
    pub kind: ToolKind,
    /// Detected version (empty when none was found)
    pub version: Version,
}

impl DriverIdentity {
    /// Create an identity for a recognized driver.
    pub fn new(kind: ToolKind, version: Version) -> Self {
        DriverIdentity { kind, version }
    }

    /// The sentinel for an unrecognized driver.
    pub fn unknown() -> Self {
        DriverIdentity {
            kind: ToolKind::Unknown,
            version: Version::empty(),
        }
    }

    /// Whether this identity is the unknown sentinel.
    pub fn is_unknown(&self) -> bool {
        self.kind == ToolKind::Unknown
    }
}

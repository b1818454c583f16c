//! Slipway - toolchain discovery and invocation regeneration for a
//! meta-build tool
//!
//! This crate locates and identifies the compiler, linker, archiver, and
//! native build driver installed on the host, and reconstructs an
//! equivalent command-line invocation from explicit flags, accumulated
//! list options, and environment-variable defaults. Build-file loading
//! and output generation live in external collaborators; this core only
//! discovers tools and regenerates flags.

pub mod core;
pub mod generator;
pub mod regen;
pub mod toolchain;
pub mod util;

pub use crate::core::{ConfigError, DriverIdentity, ToolIdentity, ToolKind, Triple, Version};

pub use crate::toolchain::{detect_build, DiscoverOptions, Toolchain};
pub use crate::util::envvars::EnvSnapshot;

//! Shared utilities

pub mod config;
pub mod envvars;
pub mod paths;
pub mod process;

pub use config::ToolchainConfig;
pub use envvars::EnvSnapshot;
pub use process::ProcessBuilder;

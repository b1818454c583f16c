//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Slipway - toolchain discovery and invocation regeneration for a
/// meta-build tool
#[derive(Parser)]
#[command(name = "slipway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe and report the toolchain for a target platform
    Tools(ToolsArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ToolsArgs {
    /// Cross-compile target triple (defaults to the build machine)
    #[arg(long)]
    pub host: Option<String>,

    /// Search the mobile NDK's prebuilt toolchains instead of PATH
    #[arg(long)]
    pub ndk: bool,

    /// Export discovered tool paths as CC/CXX/AR/LINK before reporting
    #[arg(long)]
    pub export: bool,

    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

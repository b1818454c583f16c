//! Build-machine detection.

use crate::core::triple::Triple;

/// Map a platform name to `(os, env)` triple components.
pub fn classify_platform(os_name: &str) -> (&'static str, &'static str) {
    match os_name {
        "windows" => ("win", "msvc"),
        "linux" => ("linux", "gnu"),
        "cygwin" => ("win", "cygwin"),
        _ => ("unknown", "unknown"),
    }
}

/// Detect the triple of the machine running the build.
///
/// Deterministic for a fixed host: the architecture comes from the
/// runtime environment and the rest from [`classify_platform`].
pub fn detect_build() -> Triple {
    let (os, env) = classify_platform(std::env::consts::OS);
    Triple::new(std::env::consts::ARCH, os, env)
}

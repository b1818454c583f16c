//! Tool identification.
//!
//! Each vendor banner gets its own parser returning `Option`; parsers
//! chain in priority order and the first success wins. Identification is
//! speculative across whatever happens to be installed, so any failure
//! (unrecognized output, a tool that cannot be launched, a probe that
//! dies) collapses to the `unknown` sentinel rather than an error.

use std::path::Path;

use regex::Regex;

use crate::core::tool::{DriverIdentity, ToolIdentity, ToolKind};
use crate::core::triple::{Triple, Version};
use crate::util::process::{decode, ProcessBuilder};

/// Parse the proprietary Windows compiler banner.
///
/// `cl.exe` prints it on stderr when run with no arguments:
/// `Microsoft (R) C/C++ Optimizing Compiler Version 19.0 for x64`.
pub fn parse_msvc_banner(text: &str) -> Option<ToolIdentity> {
    let re = Regex::new(
        r"(?m)^Microsoft \(R\) C/C\+\+ Optimizing Compiler Version ([\d.]+) for ([A-Za-z0-9\-_]+)",
    )
    .unwrap();
    let captures = re.captures(text)?;
    let version = Version::parse(&captures[1])?;
    let target = Triple::new(&captures[2], "win", "msvc");
    Some(ToolIdentity::new(ToolKind::Msvc, version, target))
}

/// Parse GCC's `-v` output.
///
/// Both a `gcc version <dotted>` line and a `Target: <triple>` line must
/// be present; one without the other is not an identification.
pub fn parse_gcc_verbose(text: &str) -> Option<ToolIdentity> {
    let version_re = Regex::new(r"(?m)^gcc version ([\d.]+)").unwrap();
    let target_re = Regex::new(r"(?m)^Target: ([A-Za-z0-9\-_]+)$").unwrap();
    let version = Version::parse(&version_re.captures(text)?[1])?;
    let target = Triple::parse(&target_re.captures(text)?[1]);
    Some(ToolIdentity::new(ToolKind::Gcc, version, target))
}

/// Parse a GNU Make `--version` banner.
pub fn parse_gnu_make_banner(text: &str) -> Option<DriverIdentity> {
    let re = Regex::new(r"^GNU Make ([\d.]+)").unwrap();
    let version = Version::parse(&re.captures(text)?[1])?;
    Some(DriverIdentity::new(ToolKind::GnuMake, version))
}

/// Recognize a ninja `--help` usage banner.
///
/// Ninja's `--help` output carries no version; the version argument is
/// the stdout retained from the preceding `--version` probe of the same
/// candidate. An unparseable retained capture leaves the version empty.
pub fn parse_ninja_usage(help_text: &str, version_text: &str) -> Option<DriverIdentity> {
    let re = Regex::new(r"^usage: ninja").unwrap();
    if !re.is_match(help_text) {
        return None;
    }
    let version = Version::parse(version_text.trim()).unwrap_or_else(Version::empty);
    Some(DriverIdentity::new(ToolKind::Ninja, version))
}

/// Identify a candidate compiler.
pub fn identify_compiler(path: &Path) -> ToolIdentity {
    // MSVC announces itself on stderr when invoked with no arguments.
    if let Some(output) = ProcessBuilder::new(path).probe() {
        if let Some(identity) = parse_msvc_banner(&decode(&output.stderr)) {
            return identity;
        }
    }

    // Anything else gets the GCC treatment: `-v` and look for the
    // version and target lines in the combined output.
    if let Some(output) = ProcessBuilder::new(path).arg("-v").probe() {
        let text = format!("{}{}", decode(&output.stdout), decode(&output.stderr));
        if let Some(identity) = parse_gcc_verbose(&text) {
            return identity;
        }
    }

    tracing::debug!("unrecognized compiler: {}", path.display());
    ToolIdentity::unknown()
}

/// Identify a candidate build driver.
pub fn identify_driver(path: &Path) -> DriverIdentity {
    let version_stdout = ProcessBuilder::new(path)
        .arg("--version")
        .probe()
        .map(|output| decode(&output.stdout))
        .unwrap_or_default();

    if let Some(identity) = parse_gnu_make_banner(&version_stdout) {
        return identity;
    }

    // Ninja is recognized by its usage banner on stderr; the retained
    // `--version` stdout supplies the version number.
    if let Some(output) = ProcessBuilder::new(path).arg("--help").probe() {
        if let Some(identity) = parse_ninja_usage(&decode(&output.stderr), &version_stdout) {
            return identity;
        }
    }

    tracing::debug!("unrecognized build driver: {}", path.display());
    DriverIdentity::unknown()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msvc_banner() {
        let identity = parse_msvc_banner(
            "Microsoft (R) C/C++ Optimizing Compiler Version 19.0 for x64\n\
             Copyright (C) Microsoft Corporation.  All rights reserved.\n",
        )
        .unwrap();
        assert_eq!(identity.kind, ToolKind::Msvc);
        assert_eq!(identity.version, Version::new([19, 0]));
        assert_eq!(identity.target, Triple::new("x64", "win", "msvc"));
    }

    #[test]
    fn test_msvc_banner_mid_output() {
        let identity = parse_msvc_banner(
            "warning: something\n\
             Microsoft (R) C/C++ Optimizing Compiler Version 16.00.30319.01 for 80x86\n",
        )
        .unwrap();
        assert_eq!(identity.version, Version::new([16, 0, 30319, 1]));
        assert_eq!(identity.target.arch, "80x86");
    }

    #[test]
    fn test_unrelated_banner_is_no_match() {
        assert!(parse_msvc_banner("clang version 17.0.6\n").is_none());
        assert!(parse_gcc_verbose("Apple clang version 15.0.0\n").is_none());
    }

    #[test]
    fn test_gcc_verbose_output() {
        let text = "Using built-in specs.\n\
                    Target: x86_64-pc-linux-gnu\n\
                    Thread model: posix\n\
                    gcc version 12.3.0 (Debian 12.3.0-1)\n";
        let identity = parse_gcc_verbose(text).unwrap();
        assert_eq!(identity.kind, ToolKind::Gcc);
        assert_eq!(identity.version, Version::new([12, 3, 0]));
        assert_eq!(identity.target, Triple::parse("x86_64-pc-linux-gnu"));
    }

    #[test]
    fn test_gcc_needs_both_version_and_target() {
        assert!(parse_gcc_verbose("gcc version 12.3.0\n").is_none());
        assert!(parse_gcc_verbose("Target: x86_64-pc-linux-gnu\n").is_none());
    }

    #[test]
    fn test_gnu_make_banner() {
        let identity = parse_gnu_make_banner("GNU Make 4.3\nBuilt for x86_64\n").unwrap();
        assert_eq!(identity.kind, ToolKind::GnuMake);
        assert_eq!(identity.version, Version::new([4, 3]));
    }

    #[test]
    fn test_gnu_make_banner_anchored_at_start() {
        assert!(parse_gnu_make_banner("This is GNU Make 4.3\n").is_none());
    }

    #[test]
    fn test_ninja_version_read_from_version_probe_output() {
        // The usage banner comes from `--help`, but the version is taken
        // from the retained `--version` capture, not the help text.
        let identity = parse_ninja_usage("usage: ninja [options]\n", "1.11.1\n").unwrap();
        assert_eq!(identity.kind, ToolKind::Ninja);
        assert_eq!(identity.version, Version::new([1, 11, 1]));

        let identity = parse_ninja_usage("usage: ninja [options]\n", "").unwrap();
        assert!(identity.version.is_empty());
    }

    #[test]
    fn test_identify_compiler_launch_failure_is_unknown() {
        let identity = identify_compiler(Path::new("/nonexistent/slipway-no-such-cc"));
        assert!(identity.is_unknown());
        assert!(identity.version.is_empty());
        assert_eq!(identity.target, Triple::unknown());
    }

    #[test]
    fn test_identify_driver_launch_failure_is_unknown() {
        let identity = identify_driver(Path::new("/nonexistent/slipway-no-such-make"));
        assert!(identity.is_unknown());
    }
}

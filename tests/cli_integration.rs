//! CLI integration tests for Slipway.
//!
//! These tests drive the binary end to end. Discovery probes whatever is
//! installed, so assertions stick to behavior that holds on any host:
//! probe misses are not failures, and the report shape is stable.

use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

/// Get the slipway binary command.
fn slipway() -> Command {
    Command::cargo_bin("slipway").unwrap()
}

// ============================================================================
// slipway tools
// ============================================================================

#[test]
fn test_tools_reports_build_and_host() {
    slipway()
        .args(["tools"])
        .assert()
        .success()
        .stdout(predicate::str::contains("build:"))
        .stdout(predicate::str::contains("host:"));
}

#[test]
fn test_tools_succeeds_with_empty_search_path() {
    // An empty PATH means every probe misses; that is still success.
    slipway()
        .args(["tools"])
        .env("PATH", "")
        .env_remove("CC")
        .env_remove("CXX")
        .env_remove("AR")
        .env_remove("LINK")
        .assert()
        .success()
        .stdout(predicate::str::contains("not found"));
}

#[test]
fn test_tools_json_is_well_formed() {
    let output = slipway()
        .args(["tools", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(report["build"].is_string());
    assert!(report["host"].is_string());
    assert!(report["compiler"]["kind"].is_string());
}

#[test]
fn test_tools_honors_explicit_host() {
    let output = slipway()
        .args(["tools", "--host", "arm-linux-gnueabi", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["host"], "arm-linux-gnueabi");
}

#[test]
fn test_tools_cc_override_is_reported_verbatim() {
    let output = slipway()
        .args(["tools", "--json"])
        .env("CC", "/opt/odd/toolchain/bin/cc")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["tools"]["cc"], "/opt/odd/toolchain/bin/cc");
}

#[test]
fn test_tools_ndk_requires_root_variable() {
    slipway()
        .args(["tools", "--ndk"])
        .env_remove("ANDROID_NDK_ROOT")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ANDROID_NDK_ROOT"));
}

// ============================================================================
// slipway completions
// ============================================================================

#[test]
fn test_completions_bash() {
    slipway()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("slipway"));
}

//! Subprocess probing utilities.
//!
//! Tool identification runs candidate executables with diagnostic
//! arguments and inspects their output. A probe that cannot even be
//! launched is a miss, not an error: the candidate set is speculative
//! by nature.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use anyhow::{Context, Result};

/// Builder for a single synchronous tool invocation.
///
/// Both output streams are captured and fully drained, and the process is
/// awaited to completion before the call returns. Stdin is closed so a
/// tool that prompts cannot block the probe on input.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }
        cmd
    }

    /// Execute the command and wait for completion.
    pub fn exec(&self) -> Result<Output> {
        self.build_command()
            .output()
            .with_context(|| format!("failed to spawn `{}`", self.program.display()))
    }

    /// Execute as a probe: a launch failure yields `None`.
    ///
    /// A nonzero exit status still yields `Some`, since many tools print
    /// the banner we want and then exit nonzero when run with no real
    /// work.
    pub fn probe(&self) -> Option<Output> {
        match self.exec() {
            Ok(output) => Some(output),
            Err(e) => {
                tracing::debug!("probe `{}` failed to launch: {:#}", self.display_command(), e);
                None
            }
        }
    }

    /// Display the command for log messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Decode captured output bytes, replacing invalid UTF-8.
pub fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_captures_output() {
        let output = ProcessBuilder::new("echo").arg("hello").probe().unwrap();
        assert!(output.status.success());
        assert!(decode(&output.stdout).contains("hello"));
    }

    #[test]
    fn test_probe_launch_failure_is_none() {
        let result = ProcessBuilder::new("/nonexistent/slipway-no-such-tool").probe();
        assert!(result.is_none());
    }

    #[test]
    fn test_display_command() {
        let pb = ProcessBuilder::new("gcc").args(["-v"]);
        assert_eq!(pb.display_command(), "gcc -v");
    }
}

//! The machine being provisioned
//!
//! Steps never spawn processes or touch files directly. Everything goes
//! through [`Host`], so a run can be pointed at the real system or at a
//! recording fake.

use anyhow::{Result, bail};
use std::path::Path;
use std::process::Output;

/// Output from a host command
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub success: bool,
    /// Exit code, `None` if terminated by a signal
    pub code: Option<i32>,
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            stdout: output.stdout,
            stderr: output.stderr,
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

impl CommandOutput {
    /// A successful exit with the given stdout
    pub fn ok(stdout: &str) -> Self {
        Self {
            stdout: stdout.as_bytes().to_vec(),
            stderr: Vec::new(),
            success: true,
            code: Some(0),
        }
    }

    /// A failed exit with the given code and stderr
    pub fn failed(code: i32, stderr: &str) -> Self {
        Self {
            stdout: Vec::new(),
            stderr: stderr.as_bytes().to_vec(),
            success: false,
            code: Some(code),
        }
    }

    /// Get stdout as a string
    pub fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    /// Get stderr as a string
    pub fn stderr_str(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }
}

/// Command execution and file access on the target machine
///
/// `run` returns `Err` only when the command could not be started at all;
/// a non-zero exit is reported through [`CommandOutput::success`].
pub trait Host {
    /// Run a command and capture its output
    fn run(&self, cmd: &str, args: &[&str]) -> Result<CommandOutput>;

    /// Read a file, `None` if it does not exist
    fn read_file(&self, path: &Path) -> Result<Option<String>>;

    /// Create or replace a file, creating parent directories
    fn write_file(&self, path: &Path, contents: &str) -> Result<()>;

    /// Effective user id of the running process
    fn effective_uid(&self) -> u32;

    /// Run a command and return just success/failure
    fn run_status(&self, cmd: &str, args: &[&str]) -> Result<bool> {
        Ok(self.run(cmd, args)?.success)
    }

    /// Run a command and capture stdout, failing on a non-zero exit
    fn run_capture(&self, cmd: &str, args: &[&str]) -> Result<String> {
        let output = self.run(cmd, args)?;
        if !output.success {
            bail!("Command failed: {}", output.stderr_str().trim());
        }
        Ok(output.stdout_str())
    }

    /// Run a command for its effect, failing with its stderr on a non-zero exit
    fn run_checked(&self, cmd: &str, args: &[&str]) -> Result<()> {
        let output = self.run(cmd, args)?;
        if output.success {
            return Ok(());
        }

        let stderr = output.stderr_str();
        let stderr = stderr.trim();
        let code = output
            .code
            .map_or_else(|| "signal".to_string(), |c| c.to_string());
        if stderr.is_empty() {
            bail!("`{} {}` exited with {}", cmd, args.join(" "), code);
        }
        bail!("`{} {}` exited with {}: {}", cmd, args.join(" "), code, stderr)
    }
}

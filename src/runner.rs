//! The real host: spawns processes and touches the local filesystem

use anyhow::{Context, Result};
use provision::{CommandOutput, Host};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};

/// Runs commands directly on this machine
///
/// Privilege is not escalated here; apply mode is gated on running as root
/// before any step executes.
#[derive(Debug, Default)]
pub struct SystemHost;

impl SystemHost {
    pub fn new() -> Self {
        Self
    }
}

impl Host for SystemHost {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<CommandOutput> {
        log::trace!("exec: {} {}", cmd, args.join(" "));

        let output = Command::new(cmd)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to execute: {} {}", cmd, args.join(" ")))?;

        log::trace!("exit: {:?}", output.status.code());
        Ok(output.into())
    }

    fn read_file(&self, path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Could not read {}", path.display())),
        }
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }
        fs::write(path, contents).with_context(|| format!("Could not write {}", path.display()))
    }

    #[allow(unsafe_code)]
    fn effective_uid(&self) -> u32 {
        // SAFETY: geteuid has no preconditions and cannot fail
        unsafe { libc::geteuid() }
    }
}

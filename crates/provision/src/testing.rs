//! Test doubles shared by the unit tests in this crate

use crate::host::{CommandOutput, Host};
use crate::step::Step;
use anyhow::{Result, bail};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Scripted host that records every command line
///
/// Unscripted commands succeed with empty output.
#[derive(Default)]
pub struct MockHost {
    responses: HashMap<String, CommandOutput>,
    unspawnable: HashSet<String>,
    files: RefCell<HashMap<PathBuf, String>>,
    calls: RefCell<Vec<String>>,
    euid: u32,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, line: &str, output: CommandOutput) -> Self {
        self.responses.insert(line.to_string(), output);
        self
    }

    pub fn unspawnable(mut self, line: &str) -> Self {
        self.unspawnable.insert(line.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Host for MockHost {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<CommandOutput> {
        let line = std::iter::once(cmd)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.borrow_mut().push(line.clone());

        if self.unspawnable.contains(&line) {
            bail!("Failed to execute: {line}");
        }
        Ok(self
            .responses
            .get(&line)
            .cloned()
            .unwrap_or_else(|| CommandOutput::ok("")))
    }

    fn read_file(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.files.borrow().get(path).cloned())
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn effective_uid(&self) -> u32 {
        self.euid
    }
}

/// Step whose check and action are single command lines
#[derive(Debug)]
pub struct ProbeStep {
    name: String,
    probe: String,
    command: String,
}

impl ProbeStep {
    pub fn new(name: &str, probe: &str, command: &str) -> Self {
        Self {
            name: name.to_string(),
            probe: probe.to_string(),
            command: command.to_string(),
        }
    }
}

fn split(line: &str) -> (&str, Vec<&str>) {
    let mut parts = line.split_whitespace();
    let cmd = parts.next().unwrap_or_default();
    (cmd, parts.collect())
}

impl Step for ProbeStep {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn description(&self) -> String {
        format!("Probe step {}", self.name)
    }

    fn command(&self) -> String {
        self.command.clone()
    }

    fn check(&self, host: &dyn Host) -> Result<bool> {
        let (cmd, args) = split(&self.probe);
        host.run_status(cmd, &args)
    }

    fn action(&self, host: &dyn Host) -> Result<()> {
        let (cmd, args) = split(&self.command);
        host.run_checked(cmd, &args)
    }
}

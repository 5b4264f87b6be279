//! Web root ownership and permission steps
//!
//! The login user joins the server's group and owns the tree; directories
//! are setgid so new files inherit the group.

use anyhow::Result;
use provision::{Host, Step};
use std::path::PathBuf;

/// setgid + rwxrwxr-x
pub const DIRECTORY_MODE: &str = "2775";
/// rw-rw-r--
pub const FILE_MODE: &str = "0664";

/// True when `find` ran and printed nothing.
///
/// A failed `find` (web root missing on a fresh host) counts as not done.
fn find_is_empty(host: &dyn Host, args: &[&str]) -> Result<bool> {
    let output = host.run("find", args)?;
    Ok(output.success && output.stdout_str().trim().is_empty())
}

/// Add the login user to the web server's group
#[derive(Debug, Clone)]
pub struct GroupMembership {
    pub user: String,
    pub group: String,
}

impl Step for GroupMembership {
    fn name(&self) -> String {
        "web-group-membership".to_string()
    }

    fn description(&self) -> String {
        format!("Add {} to the {} group", self.user, self.group)
    }

    fn command(&self) -> String {
        format!("usermod -a -G {} {}", self.group, self.user)
    }

    fn check(&self, host: &dyn Host) -> Result<bool> {
        let output = host.run("id", &["-nG", &self.user])?;
        Ok(output.success
            && output
                .stdout_str()
                .split_whitespace()
                .any(|g| g == self.group))
    }

    fn action(&self, host: &dyn Host) -> Result<()> {
        host.run_checked("usermod", &["-a", "-G", &self.group, &self.user])
    }
}

/// Recursively hand the web root to `user:group`
#[derive(Debug, Clone)]
pub struct Ownership {
    pub root: PathBuf,
    pub user: String,
    pub group: String,
}

impl Ownership {
    fn owner_spec(&self) -> String {
        format!("{}:{}", self.user, self.group)
    }
}

impl Step for Ownership {
    fn name(&self) -> String {
        "web-root-ownership".to_string()
    }

    fn description(&self) -> String {
        format!("Change ownership of {}", self.root.display())
    }

    fn command(&self) -> String {
        format!("chown -R {} {}", self.owner_spec(), self.root.display())
    }

    fn check(&self, host: &dyn Host) -> Result<bool> {
        let root = self.root.to_string_lossy();
        find_is_empty(
            host,
            &[
                &*root, "(", "!", "-user", &self.user, "-o", "!", "-group", &self.group, ")",
                "-print", "-quit",
            ],
        )
    }

    fn action(&self, host: &dyn Host) -> Result<()> {
        let root = self.root.to_string_lossy();
        host.run_checked("chown", &["-R", &self.owner_spec(), &root])
    }
}

/// Which kind of entry a [`TreeMode`] step applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    fn find_type(self) -> &'static str {
        match self {
            Self::Directory => "d",
            Self::File => "f",
        }
    }

    fn plural(self) -> &'static str {
        match self {
            Self::Directory => "directories",
            Self::File => "files",
        }
    }
}

/// Give every directory (or file) under the web root one mode
#[derive(Debug, Clone)]
pub struct TreeMode {
    pub root: PathBuf,
    pub kind: EntryKind,
    pub mode: String,
}

impl TreeMode {
    pub fn directories(root: PathBuf) -> Self {
        Self {
            root,
            kind: EntryKind::Directory,
            mode: DIRECTORY_MODE.to_string(),
        }
    }

    pub fn files(root: PathBuf) -> Self {
        Self {
            root,
            kind: EntryKind::File,
            mode: FILE_MODE.to_string(),
        }
    }
}

impl Step for TreeMode {
    fn name(&self) -> String {
        match self.kind {
            EntryKind::Directory => "web-root-directory-modes".to_string(),
            EntryKind::File => "web-root-file-modes".to_string(),
        }
    }

    fn description(&self) -> String {
        format!(
            "Set {} under {} to {}",
            self.kind.plural(),
            self.root.display(),
            self.mode
        )
    }

    fn command(&self) -> String {
        format!(
            "find {} -type {} -exec chmod {} {{}} +",
            self.root.display(),
            self.kind.find_type(),
            self.mode
        )
    }

    fn check(&self, host: &dyn Host) -> Result<bool> {
        let root = self.root.to_string_lossy();
        find_is_empty(
            host,
            &[
                &*root,
                "-type",
                self.kind.find_type(),
                "!",
                "-perm",
                &self.mode,
                "-print",
                "-quit",
            ],
        )
    }

    fn action(&self, host: &dyn Host) -> Result<()> {
        let root = self.root.to_string_lossy();
        host.run_checked(
            "find",
            &[
                &*root,
                "-type",
                self.kind.find_type(),
                "-exec",
                "chmod",
                &self.mode,
                "{}",
                "+",
            ],
        )
    }
}

//! In-memory Amazon Linux host for tests
//!
//! Models just enough state (package, unit, group, tree modes, files) for
//! the real steps to check and converge against it. Every command and file
//! write is recorded.

use anyhow::Result;
use provision::{CommandOutput, Host};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::network::NetworkProbe;

pub const AMAZON_LINUX_2023: &str = r#"NAME="Amazon Linux"
VERSION="2023"
ID="amzn"
ID_LIKE="fedora"
VERSION_ID="2023"
PLATFORM_ID="platform:al2023"
PRETTY_NAME="Amazon Linux 2023.6.20241010"
"#;

pub const UBUNTU_2204: &str = r#"PRETTY_NAME="Ubuntu 22.04.4 LTS"
NAME="Ubuntu"
VERSION_ID="22.04"
ID=ubuntu
ID_LIKE=debian
"#;

const OS_RELEASE: &str = "/etc/os-release";
const TEST_PAGE: &str = "/var/www/html/index.html";

/// Command prefixes that change the host
const MUTATING: &[&str] = &[
    "dnf update",
    "dnf install",
    "systemctl start",
    "systemctl enable",
    "usermod",
    "chown",
    "chmod",
];

#[derive(Debug, Clone, Default)]
struct State {
    updates_pending: bool,
    installed: bool,
    active: bool,
    enabled: bool,
    in_group: bool,
    ownership_ok: bool,
    dir_modes_ok: bool,
    file_modes_ok: bool,
    files: HashMap<PathBuf, String>,
}

pub struct FakeHost {
    state: RefCell<State>,
    failing: HashSet<String>,
    calls: RefCell<Vec<String>>,
    writes: RefCell<Vec<String>>,
    euid: u32,
}

impl FakeHost {
    /// Freshly booted supported host, running as root
    pub fn fresh() -> Self {
        let mut files = HashMap::new();
        files.insert(PathBuf::from(OS_RELEASE), AMAZON_LINUX_2023.to_string());

        Self {
            state: RefCell::new(State {
                updates_pending: true,
                files,
                ..Default::default()
            }),
            failing: HashSet::new(),
            calls: RefCell::new(Vec::new()),
            writes: RefCell::new(Vec::new()),
            euid: 0,
        }
    }

    /// Supported host with every step already applied
    pub fn provisioned() -> Self {
        let host = Self::fresh();
        {
            let mut state = host.state.borrow_mut();
            state.updates_pending = false;
            state.installed = true;
            state.active = true;
            state.enabled = true;
            state.in_group = true;
            state.ownership_ok = true;
            state.dir_modes_ok = true;
            state.file_modes_ok = true;
            state.files.insert(
                PathBuf::from(TEST_PAGE),
                crate::steps::test_page::TEST_PAGE_HTML.to_string(),
            );
        }
        host
    }

    /// Package installed but nothing configured yet
    pub fn with_installed(self) -> Self {
        self.state.borrow_mut().installed = true;
        self
    }

    pub fn with_euid(mut self, euid: u32) -> Self {
        self.euid = euid;
        self
    }

    pub fn with_file(self, path: &Path, contents: &str) -> Self {
        self.state
            .borrow_mut()
            .files
            .insert(path.to_path_buf(), contents.to_string());
        self
    }

    pub fn with_os_release(self, contents: &str) -> Self {
        self.with_file(Path::new(OS_RELEASE), contents)
    }

    pub fn without_os_release(self) -> Self {
        self.state.borrow_mut().files.remove(Path::new(OS_RELEASE));
        self
    }

    /// Make an exact command line exit non-zero
    pub fn failing(mut self, line: &str) -> Self {
        self.failing.insert(line.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Commands and writes that would have changed a real host
    pub fn mutations(&self) -> Vec<String> {
        let mut mutations = Vec::new();
        let writes = self.writes.borrow();
        let mut writes = writes.iter();

        for call in self.calls.borrow().iter() {
            if call == "<write>" {
                if let Some(path) = writes.next() {
                    mutations.push(format!("write {path}"));
                }
            } else if MUTATING.iter().any(|prefix| call.starts_with(prefix))
                || call.contains(" -exec ")
            {
                mutations.push(call.clone());
            }
        }
        mutations
    }

    fn respond(&self, cmd: &str, args: &[&str]) -> CommandOutput {
        let mut state = self.state.borrow_mut();
        let missing_root = || CommandOutput::failed(1, "find: '/var/www': No such file or directory");
        let missing_unit = || CommandOutput::failed(5, "Failed: Unit httpd.service not found.");
        let status = |ok: bool, code: i32| {
            if ok {
                CommandOutput::ok("")
            } else {
                CommandOutput::failed(code, "")
            }
        };

        match (cmd, args) {
            ("dnf", ["check-update", "-q"]) => status(!state.updates_pending, 100),
            ("dnf", ["update", "-y"]) => {
                state.updates_pending = false;
                CommandOutput::ok("Complete!\n")
            }
            ("dnf", ["install", "-y", _]) => {
                state.installed = true;
                CommandOutput::ok("Complete!\n")
            }
            ("rpm", ["-q", _]) => status(state.installed, 1),
            ("systemctl", ["is-active", "--quiet", _]) => status(state.active, 3),
            ("systemctl", ["is-enabled", "--quiet", _]) => status(state.enabled, 1),
            ("systemctl", ["start" | "enable", _]) if !state.installed => missing_unit(),
            ("systemctl", ["start", _]) => {
                state.active = true;
                CommandOutput::ok("")
            }
            ("systemctl", ["enable", _]) => {
                state.enabled = true;
                CommandOutput::ok("Created symlink.\n")
            }
            ("systemctl", ["status", _, "--no-pager"]) if state.active => {
                CommandOutput::ok("● httpd.service - The Apache HTTP Server\n   Active: active (running)\n")
            }
            ("systemctl", ["status", _, "--no-pager"]) => CommandOutput::failed(3, ""),
            ("id", ["-nG", user]) => {
                let groups = if state.in_group {
                    format!("{user} adm wheel apache\n")
                } else {
                    format!("{user} adm wheel\n")
                };
                CommandOutput::ok(&groups)
            }
            ("usermod", _) => {
                state.in_group = true;
                CommandOutput::ok("")
            }
            ("find", _) if !state.installed => missing_root(),
            ("find", [_, "(", ..]) => CommandOutput::ok(if state.ownership_ok { "" } else { "/var/www\n" }),
            ("find", [_, "-type", kind, "-exec", ..]) => {
                if *kind == "d" {
                    state.dir_modes_ok = true;
                } else {
                    state.file_modes_ok = true;
                }
                CommandOutput::ok("")
            }
            ("find", [_, "-type", kind, "!", ..]) => {
                let ok = if *kind == "d" {
                    state.dir_modes_ok
                } else {
                    state.file_modes_ok
                };
                CommandOutput::ok(if ok { "" } else { "/var/www/cgi-bin\n" })
            }
            ("chown", ["-R", _, _]) if !state.installed => missing_root(),
            ("chown", ["-R", _, _]) => {
                state.ownership_ok = true;
                CommandOutput::ok("")
            }
            ("chown" | "chmod", _) => CommandOutput::ok(""),
            _ => CommandOutput::failed(127, &format!("{cmd}: command not found")),
        }
    }
}

impl Host for FakeHost {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<CommandOutput> {
        let line = std::iter::once(cmd)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.borrow_mut().push(line.clone());

        if self.failing.contains(&line) {
            return Ok(CommandOutput::failed(1, &format!("Error: forced failure of {line}")));
        }
        Ok(self.respond(cmd, args))
    }

    fn read_file(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.state.borrow().files.get(path).cloned())
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        self.calls.borrow_mut().push("<write>".to_string());
        self.writes.borrow_mut().push(path.display().to_string());
        self.state
            .borrow_mut()
            .files
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn effective_uid(&self) -> u32 {
        self.euid
    }
}

/// Network probe with canned answers
pub struct FakeNetwork {
    pub ip: Option<String>,
    pub reachable: bool,
}

impl FakeNetwork {
    pub const PUBLIC_IP: &'static str = "203.0.113.10";

    pub fn online() -> Self {
        Self {
            ip: Some(Self::PUBLIC_IP.to_string()),
            reachable: true,
        }
    }

    pub fn offline() -> Self {
        Self {
            ip: None,
            reachable: false,
        }
    }
}

impl NetworkProbe for FakeNetwork {
    fn public_ip(&self) -> Option<String> {
        self.ip.clone()
    }

    fn page_reachable(&self, _url: &str) -> bool {
        self.reachable
    }
}

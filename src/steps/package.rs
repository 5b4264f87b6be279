//! Package manager steps (dnf/rpm)

use anyhow::Result;
use provision::{Host, Step};

/// `dnf check-update` exit code when no updates are pending
const NO_UPDATES: i32 = 0;

/// Bring installed packages up to date
#[derive(Debug, Clone)]
pub struct SystemUpdate;

impl Step for SystemUpdate {
    fn name(&self) -> String {
        "update-packages".to_string()
    }

    fn description(&self) -> String {
        "Update system packages".to_string()
    }

    fn command(&self) -> String {
        "dnf update -y".to_string()
    }

    fn check(&self, host: &dyn Host) -> Result<bool> {
        // 100 means updates are available, 1 means dnf itself failed
        let output = host.run("dnf", &["check-update", "-q"])?;
        Ok(output.code == Some(NO_UPDATES))
    }

    fn action(&self, host: &dyn Host) -> Result<()> {
        host.run_checked("dnf", &["update", "-y"])
    }
}

/// Install one package
#[derive(Debug, Clone)]
pub struct PackageInstall {
    pub package: String,
}

impl PackageInstall {
    pub fn new(package: &str) -> Self {
        Self {
            package: package.to_string(),
        }
    }
}

impl Step for PackageInstall {
    fn name(&self) -> String {
        "install-package".to_string()
    }

    fn description(&self) -> String {
        format!("Install {}", self.package)
    }

    fn command(&self) -> String {
        format!("dnf install -y {}", self.package)
    }

    fn check(&self, host: &dyn Host) -> Result<bool> {
        host.run_status("rpm", &["-q", &self.package])
    }

    fn action(&self, host: &dyn Host) -> Result<()> {
        host.run_checked("dnf", &["install", "-y", &self.package])
    }
}

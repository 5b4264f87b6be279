//! Service manager steps (systemctl)

use anyhow::Result;
use provision::{Host, Step};

fn is_active(host: &dyn Host, unit: &str) -> Result<bool> {
    host.run_status("systemctl", &["is-active", "--quiet", unit])
}

/// Start the service now
#[derive(Debug, Clone)]
pub struct ServiceStart {
    pub unit: String,
}

impl ServiceStart {
    pub fn new(unit: &str) -> Self {
        Self {
            unit: unit.to_string(),
        }
    }
}

impl Step for ServiceStart {
    fn name(&self) -> String {
        "start-service".to_string()
    }

    fn description(&self) -> String {
        format!("Start {}", self.unit)
    }

    fn command(&self) -> String {
        format!("systemctl start {}", self.unit)
    }

    fn check(&self, host: &dyn Host) -> Result<bool> {
        is_active(host, &self.unit)
    }

    fn action(&self, host: &dyn Host) -> Result<()> {
        host.run_checked("systemctl", &["start", &self.unit])
    }
}

/// Start the service at boot
#[derive(Debug, Clone)]
pub struct ServiceEnable {
    pub unit: String,
}

impl ServiceEnable {
    pub fn new(unit: &str) -> Self {
        Self {
            unit: unit.to_string(),
        }
    }
}

impl Step for ServiceEnable {
    fn name(&self) -> String {
        "enable-service".to_string()
    }

    fn description(&self) -> String {
        format!("Enable {} at boot", self.unit)
    }

    fn command(&self) -> String {
        format!("systemctl enable {}", self.unit)
    }

    fn check(&self, host: &dyn Host) -> Result<bool> {
        host.run_status("systemctl", &["is-enabled", "--quiet", &self.unit])
    }

    fn action(&self, host: &dyn Host) -> Result<()> {
        host.run_checked("systemctl", &["enable", &self.unit])
    }
}

/// Confirm the service reports healthy. Read-only.
#[derive(Debug, Clone)]
pub struct ServiceStatus {
    pub unit: String,
}

impl ServiceStatus {
    pub fn new(unit: &str) -> Self {
        Self {
            unit: unit.to_string(),
        }
    }
}

impl Step for ServiceStatus {
    fn name(&self) -> String {
        "confirm-status".to_string()
    }

    fn description(&self) -> String {
        format!("Confirm {} status", self.unit)
    }

    fn mutating(&self) -> bool {
        false
    }

    fn command(&self) -> String {
        format!("systemctl status {} --no-pager", self.unit)
    }

    fn check(&self, host: &dyn Host) -> Result<bool> {
        is_active(host, &self.unit)
    }

    fn action(&self, host: &dyn Host) -> Result<()> {
        let status = host.run("systemctl", &["status", &self.unit, "--no-pager"])?;
        for line in status.stdout_str().lines().take(3) {
            log::info!("{}", line.trim());
        }
        if status.success {
            return Ok(());
        }
        anyhow::bail!(
            "{} is not running (systemctl status exited with {})",
            self.unit,
            status.code.map_or_else(|| "signal".to_string(), |c| c.to_string())
        )
    }
}

//! Step trait for idempotent provisioning actions
//!
//! A Step is declarative: it says how to recognise that its work is already
//! done and how to do it. It never looks at the execution mode; deciding
//! whether to skip, simulate or apply belongs to [`crate::run_step`].

use crate::host::Host;
use anyhow::Result;
use std::fmt;

/// One named, idempotent provisioning action
///
/// # Example
///
/// ```ignore
/// use provision::{Host, Step};
///
/// #[derive(Debug)]
/// struct StartService {
///     unit: String,
/// }
///
/// impl Step for StartService {
///     fn name(&self) -> String {
///         "start-service".to_string()
///     }
///
///     fn description(&self) -> String {
///         format!("Start {}", self.unit)
///     }
///
///     fn command(&self) -> String {
///         format!("systemctl start {}", self.unit)
///     }
///
///     fn check(&self, host: &dyn Host) -> anyhow::Result<bool> {
///         host.run_status("systemctl", &["is-active", "--quiet", &self.unit])
///     }
///
///     fn action(&self, host: &dyn Host) -> anyhow::Result<()> {
///         host.run_checked("systemctl", &["start", &self.unit])
///     }
/// }
/// ```
pub trait Step: fmt::Debug {
    /// Stable identifier shown in reports (e.g. "install-package")
    fn name(&self) -> String;

    /// Human-readable description of what this step does
    fn description(&self) -> String;

    /// Whether the action changes system state
    ///
    /// Read-only steps (status confirmation) override this to return false.
    fn mutating(&self) -> bool {
        true
    }

    /// The command line the action runs, for dry-run output
    fn command(&self) -> String;

    /// Is the work already done?
    ///
    /// Must be read-only: it runs in every mode, including dry run.
    fn check(&self, host: &dyn Host) -> Result<bool>;

    /// Perform the work
    ///
    /// Any error (non-zero exit, I/O failure) marks the step failed.
    fn action(&self, host: &dyn Host) -> Result<()>;
}

/// A boxed step for type-erased storage
pub type BoxedStep = Box<dyn Step>;

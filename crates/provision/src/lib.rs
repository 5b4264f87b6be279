//! # Provision
//!
//! A small engine for idempotent, single-host provisioning.
//!
//! A provisioning run is an ordered list of steps. Each step knows how to
//! tell whether it is already done and how to make it so. The engine decides
//! what actually happens: skip, simulate, or apply.
//!
//! ## Core Concepts
//!
//! - **Step**: one declarative unit of work (`check` + `action`)
//! - **ExecutionMode**: `DryRun` or `Apply`, fixed for the whole run
//! - **StepResult**: what happened to a single step
//! - **Pipeline**: the fixed, ordered sequence of steps; halts on the first failure
//! - **RunSummary**: every result plus the final system facts
//!
//! ## Example
//!
//! ```ignore
//! use provision::{ExecutionMode, Host, NoProgress, Pipeline, RunContext, Step};
//!
//! #[derive(Debug)]
//! struct InstallPackage { name: String }
//!
//! impl Step for InstallPackage {
//!     fn name(&self) -> String { "install-package".into() }
//!     fn description(&self) -> String { format!("Install {}", self.name) }
//!     fn command(&self) -> String { format!("dnf install -y {}", self.name) }
//!
//!     fn check(&self, host: &dyn Host) -> anyhow::Result<bool> {
//!         host.run_status("rpm", &["-q", &self.name])
//!     }
//!
//!     fn action(&self, host: &dyn Host) -> anyhow::Result<()> {
//!         host.run_checked("dnf", &["install", "-y", &self.name])
//!     }
//! }
//!
//! let pipeline = Pipeline::new().with_step(InstallPackage { name: "httpd".into() });
//! let mut ctx = RunContext::new(ExecutionMode::DryRun, &host);
//! pipeline.run(&mut ctx, &mut NoProgress)?;
//! ```
//!
//! ## Provider Traits
//!
//! - [`Host`]: runs commands and touches files on the machine being provisioned
//! - [`ProgressCallback`]: receives per-step progress
//!
//! Steps never branch on the execution mode themselves; the only place that
//! does is [`run_step`].

pub mod context;
pub mod error;
pub mod executor;
pub mod host;
pub mod pipeline;
pub mod step;
pub mod summary;
pub mod types;

#[cfg(test)]
mod testing;

// Re-export main types at crate root
pub use context::{NoProgress, ProgressCallback, RunContext};
pub use error::{ErrorKind, ProvisionError};
pub use executor::run_step;
pub use host::{CommandOutput, Host};
pub use pipeline::Pipeline;
pub use step::{BoxedStep, Step};
pub use summary::{RunSummary, SystemFacts};
pub use types::{ExecutionMode, StepResult, StepStatus};

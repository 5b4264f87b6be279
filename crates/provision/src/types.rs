//! Core types for provisioning runs

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a run treats the host
///
/// Chosen once at start; never changes mid-pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Perform read-only checks, simulate everything else
    DryRun,
    /// Perform real mutations
    Apply,
}

impl ExecutionMode {
    /// Build the mode from the `--apply` flag
    pub fn from_apply_flag(apply: bool) -> Self {
        if apply { Self::Apply } else { Self::DryRun }
    }

    pub fn is_dry_run(&self) -> bool {
        matches!(self, Self::DryRun)
    }

    /// Short uppercase label for console output
    pub fn label(&self) -> &'static str {
        match self {
            Self::DryRun => "DRY RUN",
            Self::Apply => "APPLY",
        }
    }
}

impl Default for ExecutionMode {
    fn default() -> Self {
        Self::DryRun
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of running one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// The step's check said the work was already done
    SkippedAlreadySatisfied,
    /// The action ran and succeeded
    Succeeded,
    /// Dry run: the action would have run
    Simulated,
    /// The action ran and failed
    Failed,
}

impl StepStatus {
    /// Whether the pipeline may continue after this status
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed)
    }

    /// Whether the host was changed by this step
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SkippedAlreadySatisfied => "already satisfied",
            Self::Succeeded => "done",
            Self::Simulated => "simulated",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of running a single step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    pub step_name: String,
    pub status: StepStatus,
    /// Simulation text, skip reason or captured error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Wall time spent on check + action
    pub elapsed_ms: u64,
}

impl StepResult {
    pub fn new(step_name: impl Into<String>, status: StepStatus) -> Self {
        Self {
            step_name: step_name.into(),
            status,
            detail: None,
            elapsed_ms: 0,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn is_failed(&self) -> bool {
        self.status == StepStatus::Failed
    }
}

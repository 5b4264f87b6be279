//! Run summary - every step result plus the final system facts

use crate::types::{ExecutionMode, StepResult, StepStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Live system state gathered after the pipeline finishes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemFacts {
    pub service_active: bool,
    pub test_page_present: bool,
    /// The local web server answered an HTTP request
    pub page_reachable: bool,
    /// Not looked up in dry run
    pub public_ip: Option<String>,
}

/// Aggregate of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub mode: ExecutionMode,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// In execution order; includes the failing step, if any
    pub results: Vec<StepResult>,
    pub facts: Option<SystemFacts>,
}

impl RunSummary {
    pub fn new(mode: ExecutionMode) -> Self {
        Self {
            mode,
            started_at: Utc::now(),
            finished_at: None,
            results: Vec::new(),
            facts: None,
        }
    }

    /// Add a step result
    pub fn record(&mut self, result: StepResult) {
        self.results.push(result);
    }

    /// Stamp the finish time
    pub fn finish(&mut self) {
        if self.finished_at.is_none() {
            self.finished_at = Some(Utc::now());
        }
    }

    /// Check if every recorded step succeeded (no failures)
    pub fn is_success(&self) -> bool {
        self.results.iter().all(|r| r.status.is_success())
    }

    /// The step that halted the run
    pub fn failed_step(&self) -> Option<&StepResult> {
        self.results.iter().find(|r| r.is_failed())
    }

    /// Number of results with the given status
    pub fn count(&self, status: StepStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    /// Total number of steps that changed the host
    pub fn total_changes(&self) -> usize {
        self.results.iter().filter(|r| r.status.is_change()).count()
    }

    /// Whether the run found nothing to do
    pub fn all_satisfied(&self) -> bool {
        !self.results.is_empty()
            && self
                .results
                .iter()
                .all(|r| r.status == StepStatus::SkippedAlreadySatisfied)
    }

    /// Status recorded for a step, if it was attempted
    pub fn status_of(&self, step_name: &str) -> Option<StepStatus> {
        self.results
            .iter()
            .find(|r| r.step_name == step_name)
            .map(|r| r.status)
    }
}

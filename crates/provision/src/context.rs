//! Run context and progress callbacks

use crate::host::Host;
use crate::step::Step;
use crate::summary::RunSummary;
use crate::types::{ExecutionMode, StepResult};

/// Everything a single run carries from start to report
///
/// Built once in `main` and passed by reference through the pipeline and
/// the reporter. Nothing about a run lives in global state.
pub struct RunContext<'a> {
    /// Fixed for the whole run
    pub mode: ExecutionMode,
    /// The machine being provisioned
    pub host: &'a dyn Host,
    /// Results accumulated so far
    pub summary: RunSummary,
}

impl<'a> RunContext<'a> {
    /// Create a context with an empty summary
    pub fn new(mode: ExecutionMode, host: &'a dyn Host) -> Self {
        Self {
            mode,
            host,
            summary: RunSummary::new(mode),
        }
    }

    /// Consume the context, returning the finished summary
    pub fn into_summary(mut self) -> RunSummary {
        self.summary.finish();
        self.summary
    }
}

/// Progress callback for pipeline runs
///
/// Implement this trait to show progress while steps run.
pub trait ProgressCallback {
    /// Called before a step is checked
    ///
    /// `index` is zero based; `total` is the pipeline length.
    fn on_step_start(&mut self, index: usize, total: usize, step: &dyn Step);

    /// Called once the step has a result
    fn on_step_complete(&mut self, result: &StepResult);
}

/// No-op progress callback
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_step_start(&mut self, _index: usize, _total: usize, _step: &dyn Step) {}
    fn on_step_complete(&mut self, _result: &StepResult) {}
}

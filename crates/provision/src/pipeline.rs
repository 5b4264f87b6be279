//! Provisioning pipeline - a fixed, ordered list of steps

use crate::context::{ProgressCallback, RunContext};
use crate::error::ProvisionError;
use crate::executor::run_step;
use crate::step::{BoxedStep, Step};
use crate::types::StepStatus;

/// An ordered sequence of steps
///
/// Order is part of the definition: a step that depends on an earlier one
/// (start a service after installing it) is simply listed after it. Nothing
/// is inferred at runtime.
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<BoxedStep>,
}

impl Pipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step
    pub fn add_step(&mut self, step: BoxedStep) {
        self.steps.push(step);
    }

    /// Append a step, builder style
    pub fn with_step(mut self, step: impl Step + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step names in execution order
    pub fn step_names(&self) -> Vec<String> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Whether any step mutates the host
    pub fn has_mutating_steps(&self) -> bool {
        self.steps.iter().any(|s| s.mutating())
    }

    /// Run every step in order, halting on the first failure
    ///
    /// Each result, including the failing one, is recorded in
    /// `ctx.summary` before the next step starts.
    pub fn run<P: ProgressCallback>(
        &self,
        ctx: &mut RunContext<'_>,
        progress: &mut P,
    ) -> Result<(), ProvisionError> {
        let total = self.steps.len();

        for (index, step) in self.steps.iter().enumerate() {
            progress.on_step_start(index, total, step.as_ref());
            let result = run_step(step.as_ref(), ctx.mode, ctx.host);
            progress.on_step_complete(&result);

            let failure = (result.status == StepStatus::Failed).then(|| {
                ProvisionError::StepFailed {
                    step: result.step_name.clone(),
                    detail: result.detail.clone().unwrap_or_default(),
                }
            });
            ctx.summary.record(result);

            if let Some(err) = failure {
                let skipped = total - index - 1;
                if skipped > 0 {
                    log::info!("halting: {skipped} remaining step(s) not attempted");
                }
                return Err(err);
            }
        }

        Ok(())
    }
}

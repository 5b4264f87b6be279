//! Step executor - the single place where execution mode is decided

use crate::host::Host;
use crate::step::Step;
use crate::types::{ExecutionMode, StepResult, StepStatus};
use std::time::Instant;

/// Run one step under the given mode
///
/// 1. If the step's check says it is already done, skip it (any mode).
/// 2. In dry run, report what would happen without touching the host.
/// 3. In apply, perform the action. Errors become `Failed` with the
///    captured detail; there is no retry and no rollback.
///
/// A check that cannot be evaluated at all (e.g. the probe binary is
/// missing) counts as "not done".
pub fn run_step(step: &dyn Step, mode: ExecutionMode, host: &dyn Host) -> StepResult {
    let started = Instant::now();
    let name = step.name();

    let satisfied = match step.check(host) {
        Ok(satisfied) => satisfied,
        Err(e) => {
            log::warn!("{name}: check could not be evaluated: {e:#}");
            false
        }
    };

    let result = if satisfied {
        log::debug!("{name}: already satisfied");
        StepResult::new(&name, StepStatus::SkippedAlreadySatisfied)
    } else {
        match mode {
            ExecutionMode::DryRun => {
                log::debug!("{name}: simulated");
                StepResult::new(&name, StepStatus::Simulated)
                    .with_detail(format!("would run: {}", step.command()))
            }
            ExecutionMode::Apply => {
                log::info!("{name}: running {}", step.command());
                match step.action(host) {
                    Ok(()) => StepResult::new(&name, StepStatus::Succeeded),
                    Err(e) => {
                        log::debug!("{name}: failed: {e:#}");
                        StepResult::new(&name, StepStatus::Failed).with_detail(format!("{e:#}"))
                    }
                }
            }
        }
    };

    StepResult {
        elapsed_ms: started.elapsed().as_millis() as u64,
        ..result
    }
}

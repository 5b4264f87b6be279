//! One provisioning run, start to finish
//!
//! Platform check → privilege gate → pipeline → verification facts.

use provision::{ProgressCallback, ProvisionError, RunContext};

use crate::config::InstallerConfig;
use crate::network::NetworkProbe;
use crate::{platform, privilege, report, steps};

/// Run the whole install against `ctx.host`
///
/// Preflight failures return before any step runs. After the pipeline,
/// facts are gathered whether it completed or halted.
pub fn run<P: ProgressCallback>(
    ctx: &mut RunContext<'_>,
    config: &InstallerConfig,
    network: &dyn NetworkProbe,
    progress: &mut P,
) -> Result<(), ProvisionError> {
    platform::ensure_supported(ctx.host, &config.platform)?;
    privilege::check(ctx.mode, ctx.host.effective_uid())?;

    let pipeline = steps::pipeline(config);
    log::debug!("pipeline: {}", pipeline.step_names().join(" → "));

    let outcome = pipeline.run(ctx, progress);
    ctx.summary.facts = Some(report::gather_facts(ctx, config, network));
    outcome
}

/// Process exit status for a run outcome
pub fn exit_code(outcome: &Result<(), ProvisionError>) -> i32 {
    match outcome {
        Ok(()) => 0,
        Err(e) => e.exit_code(),
    }
}

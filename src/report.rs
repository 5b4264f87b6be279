//! Verification reporter
//!
//! Re-queries live state once the pipeline has stopped and renders the
//! final summary block. Dry-run output is labelled so a simulation can never
//! be mistaken for a finished install.

use colored::Colorize;
use provision::{ExecutionMode, Host, ProvisionError, RunContext, RunSummary, StepStatus, SystemFacts};
use serde::Serialize;

use crate::config::InstallerConfig;
use crate::network::NetworkProbe;

pub const DRY_RUN_COMPLETE: &str = "simulation complete, no changes made";

const RULE_WIDTH: usize = 60;

/// Query service, page and network facts
///
/// The public IP is only looked up in apply mode.
pub fn gather_facts(
    ctx: &RunContext<'_>,
    config: &InstallerConfig,
    network: &dyn NetworkProbe,
) -> SystemFacts {
    let service_active = service_active(ctx.host, &config.service);
    let test_page_present = match ctx.host.read_file(&config.test_page_path()) {
        Ok(content) => content.is_some_and(|c| !c.trim().is_empty()),
        Err(e) => {
            log::warn!("{e:#}");
            false
        }
    };
    let page_reachable = network.page_reachable(&config.network.local_url);
    let public_ip = match ctx.mode {
        ExecutionMode::Apply => network.public_ip(),
        ExecutionMode::DryRun => None,
    };

    SystemFacts {
        service_active,
        test_page_present,
        page_reachable,
        public_ip,
    }
}

fn service_active(host: &dyn Host, unit: &str) -> bool {
    host.run_status("systemctl", &["is-active", "--quiet", unit])
        .unwrap_or_else(|e| {
            log::warn!("{e:#}");
            false
        })
}

/// One-line overall outcome
pub fn outcome_line(summary: &RunSummary, error: Option<&ProvisionError>) -> String {
    match (summary.mode, error) {
        (_, Some(ProvisionError::StepFailed { step, .. })) => format!("failed at step '{step}'"),
        (_, Some(err)) => format!("aborted: {}", err.kind()),
        (ExecutionMode::DryRun, None) => DRY_RUN_COMPLETE.to_string(),
        (ExecutionMode::Apply, None) if summary.total_changes() == 0 => {
            "already provisioned, nothing to change".to_string()
        }
        (ExecutionMode::Apply, None) => "installation complete".to_string(),
    }
}

fn yes_no(value: bool) -> String {
    if value {
        "yes".green().to_string()
    } else {
        "no".red().to_string()
    }
}

fn step_counts(summary: &RunSummary) -> String {
    let parts: Vec<String> = [
        StepStatus::Succeeded,
        StepStatus::Simulated,
        StepStatus::SkippedAlreadySatisfied,
        StepStatus::Failed,
    ]
    .into_iter()
    .filter_map(|status| {
        let count = summary.count(status);
        (count > 0).then(|| format!("{count} {status}"))
    })
    .collect();

    if parts.is_empty() {
        "none run".to_string()
    } else {
        format!("{} ({})", summary.results.len(), parts.join(", "))
    }
}

/// Render the summary block
pub fn render(summary: &RunSummary, error: Option<&ProvisionError>) -> String {
    let mut out = String::new();
    let title = format!("{} SUMMARY", summary.mode.label());
    let failed = error.is_some();

    out.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH)));
    let title = match summary.mode {
        ExecutionMode::DryRun => title.yellow().bold(),
        ExecutionMode::Apply => title.cyan().bold(),
    };
    out.push_str(&format!("{title}\n"));
    out.push_str(&format!("{}\n", "-".repeat(RULE_WIDTH).dimmed()));

    let outcome = outcome_line(summary, error);
    let outcome = if failed {
        outcome.red().bold()
    } else {
        outcome.green().bold()
    };
    out.push_str(&format!("  {:<16}{outcome}\n", "Outcome:"));
    out.push_str(&format!("  {:<16}{}\n", "Steps:", step_counts(summary)));

    if let Some(facts) = &summary.facts {
        out.push_str(&format!("  {:<16}{}\n", "Service active:", yes_no(facts.service_active)));
        out.push_str(&format!("  {:<16}{}\n", "Test page:", yes_no(facts.test_page_present)));
        out.push_str(&format!("  {:<16}{}\n", "Page reachable:", yes_no(facts.page_reachable)));

        if summary.mode == ExecutionMode::Apply {
            let ip = facts.public_ip.as_deref().unwrap_or("unknown");
            out.push_str(&format!("  {:<16}{ip}\n", "Public IP:"));
            if let Some(ip) = &facts.public_ip
                && !failed
            {
                out.push_str(&format!("\n  Test your server at: {}\n", format!("http://{ip}").cyan()));
                out.push_str(&format!(
                    "  {}\n",
                    "Make sure the security group allows inbound HTTP on port 80".dimmed()
                ));
            }
        }
    }

    if summary.mode == ExecutionMode::DryRun {
        out.push_str(&format!("\n  {}\n", "Run with --apply (as root) to perform the installation".dimmed()));
    }

    out.push_str(&"=".repeat(RULE_WIDTH));
    out
}

/// Machine-readable form of a run
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub exit_code: i32,
    pub summary: &'a RunSummary,
}

impl<'a> JsonReport<'a> {
    pub fn new(summary: &'a RunSummary, error: Option<&ProvisionError>) -> Self {
        Self {
            outcome: outcome_line(summary, error),
            error: error.map(ToString::to_string),
            exit_code: error.map_or(0, ProvisionError::exit_code),
            summary,
        }
    }
}

use colored::{ColoredString, Colorize};
use provision::{ExecutionMode, StepStatus};

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

/// Print a warning message
pub fn warn(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a dim/muted message
pub fn dim(msg: &str) {
    println!("  {}", msg.dimmed());
}

/// Print a header/title
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// Symbol for a step status
pub fn status_symbol(status: StepStatus) -> ColoredString {
    match status {
        StepStatus::SkippedAlreadySatisfied => "○".dimmed(),
        StepStatus::Succeeded => "✓".green(),
        StepStatus::Simulated => "~".yellow(),
        StepStatus::Failed => "✗".red(),
    }
}

/// Colored status label
pub fn status_label(status: StepStatus) -> ColoredString {
    match status {
        StepStatus::SkippedAlreadySatisfied => status.label().dimmed(),
        StepStatus::Succeeded => status.label().green(),
        StepStatus::Simulated => status.label().yellow(),
        StepStatus::Failed => status.label().red().bold(),
    }
}

/// Print one finished step: `[3/10] ✓ start-service  done`
pub fn step(num: usize, total: usize, name: &str, status: StepStatus, detail: Option<&str>) {
    println!(
        "{} {} {:<26} {}",
        format!("[{}/{}]", num, total).blue().bold(),
        status_symbol(status),
        name,
        status_label(status)
    );
    if let Some(detail) = detail {
        for line in detail.lines() {
            dim(&format!("    {line}"));
        }
    }
}

/// Print the run banner
pub fn banner(mode: ExecutionMode) {
    header("Apache Web Server Installer");
    match mode {
        ExecutionMode::DryRun => {
            warn("DRY RUN MODE - no changes will be made");
            dim("Use --apply to actually perform the installation");
        }
        ExecutionMode::Apply => info("APPLY MODE - changes will be applied"),
    }
    println!();
}

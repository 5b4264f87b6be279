use clap::Parser;
use std::path::PathBuf;

/// Without --apply every step is checked and simulated; nothing is changed.
#[derive(Parser)]
#[command(name = "httpd-setup")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Install and start Apache (httpd) on a fresh Amazon Linux 2023 host", long_about = None)]
pub struct Cli {
    /// Actually perform the installation (requires root)
    #[arg(long)]
    pub apply: bool,

    /// Config file (TOML)
    #[arg(short, long, env = "HTTPD_SETUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the run summary as JSON instead of the console report
    #[arg(long)]
    pub json: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

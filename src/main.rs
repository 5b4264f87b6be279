mod cli;
mod config;
mod install;
mod network;
mod platform;
mod privilege;
mod progress;
mod report;
mod runner;
mod steps;
mod ui;

#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::InstallerConfig;
use network::MetadataClient;
use progress::ConsoleProgress;
use provision::{ExecutionMode, RunContext};
use runner::SystemHost;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let config = InstallerConfig::load(cli.config.as_deref())?;
    let mode = ExecutionMode::from_apply_flag(cli.apply);
    let host = SystemHost::new();
    let network = MetadataClient::new(&config.network);

    let mut progress = if cli.json {
        ConsoleProgress::hidden()
    } else {
        if !cli.quiet {
            ui::banner(mode);
        }
        ConsoleProgress::new()
    };

    let mut ctx = RunContext::new(mode, &host);
    let outcome = install::run(&mut ctx, &config, &network, &mut progress);
    let summary = ctx.into_summary();
    let error = outcome.as_ref().err();

    if cli.json {
        let json = serde_json::to_string_pretty(&report::JsonReport::new(&summary, error))
            .context("Failed to serialize run summary")?;
        println!("{json}");
    } else {
        // Preflight failures never produced any results worth a summary
        if error.is_none_or(|e| !e.is_preflight()) {
            println!();
            println!("{}", report::render(&summary, error));
        }
        if let Some(e) = error {
            println!();
            ui::error(&e.to_string());
            ui::dim(e.kind().advice());
        }
    }

    let code = install::exit_code(&outcome);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

//! CLI command handlers.
//!
//! This module contains the execution logic for each CLI command.

use std::path::Path;
use std::process::ExitCode;

use tracing::error;

use super::args::RunOverrides;
use super::output::{format_config_summary, print_help, print_run_summary, print_version};
use super::{Args, Command};
use crate::config::PiConfig;
use crate::error::SimResult;
use crate::runner::PiRunner;

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run {
            config_path,
            overrides,
            verbose: _,
        } => run_estimate(config_path.as_deref(), &overrides),
        Command::Check { config_path } => check_config(&config_path),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
        Command::Invalid { message } => {
            eprintln!("Error: {message}\n");
            print_help();
            ExitCode::from(2)
        }
    }
}

/// Load the configuration for a run: the file if given, else defaults, then
/// command-line overrides.
///
/// # Errors
///
/// Returns error if the file cannot be read or parsed, or if the final
/// configuration is invalid.
pub fn resolve_config(path: Option<&Path>, overrides: &RunOverrides) -> SimResult<PiConfig> {
    let mut config = match path {
        Some(path) => PiConfig::load(path)?,
        None => PiConfig::default(),
    };
    overrides.apply(&mut config);
    config.check()?;
    Ok(config)
}

/// Run an estimate and write every configured artifact.
///
/// Exits with 1 if the configuration is rejected or any artifact fails; the
/// summary is printed either way once the estimate exists.
#[must_use]
pub fn run_estimate(path: Option<&Path>, overrides: &RunOverrides) -> ExitCode {
    let report = resolve_config(path, overrides)
        .and_then(PiRunner::new)
        .and_then(|runner| runner.run());

    match report {
        Ok(report) => {
            print_run_summary(&report);
            if report.is_complete() {
                ExitCode::SUCCESS
            } else {
                error!(failed = report.failures.len(), "some artifacts were not written");
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Validate a configuration file.
#[must_use]
pub fn check_config(path: &Path) -> ExitCode {
    println!("Checking: {}\n", path.display());

    match PiConfig::load(path) {
        Ok(config) => {
            println!("✓ Configuration is valid");
            print!("{}", format_config_summary(&config));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ {e}");
            ExitCode::from(1)
        }
    }
}

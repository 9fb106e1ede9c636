//! CLI module for pisim.
//!
//! All CLI logic lives here rather than in main.rs so it can be tested. The
//! entry point `run_cli` is called from main.rs with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, RunOverrides};
pub use commands::{check_config, resolve_config, run_cli, run_estimate};
pub use output::{
    format_config_summary, format_run_summary, print_help, print_run_summary, print_version,
};

#[cfg(test)]
mod tests;

//! CLI output formatting.
//!
//! This module contains all output formatting functions for the CLI.
//! Formatting is split from printing so the text can be tested.

use std::fmt::Write as _;

use crate::config::PiConfig;
use crate::runner::RunReport;

/// Print version information.
pub fn print_version() {
    println!(
        "pisim {} (git {}, built {})",
        env!("CARGO_PKG_VERSION"),
        env!("PISIM_GIT_HASH"),
        env!("PISIM_BUILD_TIMESTAMP")
    );
}

/// Print help message.
pub fn print_help() {
    println!(
        r"pisim - Monte Carlo estimation of π

USAGE:
    pisim <COMMAND> [OPTIONS]

COMMANDS:
    run [config.yaml]           Estimate π and write the charts
        -n, --samples <N>       Number of samples (default: 1000)
        -r, --radius <R>        Circle radius (default: 100)
        --seed <S>              Random seed (default: 42)
        --mode <MODE>           integer | continuous (default: integer)
        -o, --out <DIR>         Output directory (default: .)
        --no-render             Skip the sample scene
        --export <FORMAT>       Also export the run: csv | jsonl
        -v, --verbose           Enable verbose output

    check <config.yaml>         Validate a configuration file

    help                        Show this help message
    version                     Show version information

OUTPUT:
    pi_estimate.svg             Running estimate against π
    pi_error.svg                Running error against 0
    samples.svg                 Classified samples in the square

EXAMPLES:
    pisim run
    pisim run --samples 100000 --seed 7
    pisim run experiment.yaml --out results --export csv
    pisim check experiment.yaml

Logging goes to stderr and follows RUST_LOG (default: pisim=info).
"
    );
}

/// Format the summary of a finished run.
#[must_use]
pub fn format_run_summary(report: &RunReport) -> String {
    let run = &report.run;
    let mut out = String::new();

    let _ = writeln!(out, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let _ = writeln!(out, "Samples:  {}", run.state.total());
    let _ = writeln!(out, "Radius:   {}", run.radius);
    let _ = writeln!(out, "Seed:     {}", report.seed);
    let _ = writeln!(out, "Inside:   {}", run.state.inside_count);
    let _ = writeln!(out, "Outside:  {}", run.state.outside_count);
    if let (Some(estimate), Some(error)) = (run.final_estimate(), run.final_error()) {
        let _ = writeln!(out, "Estimate: {estimate:.6}");
        let _ = writeln!(out, "Error:    {error:+.6}");
    }
    let _ = writeln!(out, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    for (artifact, path) in &report.written {
        let _ = writeln!(out, "✓ {artifact}: {}", path.display());
    }
    for failure in &report.failures {
        let _ = writeln!(
            out,
            "✗ {}: {} ({})",
            failure.artifact,
            failure.path.display(),
            failure.error
        );
    }

    out
}

/// Print the summary of a finished run.
pub fn print_run_summary(report: &RunReport) {
    print!("{}", format_run_summary(report));
}

/// Format the settings of a valid configuration.
#[must_use]
pub fn format_config_summary(config: &PiConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  seed:    {}", config.reproducibility.seed);
    let _ = writeln!(out, "  samples: {}", config.sampling.samples);
    let _ = writeln!(out, "  radius:  {}", config.sampling.radius);
    let _ = writeln!(out, "  mode:    {}", config.sampling.mode);
    let _ = writeln!(out, "  output:  {}", config.output.dir.display());
    if let Some(format) = config.output.export {
        let _ = writeln!(out, "  export:  {}", format.extension());
    }
    out
}

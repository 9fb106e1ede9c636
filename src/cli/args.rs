//! CLI argument parsing.
//!
//! This module provides the argument parser for the pisim CLI.
//! Parsing works over any iterator of strings so it can be tested directly.

use std::path::PathBuf;

use crate::config::PiConfig;
use crate::engine::SamplingMode;
use crate::visualization::ExportFormat;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Run an estimate and write its artifacts
    Run {
        /// Optional configuration file; defaults apply without one.
        config_path: Option<PathBuf>,
        /// Command-line overrides applied on top of the configuration.
        overrides: RunOverrides,
        /// Enable verbose output.
        verbose: bool,
    },
    /// Validate a configuration file
    Check {
        /// Path to the configuration file.
        config_path: PathBuf,
    },
    /// Show help
    Help,
    /// Show version
    Version,
    /// Arguments could not be parsed
    Invalid {
        /// What was wrong.
        message: String,
    },
}

/// Overrides given on the `run` command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOverrides {
    /// `--samples N`
    pub samples: Option<u64>,
    /// `--radius R`
    pub radius: Option<f64>,
    /// `--seed S`
    pub seed: Option<u64>,
    /// `--mode integer|continuous`
    pub mode: Option<SamplingMode>,
    /// `--out DIR`
    pub out: Option<PathBuf>,
    /// `--no-render`
    pub no_render: bool,
    /// `--export csv|jsonl`
    pub export: Option<ExportFormat>,
}

impl RunOverrides {
    /// Apply the overrides to `config`.
    pub fn apply(&self, config: &mut PiConfig) {
        if let Some(samples) = self.samples {
            config.sampling.samples = samples;
        }
        if let Some(radius) = self.radius {
            config.sampling.radius = radius;
        }
        if let Some(seed) = self.seed {
            config.reproducibility.seed = seed;
        }
        if let Some(mode) = self.mode {
            config.sampling.mode = mode;
        }
        if let Some(ref out) = self.out {
            config.output.dir.clone_from(out);
        }
        if self.no_render {
            config.output.render_scene = false;
        }
        if self.export.is_some() {
            config.output.export = self.export;
        }
    }
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// This method is testable as it accepts any iterator of strings,
    /// not just `std::env::args()`.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// Whether verbose output was requested.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        matches!(self.command, Command::Run { verbose: true, .. })
    }

    /// Internal parsing from a vector of strings.
    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "run" => Self::parse_run_command(&args[2..]),
            "check" => Self::parse_check_command(&args[2..]),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => invalid(format!("unknown command: {unknown}")),
        };

        Self { command }
    }

    /// Parse the 'run' command arguments.
    fn parse_run_command(args: &[String]) -> Command {
        let mut config_path = None;
        let mut overrides = RunOverrides::default();
        let mut verbose = false;

        let mut rest = args.iter();
        while let Some(arg) = rest.next() {
            let mut value = |flag: &str| {
                rest.next()
                    .map(String::as_str)
                    .ok_or_else(|| format!("{flag} requires a value"))
            };

            let flag = arg.as_str();
            let parsed: Result<(), String> = match flag {
                "--samples" | "-n" => value(flag)
                    .and_then(|v| parse_number(flag, v))
                    .map(|n| overrides.samples = Some(n)),
                "--radius" | "-r" => value(flag)
                    .and_then(|v| parse_number(flag, v))
                    .map(|r| overrides.radius = Some(r)),
                "--seed" => value(flag)
                    .and_then(|v| parse_number(flag, v))
                    .map(|s| overrides.seed = Some(s)),
                "--mode" => value(flag)
                    .and_then(|v| v.parse::<SamplingMode>().map_err(|e| e.to_string()))
                    .map(|m| overrides.mode = Some(m)),
                "--out" | "-o" => value(flag).map(|v| overrides.out = Some(PathBuf::from(v))),
                "--export" => value(flag)
                    .and_then(|v| {
                        ExportFormat::from_name(v)
                            .ok_or_else(|| format!("unknown export format: {v}"))
                    })
                    .map(|f| overrides.export = Some(f)),
                "--no-render" => {
                    overrides.no_render = true;
                    Ok(())
                }
                "-v" | "--verbose" => {
                    verbose = true;
                    Ok(())
                }
                unknown if unknown.starts_with('-') => Err(format!("unknown option: {unknown}")),
                path if config_path.is_none() => {
                    config_path = Some(PathBuf::from(path));
                    Ok(())
                }
                extra => Err(format!("unexpected argument: {extra}")),
            };

            if let Err(message) = parsed {
                return invalid(message);
            }
        }

        Command::Run {
            config_path,
            overrides,
            verbose,
        }
    }

    /// Parse the 'check' command arguments.
    fn parse_check_command(args: &[String]) -> Command {
        match args {
            [path] => Command::Check {
                config_path: PathBuf::from(path),
            },
            [] => invalid("'check' requires a configuration path".to_string()),
            _ => invalid("'check' takes exactly one configuration path".to_string()),
        }
    }
}

fn invalid(message: String) -> Command {
    Command::Invalid { message }
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("invalid value for {flag}: {value}"))
}

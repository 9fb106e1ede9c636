//! CLI module tests.

#![allow(clippy::unwrap_used, clippy::panic)]

use super::args::{Args, Command, RunOverrides};
use super::commands::{check_config, resolve_config, run_cli, run_estimate};
use super::output::{format_config_summary, format_run_summary};
use crate::config::PiConfig;
use crate::engine::SamplingMode;
use crate::runner::PiRunner;
use crate::visualization::ExportFormat;
use std::path::PathBuf;
use std::process::ExitCode;
use tempfile::tempdir;

fn run_command(args: &[&str]) -> (Option<PathBuf>, RunOverrides, bool) {
    match Args::parse_from(args).command {
        Command::Run {
            config_path,
            overrides,
            verbose,
        } => (config_path, overrides, verbose),
        other => panic!("expected run command, got {other:?}"),
    }
}

fn is_invalid(args: &[&str]) -> bool {
    matches!(Args::parse_from(args).command, Command::Invalid { .. })
}

// ============================================================================
// Args parsing tests
// ============================================================================

#[test]
fn test_parse_no_args_shows_help() {
    let args = Args::parse_from(["pisim"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_help_variants() {
    for flag in ["-h", "--help", "help"] {
        assert_eq!(Args::parse_from(["pisim", flag]).command, Command::Help);
    }
}

#[test]
fn test_parse_version_variants() {
    for flag in ["-V", "--version", "version"] {
        assert_eq!(Args::parse_from(["pisim", flag]).command, Command::Version);
    }
}

#[test]
fn test_parse_unknown_command() {
    assert!(is_invalid(&["pisim", "estimate"]));
}

#[test]
fn test_parse_run_without_config() {
    let (path, overrides, verbose) = run_command(&["pisim", "run"]);
    assert_eq!(path, None);
    assert_eq!(overrides, RunOverrides::default());
    assert!(!verbose);
}

#[test]
fn test_parse_run_with_config() {
    let (path, _, _) = run_command(&["pisim", "run", "experiment.yaml"]);
    assert_eq!(path, Some(PathBuf::from("experiment.yaml")));
}

#[test]
fn test_parse_run_all_overrides() {
    let (path, overrides, verbose) = run_command(&[
        "pisim",
        "run",
        "--samples",
        "5000",
        "--radius",
        "2.5",
        "--seed",
        "7",
        "--mode",
        "continuous",
        "--out",
        "results",
        "--no-render",
        "--export",
        "jsonl",
        "-v",
    ]);

    assert_eq!(path, None);
    assert!(verbose);
    assert_eq!(overrides.samples, Some(5000));
    assert_eq!(overrides.radius, Some(2.5));
    assert_eq!(overrides.seed, Some(7));
    assert_eq!(overrides.mode, Some(SamplingMode::Continuous));
    assert_eq!(overrides.out, Some(PathBuf::from("results")));
    assert!(overrides.no_render);
    assert_eq!(overrides.export, Some(ExportFormat::JsonLines));
}

#[test]
fn test_parse_run_short_flags() {
    let (path, overrides, _) =
        run_command(&["pisim", "run", "-n", "10", "cfg.yaml", "-r", "50", "-o", "out"]);
    assert_eq!(path, Some(PathBuf::from("cfg.yaml")));
    assert_eq!(overrides.samples, Some(10));
    assert_eq!(overrides.radius, Some(50.0));
    assert_eq!(overrides.out, Some(PathBuf::from("out")));
}

#[test]
fn test_parse_run_negative_radius_is_a_value() {
    let (_, overrides, _) = run_command(&["pisim", "run", "--radius", "-5"]);
    assert_eq!(overrides.radius, Some(-5.0));
}

#[test]
fn test_parse_run_rejects_bad_values() {
    assert!(is_invalid(&["pisim", "run", "--samples", "many"]));
    assert!(is_invalid(&["pisim", "run", "--samples", "-1"]));
    assert!(is_invalid(&["pisim", "run", "--seed"]));
    assert!(is_invalid(&["pisim", "run", "--mode", "quasi"]));
    assert!(is_invalid(&["pisim", "run", "--export", "parquet"]));
    assert!(is_invalid(&["pisim", "run", "--fast"]));
    assert!(is_invalid(&["pisim", "run", "a.yaml", "b.yaml"]));
}

#[test]
fn test_parse_check() {
    let args = Args::parse_from(["pisim", "check", "cfg.yaml"]);
    assert_eq!(
        args.command,
        Command::Check {
            config_path: PathBuf::from("cfg.yaml")
        }
    );
    assert!(is_invalid(&["pisim", "check"]));
    assert!(is_invalid(&["pisim", "check", "a.yaml", "b.yaml"]));
}

#[test]
fn test_verbose_only_for_run() {
    assert!(Args::parse_from(["pisim", "run", "--verbose"]).verbose());
    assert!(!Args::parse_from(["pisim", "run"]).verbose());
    assert!(!Args::parse_from(["pisim", "help"]).verbose());
}

// ============================================================================
// Overrides and config resolution
// ============================================================================

#[test]
fn test_overrides_apply() {
    let overrides = RunOverrides {
        samples: Some(42),
        seed: Some(9),
        no_render: true,
        export: Some(ExportFormat::Csv),
        ..RunOverrides::default()
    };
    let mut config = PiConfig::default();
    overrides.apply(&mut config);

    assert_eq!(config.sampling.samples, 42);
    assert_eq!(config.reproducibility.seed, 9);
    assert_eq!(config.sampling.radius, 100.0);
    assert!(!config.output.render_scene);
    assert_eq!(config.output.export, Some(ExportFormat::Csv));
}

#[test]
fn test_empty_overrides_keep_config() {
    let mut config = PiConfig::builder().export(ExportFormat::Csv).build();
    RunOverrides::default().apply(&mut config);
    assert_eq!(config.output.export, Some(ExportFormat::Csv));
    assert!(config.output.render_scene);
}

#[test]
fn test_resolve_defaults() {
    let config = resolve_config(None, &RunOverrides::default()).unwrap();
    assert_eq!(config.sampling.samples, 1000);
    assert_eq!(config.sampling.mode, SamplingMode::Integer);
}

#[test]
fn test_resolve_file_then_overrides() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cfg.yaml");
    std::fs::write(
        &path,
        "reproducibility:\n  seed: 3\nsampling:\n  samples: 20\n",
    )
    .unwrap();

    let overrides = RunOverrides {
        samples: Some(30),
        ..RunOverrides::default()
    };
    let config = resolve_config(Some(path.as_path()), &overrides).unwrap();
    assert_eq!(config.reproducibility.seed, 3);
    assert_eq!(config.sampling.samples, 30);
}

#[test]
fn test_resolve_rejects_invalid_overrides() {
    let zero = RunOverrides {
        samples: Some(0),
        ..RunOverrides::default()
    };
    assert!(resolve_config(None, &zero).is_err());

    let fractional = RunOverrides {
        radius: Some(2.5),
        ..RunOverrides::default()
    };
    assert!(resolve_config(None, &fractional).is_err());

    let negative = RunOverrides {
        radius: Some(-1.0),
        mode: Some(SamplingMode::Continuous),
        ..RunOverrides::default()
    };
    assert!(resolve_config(None, &negative).is_err());
}

#[test]
fn test_resolve_missing_file() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.yaml");
    assert!(resolve_config(Some(missing.as_path()), &RunOverrides::default()).is_err());
}

// ============================================================================
// Command execution tests
// ============================================================================

#[test]
fn test_run_estimate_success() {
    let dir = tempdir().unwrap();
    let overrides = RunOverrides {
        samples: Some(200),
        out: Some(dir.path().to_path_buf()),
        ..RunOverrides::default()
    };

    assert_eq!(run_estimate(None, &overrides), ExitCode::SUCCESS);
    assert!(dir.path().join("pi_estimate.svg").exists());
    assert!(dir.path().join("pi_error.svg").exists());
    assert!(dir.path().join("samples.svg").exists());
}

#[test]
fn test_run_estimate_artifact_failure_exits_1() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "file").unwrap();
    let overrides = RunOverrides {
        samples: Some(50),
        out: Some(blocker),
        ..RunOverrides::default()
    };

    assert_eq!(run_estimate(None, &overrides), ExitCode::from(1));
}

#[test]
fn test_run_estimate_invalid_config_exits_1() {
    let overrides = RunOverrides {
        samples: Some(0),
        ..RunOverrides::default()
    };
    assert_eq!(run_estimate(None, &overrides), ExitCode::from(1));
}

#[test]
fn test_check_config() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good.yaml");
    std::fs::write(&good, "sampling:\n  samples: 10\n").unwrap();
    assert_eq!(check_config(&good), ExitCode::SUCCESS);

    let bad = dir.path().join("bad.yaml");
    std::fs::write(&bad, "sampling:\n  samples: 10\n  jitter: 0.1\n").unwrap();
    assert_eq!(check_config(&bad), ExitCode::from(1));
}

#[test]
fn test_run_cli_help_version_invalid() {
    assert_eq!(run_cli(Args::parse_from(["pisim"])), ExitCode::SUCCESS);
    assert_eq!(
        run_cli(Args::parse_from(["pisim", "--version"])),
        ExitCode::SUCCESS
    );
    assert_eq!(
        run_cli(Args::parse_from(["pisim", "bogus"])),
        ExitCode::from(2)
    );
}

// ============================================================================
// Output formatting tests
// ============================================================================

#[test]
fn test_format_run_summary() {
    let dir = tempdir().unwrap();
    let config = PiConfig::builder()
        .samples(100)
        .seed(5)
        .output_dir(dir.path())
        .render_scene(false)
        .build();
    let report = PiRunner::new(config).unwrap().run().unwrap();

    let summary = format_run_summary(&report);
    assert!(summary.contains("Samples:  100"));
    assert!(summary.contains("Seed:     5"));
    assert!(summary.contains("Estimate: "));
    assert!(summary.contains("✓ estimate chart"));
    assert!(summary.contains("✓ error chart"));
    assert!(!summary.contains('✗'));
}

#[test]
fn test_format_run_summary_lists_failures() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "file").unwrap();
    let config = PiConfig::builder()
        .samples(10)
        .output_dir(&blocker)
        .render_scene(false)
        .build();
    let report = PiRunner::new(config).unwrap().run().unwrap();

    let summary = format_run_summary(&report);
    assert!(summary.contains("✗ estimate chart"));
    assert!(summary.contains("Inside:"));
}

#[test]
fn test_format_config_summary() {
    let config = PiConfig::builder()
        .mode(SamplingMode::Continuous)
        .radius(1.0)
        .export(ExportFormat::JsonLines)
        .build();
    let text = format_config_summary(&config);
    assert!(text.contains("mode:    continuous"));
    assert!(text.contains("export:  jsonl"));
}

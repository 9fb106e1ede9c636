//! Run pipeline - configuration in, estimate and artifacts out.
//!
//! The pipeline is two passes:
//! 1. Estimate: sample, classify and record both series (observers only log).
//! 2. Visualize: render the scene, save both charts, export data.
//!
//! A failing artifact is recorded in the report and the remaining artifacts
//! are still attempted; the estimate itself is never discarded.

use std::fmt;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::PiConfig;
use crate::engine::{EstimateRun, Estimator, ProgressLogger, SampleObserver, UniformSquare};
use crate::error::{SimError, SimResult};
use crate::renderers::{SampleRenderer, SvgSurface};
use crate::visualization::{ConvergencePlotter, Exporter};

/// Output artifacts a run can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// Rendered sample scene.
    Scene,
    /// Estimate convergence chart.
    EstimateChart,
    /// Error chart.
    ErrorChart,
    /// Data export.
    Export,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scene => "sample scene",
            Self::EstimateChart => "estimate chart",
            Self::ErrorChart => "error chart",
            Self::Export => "data export",
        };
        f.write_str(name)
    }
}

/// An artifact that could not be produced.
#[derive(Debug)]
pub struct ArtifactFailure {
    /// Which artifact.
    pub artifact: Artifact,
    /// Intended destination.
    pub path: PathBuf,
    /// What went wrong.
    pub error: SimError,
}

/// Outcome of a full run.
#[derive(Debug)]
pub struct RunReport {
    /// Seed the run used.
    pub seed: u64,
    /// The estimate, always complete.
    pub run: EstimateRun,
    /// Artifacts written, in order.
    pub written: Vec<(Artifact, PathBuf)>,
    /// Artifacts that failed.
    pub failures: Vec<ArtifactFailure>,
}

impl RunReport {
    /// Whether every requested artifact was written.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Executes a configured run.
#[derive(Debug, Clone)]
pub struct PiRunner {
    config: PiConfig,
    progress_interval: u64,
}

impl PiRunner {
    /// Create a runner for a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration fails validation.
    pub fn new(config: PiConfig) -> SimResult<Self> {
        config.check()?;
        Ok(Self {
            config,
            progress_interval: 10_000,
        })
    }

    /// Samples between progress log events.
    #[must_use]
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &PiConfig {
        &self.config
    }

    /// Run the estimator only.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArgument`] if the sampling settings are
    /// rejected.
    pub fn estimate(&self) -> SimResult<EstimateRun> {
        self.sample().map(|(_, run)| run)
    }

    /// Estimate, returning the seed the source was built from.
    fn sample(&self) -> SimResult<(u64, EstimateRun)> {
        let sampling = &self.config.sampling;
        let estimator = Estimator::new(sampling.samples, sampling.radius)?;
        let mut source = UniformSquare::new(self.config.reproducibility.seed, sampling.mode);
        let seed = source.rng().master_seed();
        info!(seed, mode = %source.mode(), "sampling source ready");

        let mut progress = ProgressLogger::new(self.progress_interval);
        let mut observers: [&mut dyn SampleObserver; 1] = [&mut progress];
        let run = estimator.run_observed(&mut source, &mut observers)?;
        Ok((seed, run))
    }

    /// Estimate, then produce every configured artifact.
    ///
    /// # Errors
    ///
    /// Only estimator errors are returned; artifact failures are collected in
    /// [`RunReport::failures`].
    pub fn run(&self) -> SimResult<RunReport> {
        let (seed, run) = self.sample()?;
        let mut report = RunReport {
            seed,
            run,
            written: Vec::new(),
            failures: Vec::new(),
        };

        let output = &self.config.output;
        if let Err(e) = std::fs::create_dir_all(&output.dir) {
            warn!(dir = %output.dir.display(), error = %e, "cannot create output directory");
        }

        if output.render_scene {
            let path = output.scene_path();
            let result = SampleRenderer::new(SvgSurface::new(&path, output.size()))
                .render(&report.run)
                .map(drop);
            record(&mut report, Artifact::Scene, path, result);
        }

        let plotter = ConvergencePlotter::new(output.size());
        let path = output.estimate_chart_path();
        let result = plotter.plot_estimates(&report.run.estimates, &path);
        record(&mut report, Artifact::EstimateChart, path, result);

        let path = output.error_chart_path();
        let result = plotter.plot_errors(&report.run.errors, &path);
        record(&mut report, Artifact::ErrorChart, path, result);

        if let (Some(format), Some(path)) = (output.export, output.export_path()) {
            let result = Exporter::new(format).export(&report.run, &path);
            record(&mut report, Artifact::Export, path, result);
        }

        info!(
            written = report.written.len(),
            failed = report.failures.len(),
            "run finished"
        );
        Ok(report)
    }
}

fn record(report: &mut RunReport, artifact: Artifact, path: PathBuf, result: SimResult<()>) {
    match result {
        Ok(()) => report.written.push((artifact, path)),
        Err(error) => {
            warn!(%artifact, path = %path.display(), %error, "artifact failed");
            report.failures.push(ArtifactFailure {
                artifact,
                path,
                error,
            });
        }
    }
}

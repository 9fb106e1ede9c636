//! Convergence charts and data export.
//!
//! - `ConvergencePlotter`: estimate and error line charts (SVG via plotters)
//! - `Exporter`: CSV / JSON Lines dump of a run
//!
//! The x-axis of every chart is the 0-based iteration index, in the order
//! values were appended to the series.
//!
//! # Example
//!
//! ```rust,no_run
//! use pisim::engine::{Estimator, SamplingMode, UniformSquare};
//! use pisim::visualization::ConvergencePlotter;
//!
//! let mut source = UniformSquare::new(42, SamplingMode::Integer);
//! let run = Estimator::new(1000, 100.0)?.run(&mut source)?;
//! ConvergencePlotter::new((1200, 900)).plot_run(&run, "pi_estimate.svg", "pi_error.svg")?;
//! # Ok::<(), pisim::SimError>(())
//! ```

mod export;

use std::f64::consts::PI;
use std::fmt::Display;
use std::path::Path;

use plotters::prelude::*;
use tracing::info;

use crate::engine::{ErrorSeries, EstimateRun, EstimateSeries};
use crate::error::{SimError, SimResult};

pub use export::{ExportFormat, Exporter, RunRecord};

/// Number of dashes drawn across the reference line.
const REFERENCE_DASHES: usize = 60;

pub(crate) fn plot_error<E: Display>(e: E) -> SimError {
    SimError::plot(e.to_string())
}

/// Title, axis label and reference value of a single chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// Chart caption.
    pub title: String,
    /// Y-axis description.
    pub y_label: String,
    /// Height of the dashed horizontal reference line.
    pub reference: f64,
}

impl ChartSpec {
    /// Estimate chart: reference line at π.
    #[must_use]
    pub fn estimate() -> Self {
        Self {
            title: "Monte Carlo estimate of π".to_string(),
            y_label: "Pi".to_string(),
            reference: PI,
        }
    }

    /// Error chart: reference line at zero.
    #[must_use]
    pub fn error() -> Self {
        Self {
            title: "Estimate error (π − estimate)".to_string(),
            y_label: "Error".to_string(),
            reference: 0.0,
        }
    }
}

/// Y range covering all values and the reference line, with a small margin.
fn y_bounds(values: &[f64], reference: f64) -> (f64, f64) {
    let (lo, hi) = values
        .iter()
        .fold((reference, reference), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let pad = ((hi - lo) * 0.05).max(0.05);
    (lo - pad, hi + pad)
}

/// Split the horizontal line `y` over `[x0, x1]` into dash segments.
fn dash_segments(x0: f64, x1: f64, y: f64, dashes: usize) -> Vec<[(f64, f64); 2]> {
    let dashes = dashes.max(1);
    let period = (x1 - x0) / dashes as f64;
    (0..dashes)
        .map(|i| {
            let start = x0 + period * i as f64;
            [(start, y), (start + period * 0.6, y)]
        })
        .collect()
}

/// Renders series against iteration count and saves them as SVG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvergencePlotter {
    size: (u32, u32),
}

impl Default for ConvergencePlotter {
    fn default() -> Self {
        Self::new((1200, 900))
    }
}

impl ConvergencePlotter {
    /// Create a plotter producing images of `size` pixels.
    #[must_use]
    pub const fn new(size: (u32, u32)) -> Self {
        Self { size }
    }

    /// Image size in pixels.
    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Plot `values` with a dashed reference line and save to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArgument`] for an empty series and
    /// [`SimError::Plot`] if drawing or saving fails.
    pub fn plot_series(&self, values: &[f64], spec: &ChartSpec, path: &Path) -> SimResult<()> {
        if values.is_empty() {
            return Err(SimError::invalid_argument(
                "series",
                "cannot plot an empty series",
            ));
        }

        let x_max = values.len().saturating_sub(1).max(1) as f64;
        let (y_min, y_max) = y_bounds(values, spec.reference);

        let root = SVGBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(plot_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&spec.title, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(0.0..x_max, y_min..y_max)
            .map_err(plot_error)?;

        chart
            .configure_mesh()
            .x_desc("Iterations")
            .y_desc(spec.y_label.as_str())
            .draw()
            .map_err(plot_error)?;

        chart
            .draw_series(
                dash_segments(0.0, x_max, spec.reference, REFERENCE_DASHES)
                    .into_iter()
                    .map(|segment| PathElement::new(segment.to_vec(), RED.stroke_width(2))),
            )
            .map_err(plot_error)?;

        chart
            .draw_series(LineSeries::new(
                values.iter().enumerate().map(|(i, &v)| (i as f64, v)),
                &BLUE,
            ))
            .map_err(plot_error)?;

        root.present().map_err(plot_error)?;
        info!(path = %path.display(), points = values.len(), "chart saved");
        Ok(())
    }

    /// Plot the estimate series against π.
    ///
    /// # Errors
    ///
    /// See [`ConvergencePlotter::plot_series`].
    pub fn plot_estimates(&self, estimates: &EstimateSeries, path: &Path) -> SimResult<()> {
        self.plot_series(estimates, &ChartSpec::estimate(), path)
    }

    /// Plot the error series against zero.
    ///
    /// # Errors
    ///
    /// See [`ConvergencePlotter::plot_series`].
    pub fn plot_errors(&self, errors: &ErrorSeries, path: &Path) -> SimResult<()> {
        self.plot_series(errors, &ChartSpec::error(), path)
    }

    /// Write both charts of a run.
    ///
    /// # Errors
    ///
    /// Returns the first chart failure; the run itself is untouched.
    pub fn plot_run(
        &self,
        run: &EstimateRun,
        estimate_path: impl AsRef<Path>,
        error_path: impl AsRef<Path>,
    ) -> SimResult<()> {
        self.plot_estimates(&run.estimates, estimate_path.as_ref())?;
        self.plot_errors(&run.errors, error_path.as_ref())
    }
}

//! Running Monte Carlo estimate of π.
//!
//! # Governing Equations
//!
//! ```text
//! Classification:  inside  ⇔  x² + y² ≤ r²      (boundary counts as inside)
//! Estimator:       π̂ₖ = 4 · insideₖ / (insideₖ + outsideₖ)
//! Error:           eₖ = π − π̂ₖ
//! ```
//!
//! Points are drawn from the square `[-r, r)²`, which has the circle of
//! radius `r` inscribed in it, so the hit ratio approximates `π/4`.
//!
//! The estimate and error are recorded after every sample, giving two series
//! of length `n` with the same index alignment.

use std::f64::consts::PI;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::observer::SampleObserver;
use super::source::{PointSource, MAX_INTEGER_RADIUS};
use crate::error::{SimError, SimResult};

/// Upper bound on the capacity reserved up front for a run.
const MAX_PREALLOCATED: u64 = 1 << 20;

/// A classified sample point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Whether the point lies in the closed disc of the run's radius.
    pub inside: bool,
}

/// `v` as an exact integer, if it is whole and within the integer grid.
fn exact_integer(v: f64) -> Option<i128> {
    (v.fract() == 0.0 && v.abs() <= MAX_INTEGER_RADIUS).then_some(v as i128)
}

impl Sample {
    /// Classify `(x, y)` against a circle of `radius` centered at the origin.
    ///
    /// Whole-number inputs are compared in `i128`, so grid points on or next
    /// to the boundary are classified exactly at any supported radius.
    #[must_use]
    pub fn classify(x: f64, y: f64, radius: f64) -> Self {
        let outside = match (exact_integer(x), exact_integer(y), exact_integer(radius)) {
            (Some(xi), Some(yi), Some(ri)) => xi * xi + yi * yi > ri * ri,
            _ => x * x + y * y > radius * radius,
        };
        Self {
            x,
            y,
            inside: !outside,
        }
    }
}

/// Inside/outside counters.
///
/// `inside_count + outside_count` always equals the number of samples seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningState {
    /// Samples inside the circle.
    pub inside_count: u64,
    /// Samples outside the circle.
    pub outside_count: u64,
}

impl RunningState {
    /// Count one classified sample.
    pub fn record(&mut self, inside: bool) {
        if inside {
            self.inside_count += 1;
        } else {
            self.outside_count += 1;
        }
    }

    /// Samples processed so far.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.inside_count + self.outside_count
    }

    /// Current π estimate, `None` before the first sample.
    #[must_use]
    pub fn estimate(&self) -> Option<f64> {
        let total = self.total();
        (total > 0).then(|| 4.0 * self.inside_count as f64 / total as f64)
    }
}

/// Running π estimates, one per sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EstimateSeries(Vec<f64>);

/// Running signed errors `π − estimate`, aligned with [`EstimateSeries`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorSeries(Vec<f64>);

impl EstimateSeries {
    /// Values in iteration order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Consume into the underlying vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl ErrorSeries {
    /// Values in iteration order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Consume into the underlying vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl Deref for EstimateSeries {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl Deref for ErrorSeries {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

/// Everything a run produced: both series, the sample stream and final counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRun {
    /// Circle radius (half-width of the square).
    pub radius: f64,
    /// Samples in draw order.
    pub samples: Vec<Sample>,
    /// Running estimates.
    pub estimates: EstimateSeries,
    /// Running errors.
    pub errors: ErrorSeries,
    /// Final counters.
    pub state: RunningState,
}

impl EstimateRun {
    /// Number of samples in the run.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the run holds no samples. Never true for a run produced by
    /// [`Estimator`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Estimate after the last sample.
    #[must_use]
    pub fn final_estimate(&self) -> Option<f64> {
        self.estimates.last().copied()
    }

    /// Error after the last sample.
    #[must_use]
    pub fn final_error(&self) -> Option<f64> {
        self.errors.last().copied()
    }

    /// Split into the two series.
    #[must_use]
    pub fn into_series(self) -> (EstimateSeries, ErrorSeries) {
        (self.estimates, self.errors)
    }
}

/// Monte Carlo π estimator for a fixed sample count and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimator {
    samples: u64,
    radius: f64,
}

impl Estimator {
    /// Create an estimator.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArgument`] if `samples` is zero, if
    /// `radius` is not a finite positive number, or if its square is not a
    /// normal `f64` (roughly outside `1.5e-154 ..= 1.3e154`).
    pub fn new(samples: u64, radius: f64) -> SimResult<Self> {
        if samples == 0 {
            return Err(SimError::invalid_argument(
                "samples",
                "must be at least 1",
            ));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SimError::invalid_argument(
                "radius",
                format!("must be a finite positive number, got {radius}"),
            ));
        }
        if !Self::supports_radius(radius) {
            return Err(SimError::invalid_argument(
                "radius",
                format!("radius squared must be a normal f64, got {radius}"),
            ));
        }
        Ok(Self { samples, radius })
    }

    /// Whether `radius` can be classified against: finite, positive, and with
    /// a square that neither overflows nor underflows.
    #[must_use]
    pub fn supports_radius(radius: f64) -> bool {
        radius.is_finite() && radius > 0.0 && (radius * radius).is_normal()
    }

    /// Number of samples per run.
    #[must_use]
    pub const fn samples(&self) -> u64 {
        self.samples
    }

    /// Circle radius.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Run without observers.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArgument`] if the source rejects the radius.
    pub fn run<S>(&self, source: &mut S) -> SimResult<EstimateRun>
    where
        S: PointSource + ?Sized,
    {
        self.run_observed(source, &mut [])
    }

    /// Run, notifying every observer after each sample is counted.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArgument`] if the source rejects the radius.
    /// Nothing is sampled in that case.
    pub fn run_observed<S>(
        &self,
        source: &mut S,
        observers: &mut [&mut dyn SampleObserver],
    ) -> SimResult<EstimateRun>
    where
        S: PointSource + ?Sized,
    {
        source.check_radius(self.radius)?;
        info!(samples = self.samples, radius = self.radius, "starting estimate");

        let capacity = usize::try_from(self.samples.min(MAX_PREALLOCATED)).unwrap_or(0);
        let mut samples = Vec::with_capacity(capacity);
        let mut estimates = Vec::with_capacity(capacity);
        let mut errors = Vec::with_capacity(capacity);
        let mut state = RunningState::default();

        for index in 0..self.samples {
            let (x, y) = source.next_point(self.radius);
            let sample = Sample::classify(x, y, self.radius);
            state.record(sample.inside);

            let estimate = 4.0 * state.inside_count as f64 / state.total() as f64;
            estimates.push(estimate);
            errors.push(PI - estimate);

            for observer in observers.iter_mut() {
                observer.on_sample(index, &sample, &state);
            }
            samples.push(sample);
        }

        let run = EstimateRun {
            radius: self.radius,
            samples,
            estimates: EstimateSeries(estimates),
            errors: ErrorSeries(errors),
            state,
        };
        info!(
            inside = state.inside_count,
            outside = state.outside_count,
            estimate = run.final_estimate().unwrap_or_default(),
            "estimate complete"
        );
        Ok(run)
    }
}

/// Estimate π from `n` samples of a square of half-width `radius`.
///
/// # Errors
///
/// Returns [`SimError::InvalidArgument`] for `n == 0`, a non-positive or
/// non-finite radius, or a radius the source cannot sample from.
pub fn estimate_pi<S>(
    n: u64,
    radius: f64,
    source: &mut S,
) -> SimResult<(EstimateSeries, ErrorSeries)>
where
    S: PointSource + ?Sized,
{
    Ok(Estimator::new(n, radius)?.run(source)?.into_series())
}

//! Per-sample observers.
//!
//! Observers see every sample right after it has been counted, in iteration
//! order. They cannot influence the estimate; the estimator stays free of
//! rendering and logging side effects.

use tracing::debug;

use super::estimator::{RunningState, Sample};

/// Receives one event per sample.
pub trait SampleObserver {
    /// Called after `sample` (0-based `index`) has been added to `state`.
    fn on_sample(&mut self, index: u64, sample: &Sample, state: &RunningState);
}

impl<F> SampleObserver for F
where
    F: FnMut(u64, &Sample, &RunningState),
{
    fn on_sample(&mut self, index: u64, sample: &Sample, state: &RunningState) {
        self(index, sample, state);
    }
}

/// Emits a `debug` event with the running estimate every `interval` samples.
#[derive(Debug, Clone)]
pub struct ProgressLogger {
    interval: u64,
    events: u64,
}

impl ProgressLogger {
    /// Create a logger firing every `interval` samples (0 is treated as 1).
    #[must_use]
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            events: 0,
        }
    }

    /// Number of progress events emitted so far.
    #[must_use]
    pub const fn events(&self) -> u64 {
        self.events
    }
}

impl Default for ProgressLogger {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl SampleObserver for ProgressLogger {
    fn on_sample(&mut self, index: u64, _sample: &Sample, state: &RunningState) {
        let processed = index + 1;
        if processed % self.interval != 0 {
            return;
        }
        self.events += 1;
        if let Some(estimate) = state.estimate() {
            debug!(
                samples = processed,
                inside = state.inside_count,
                outside = state.outside_count,
                estimate,
                error = std::f64::consts::PI - estimate,
                "sampling progress"
            );
        }
    }
}

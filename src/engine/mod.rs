//! Core estimation engine.
//!
//! - Deterministic RNG (PCG seeded from a master seed)
//! - Injectable point sources
//! - The running estimator and its per-sample observers

pub mod estimator;
pub mod observer;
pub mod rng;
pub mod source;

pub use estimator::{
    estimate_pi, ErrorSeries, EstimateRun, EstimateSeries, Estimator, RunningState, Sample,
};
pub use observer::{ProgressLogger, SampleObserver};
pub use rng::SimRng;
pub use source::{PointSource, SamplingMode, UniformSquare};

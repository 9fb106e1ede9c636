//! # pisim
//!
//! Monte Carlo estimation of π.
//!
//! Random points are drawn in the square `[-r, r)²`; the share landing inside
//! the inscribed circle approaches `π/4`. After every sample the running
//! estimate `4 · inside / total` and its error `π - estimate` are recorded.
//!
//! - Seeded, reproducible sampling (PCG64)
//! - Scene rendering of the classified samples
//! - Convergence charts of the estimate and the error
//! - CSV / JSON Lines export
//!
//! ## Example
//!
//! ```rust
//! use pisim::prelude::*;
//!
//! let mut source = UniformSquare::new(42, SamplingMode::Integer);
//! let run = Estimator::new(1000, 100.0)?.run(&mut source)?;
//!
//! assert_eq!(run.estimates.len(), 1000);
//! assert_eq!(run.errors.len(), 1000);
//! # Ok::<(), SimError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod renderers;
pub mod runner;
pub mod visualization;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{PiConfig, PiConfigBuilder};
    pub use crate::engine::{
        estimate_pi, ErrorSeries, EstimateRun, EstimateSeries, Estimator, PointSource,
        SampleObserver, SamplingMode, SimRng, UniformSquare,
    };
    pub use crate::error::{SimError, SimResult};
    pub use crate::renderers::{SampleRenderer, SceneRecorder, SvgSurface};
    pub use crate::runner::{PiRunner, RunReport};
    pub use crate::visualization::{ConvergencePlotter, ExportFormat, Exporter};
}

/// Re-export for public API
pub use error::{SimError, SimResult};

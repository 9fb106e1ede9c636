//! Point sources for the estimator.
//!
//! The estimator never touches a process-wide RNG: every run is handed an
//! explicit [`PointSource`]. The production source is [`UniformSquare`], a
//! seeded uniform sampler over the bounding square. Tests can pass any
//! `FnMut(f64) -> (f64, f64)` closure to script exact coordinates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::rng::SimRng;
use crate::error::{SimError, SimResult};

/// Largest radius accepted in integer mode. Coordinates stay exactly
/// representable as `f64` and their squares stay finite.
pub const MAX_INTEGER_RADIUS: f64 = 9_007_199_254_740_992.0; // 2^53

/// Supplies sample coordinates inside the square `[-radius, radius)²`.
pub trait PointSource {
    /// Draw the next `(x, y)` pair for a square of half-width `radius`.
    fn next_point(&mut self, radius: f64) -> (f64, f64);

    /// Reject radii this source cannot sample from.
    ///
    /// Called once by the estimator before the first draw.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArgument`] if the radius is unsupported.
    fn check_radius(&self, _radius: f64) -> SimResult<()> {
        Ok(())
    }
}

impl<F> PointSource for F
where
    F: FnMut(f64) -> (f64, f64),
{
    fn next_point(&mut self, radius: f64) -> (f64, f64) {
        self(radius)
    }
}

/// Coordinate domain for uniform sampling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SamplingMode {
    /// Integer grid points in `[-r, r)`, i.e. `-r ..= r - 1`.
    #[default]
    Integer,
    /// Real coordinates in `[-r, r)`.
    Continuous,
}

impl SamplingMode {
    /// Name used in configuration files and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Continuous => "continuous",
        }
    }
}

impl fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SamplingMode {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "integer" | "int" => Ok(Self::Integer),
            "continuous" | "real" => Ok(Self::Continuous),
            other => Err(SimError::invalid_argument(
                "mode",
                format!("expected 'integer' or 'continuous', got '{other}'"),
            )),
        }
    }
}

/// Seeded uniform sampler over the bounding square.
#[derive(Debug, Clone)]
pub struct UniformSquare {
    rng: SimRng,
    mode: SamplingMode,
}

impl UniformSquare {
    /// Create a sampler from a master seed.
    #[must_use]
    pub fn new(seed: u64, mode: SamplingMode) -> Self {
        Self::from_rng(SimRng::new(seed), mode)
    }

    /// Create a sampler around an existing RNG.
    #[must_use]
    pub const fn from_rng(rng: SimRng, mode: SamplingMode) -> Self {
        Self { rng, mode }
    }

    /// Sampling mode.
    #[must_use]
    pub const fn mode(&self) -> SamplingMode {
        self.mode
    }

    /// Underlying RNG.
    #[must_use]
    pub const fn rng(&self) -> &SimRng {
        &self.rng
    }

    fn draw(&mut self, radius: f64) -> f64 {
        match self.mode {
            SamplingMode::Integer => {
                let r = radius as i64;
                self.rng.gen_range_i64(-r, r) as f64
            }
            SamplingMode::Continuous => self.rng.gen_range_f64(-radius, radius),
        }
    }
}

impl PointSource for UniformSquare {
    fn next_point(&mut self, radius: f64) -> (f64, f64) {
        let x = self.draw(radius);
        let y = self.draw(radius);
        (x, y)
    }

    fn check_radius(&self, radius: f64) -> SimResult<()> {
        if self.mode == SamplingMode::Integer {
            if radius.fract() != 0.0 {
                return Err(SimError::invalid_argument(
                    "radius",
                    format!("integer sampling needs a whole-number radius, got {radius}"),
                ));
            }
            if radius > MAX_INTEGER_RADIUS {
                return Err(SimError::invalid_argument(
                    "radius",
                    format!("integer sampling supports radii up to 2^53, got {radius}"),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_points_on_grid_and_in_square() {
        let mut source = UniformSquare::new(42, SamplingMode::Integer);
        for _ in 0..5000 {
            let (x, y) = source.next_point(100.0);
            assert_eq!(x.fract(), 0.0);
            assert_eq!(y.fract(), 0.0);
            assert!((-100.0..100.0).contains(&x), "x out of range: {x}");
            assert!((-100.0..100.0).contains(&y), "y out of range: {y}");
        }
    }

    #[test]
    fn test_continuous_points_in_square() {
        let mut source = UniformSquare::new(42, SamplingMode::Continuous);
        let mut fractional = 0;
        for _ in 0..5000 {
            let (x, y) = source.next_point(2.5);
            assert!((-2.5..2.5).contains(&x));
            assert!((-2.5..2.5).contains(&y));
            if x.fract() != 0.0 {
                fractional += 1;
            }
        }
        assert!(fractional > 4900);
    }

    #[test]
    fn test_two_draws_per_point() {
        let mut source = UniformSquare::new(3, SamplingMode::Integer);
        let _ = source.next_point(10.0);
        let _ = source.next_point(10.0);
        assert_eq!(source.rng().draws(), 4);
    }

    #[test]
    fn test_same_seed_same_points() {
        let mut a = UniformSquare::new(11, SamplingMode::Integer);
        let mut b = UniformSquare::new(11, SamplingMode::Integer);
        for _ in 0..100 {
            assert_eq!(a.next_point(100.0), b.next_point(100.0));
        }
    }

    #[test]
    fn test_integer_mode_rejects_fractional_radius() {
        let source = UniformSquare::new(0, SamplingMode::Integer);
        let err = source.check_radius(10.5).unwrap_err();
        assert!(matches!(err, SimError::InvalidArgument { .. }));
        assert!(source.check_radius(10.0).is_ok());
    }

    #[test]
    fn test_integer_mode_rejects_huge_radius() {
        let source = UniformSquare::new(0, SamplingMode::Integer);
        assert!(source.check_radius(1.0e300).is_err());
    }

    #[test]
    fn test_continuous_mode_accepts_fractional_radius() {
        let source = UniformSquare::new(0, SamplingMode::Continuous);
        assert!(source.check_radius(0.25).is_ok());
    }

    #[test]
    fn test_closure_source() {
        let mut calls = 0;
        let mut source = |r: f64| {
            calls += 1;
            (r, -r)
        };
        assert_eq!(source.next_point(4.0), (4.0, -4.0));
        assert!(PointSource::check_radius(&source, 0.1).is_ok());
        drop(source);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_mode_parse_and_display() {
        assert_eq!("integer".parse::<SamplingMode>().unwrap(), SamplingMode::Integer);
        assert_eq!("real".parse::<SamplingMode>().unwrap(), SamplingMode::Continuous);
        assert!("hexagonal".parse::<SamplingMode>().is_err());
        assert_eq!(SamplingMode::Continuous.to_string(), "continuous");
    }

    #[test]
    fn test_mode_yaml_names() {
        let mode: SamplingMode = serde_yaml::from_str("continuous").unwrap();
        assert_eq!(mode, SamplingMode::Continuous);
        assert_eq!(SamplingMode::default(), SamplingMode::Integer);
    }
}

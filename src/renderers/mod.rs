//! Sample scene rendering.
//!
//! Renderers are surface-agnostic: [`SampleRenderer`] issues draw calls to any
//! [`DrawingSurface`], whether it records them in memory or writes an image.
//!
//! # Architecture
//!
//! ```text
//! EstimateRun / live samples
//!       ↓
//! ┌─────────────────────┐
//! │   SampleRenderer    │
//! └─────────────────────┘
//!       ↓           ↓
//! SceneRecorder  SvgSurface
//! ```

pub mod svg;

use serde::{Deserialize, Serialize};

use crate::engine::{EstimateRun, RunningState, Sample, SampleObserver};
use crate::error::{SimError, SimResult};

pub use svg::SvgSurface;

/// Classification of a drawn point, selecting its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointClass {
    /// Inside (or on) the circle.
    Inside,
    /// Outside the circle.
    Outside,
}

impl From<bool> for PointClass {
    fn from(inside: bool) -> Self {
        if inside {
            Self::Inside
        } else {
            Self::Outside
        }
    }
}

/// A single draw call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Axis-aligned square centered at the origin.
    Square {
        /// Half the side length.
        half_width: f64,
    },
    /// Circle centered at the origin.
    Circle {
        /// Radius.
        radius: f64,
    },
    /// A sample point.
    Point {
        /// X coordinate.
        x: f64,
        /// Y coordinate.
        y: f64,
        /// Classification.
        class: PointClass,
    },
}

/// Something that can draw the sampling scene.
pub trait DrawingSurface {
    /// Draw the square of side `2 * half_width` centered at the origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot draw.
    fn draw_square(&mut self, half_width: f64) -> SimResult<()>;

    /// Draw the circle of `radius` centered at the origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot draw.
    fn draw_circle(&mut self, radius: f64) -> SimResult<()>;

    /// Draw one sample point.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot draw.
    fn draw_point(&mut self, x: f64, y: f64, class: PointClass) -> SimResult<()>;

    /// Flush the scene to its destination.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn finish(&mut self) -> SimResult<()>;
}

/// In-memory surface recording every draw call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneRecorder {
    commands: Vec<DrawCommand>,
    finished: bool,
}

impl SceneRecorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands in draw order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Whether `finish` has been called.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of points of the given class.
    #[must_use]
    pub fn count_points(&self, class: PointClass) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Point { class: c, .. } if *c == class))
            .count()
    }

    /// Largest absolute coordinate any command reaches.
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.commands
            .iter()
            .map(|cmd| match *cmd {
                DrawCommand::Square { half_width } => half_width,
                DrawCommand::Circle { radius } => radius,
                DrawCommand::Point { x, y, .. } => x.abs().max(y.abs()),
            })
            .fold(0.0, f64::max)
    }
}

impl DrawingSurface for SceneRecorder {
    fn draw_square(&mut self, half_width: f64) -> SimResult<()> {
        self.commands.push(DrawCommand::Square { half_width });
        Ok(())
    }

    fn draw_circle(&mut self, radius: f64) -> SimResult<()> {
        self.commands.push(DrawCommand::Circle { radius });
        Ok(())
    }

    fn draw_point(&mut self, x: f64, y: f64, class: PointClass) -> SimResult<()> {
        self.commands.push(DrawCommand::Point { x, y, class });
        Ok(())
    }

    fn finish(&mut self) -> SimResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Draws the square, the inscribed circle and the classified samples.
///
/// Works as a second pass over a finished run ([`SampleRenderer::render`]) or
/// live, registered as a [`SampleObserver`] after [`SampleRenderer::draw_outline`].
/// A draw failure during live rendering is kept and reported by
/// [`SampleRenderer::finish`]; later samples are skipped.
#[derive(Debug)]
pub struct SampleRenderer<S: DrawingSurface> {
    surface: S,
    points_drawn: u64,
    failure: Option<SimError>,
}

impl<S: DrawingSurface> SampleRenderer<S> {
    /// Wrap a surface.
    pub const fn new(surface: S) -> Self {
        Self {
            surface,
            points_drawn: 0,
            failure: None,
        }
    }

    /// Points drawn so far.
    #[must_use]
    pub const fn points_drawn(&self) -> u64 {
        self.points_drawn
    }

    /// Draw the square of side `2 * radius` and the inscribed circle.
    ///
    /// # Errors
    ///
    /// Returns the surface error.
    pub fn draw_outline(&mut self, radius: f64) -> SimResult<()> {
        self.surface.draw_square(radius)?;
        self.surface.draw_circle(radius)
    }

    /// Draw one sample in its class color.
    ///
    /// # Errors
    ///
    /// Returns the surface error.
    pub fn draw_sample(&mut self, sample: &Sample) -> SimResult<()> {
        self.surface
            .draw_point(sample.x, sample.y, PointClass::from(sample.inside))?;
        self.points_drawn += 1;
        Ok(())
    }

    /// Render a finished run and flush the surface.
    ///
    /// # Errors
    ///
    /// Returns the first surface error. The run is not modified.
    pub fn render(mut self, run: &EstimateRun) -> SimResult<S> {
        self.draw_outline(run.radius)?;
        for sample in &run.samples {
            self.draw_sample(sample)?;
        }
        self.finish()
    }

    /// Flush the surface, reporting any failure kept from live rendering.
    ///
    /// # Errors
    ///
    /// Returns the kept failure or the surface's flush error.
    pub fn finish(mut self) -> SimResult<S> {
        if let Some(err) = self.failure.take() {
            return Err(err);
        }
        self.surface.finish()?;
        Ok(self.surface)
    }
}

impl<S: DrawingSurface> SampleObserver for SampleRenderer<S> {
    fn on_sample(&mut self, _index: u64, sample: &Sample, _state: &RunningState) {
        if self.failure.is_some() {
            return;
        }
        if let Err(err) = self.draw_sample(sample) {
            self.failure = Some(err);
        }
    }
}

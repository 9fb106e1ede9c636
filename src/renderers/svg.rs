//! SVG drawing surface backed by plotters.
//!
//! Draw calls are buffered and the whole scene is written in [`finish`], so a
//! failing disk never interrupts sampling.
//!
//! [`finish`]: DrawingSurface::finish

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::info;

use super::{DrawCommand, DrawingSurface, PointClass, SceneRecorder};
use crate::error::{SimError, SimResult};

/// Segments used to approximate the circle outline.
const CIRCLE_SEGMENTS: usize = 360;

/// Marker radius of a sample point, in pixels.
const POINT_SIZE: u32 = 2;

fn render_error<E: std::fmt::Display>(e: E) -> SimError {
    SimError::render(e.to_string())
}

const fn point_color(class: PointClass) -> RGBColor {
    match class {
        PointClass::Inside => RED,
        PointClass::Outside => BLACK,
    }
}

/// Closed polyline of a circle of `radius` around the origin.
fn circle_outline(radius: f64) -> Vec<(f64, f64)> {
    (0..=CIRCLE_SEGMENTS)
        .map(|i| {
            let theta = std::f64::consts::TAU * i as f64 / CIRCLE_SEGMENTS as f64;
            (radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

/// Closed polyline of the square `[-h, h]²`.
fn square_outline(h: f64) -> Vec<(f64, f64)> {
    vec![(-h, -h), (h, -h), (h, h), (-h, h), (-h, -h)]
}

/// Surface writing the scene to an SVG file.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    path: PathBuf,
    side: u32,
    scene: SceneRecorder,
}

impl SvgSurface {
    /// Create a surface writing to `path`. The image is square, using the
    /// smaller side of `size`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, size: (u32, u32)) -> Self {
        Self {
            path: path.into(),
            side: size.0.min(size.1),
            scene: SceneRecorder::new(),
        }
    }

    /// Destination file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Buffered draw calls.
    #[must_use]
    pub const fn scene(&self) -> &SceneRecorder {
        &self.scene
    }

    fn write_scene(&self) -> SimResult<()> {
        let extent = match self.scene.extent() {
            e if e > 0.0 => e * 1.05,
            _ => 1.0,
        };

        let root = SVGBackend::new(&self.path, (self.side, self.side)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .build_cartesian_2d(-extent..extent, -extent..extent)
            .map_err(render_error)?;

        let outlines = self.scene.commands().iter().filter_map(|cmd| match *cmd {
            DrawCommand::Square { half_width } => Some(square_outline(half_width)),
            DrawCommand::Circle { radius } => Some(circle_outline(radius)),
            DrawCommand::Point { .. } => None,
        });
        chart
            .draw_series(outlines.map(|path| PathElement::new(path, BLACK.stroke_width(1))))
            .map_err(render_error)?;

        let points = self.scene.commands().iter().filter_map(|cmd| match *cmd {
            DrawCommand::Point { x, y, class } => {
                Some(Circle::new((x, y), POINT_SIZE, point_color(class).filled()))
            }
            _ => None,
        });
        chart.draw_series(points).map_err(render_error)?;

        root.present().map_err(render_error)?;
        Ok(())
    }
}

impl DrawingSurface for SvgSurface {
    fn draw_square(&mut self, half_width: f64) -> SimResult<()> {
        self.scene.draw_square(half_width)
    }

    fn draw_circle(&mut self, radius: f64) -> SimResult<()> {
        self.scene.draw_circle(radius)
    }

    fn draw_point(&mut self, x: f64, y: f64, class: PointClass) -> SimResult<()> {
        self.scene.draw_point(x, y, class)
    }

    fn finish(&mut self) -> SimResult<()> {
        self.write_scene()?;
        self.scene.finish()?;
        info!(
            path = %self.path.display(),
            points = self.scene.count_points(PointClass::Inside)
                + self.scene.count_points(PointClass::Outside),
            "scene saved"
        );
        Ok(())
    }
}

//! Per-frame scene description and its plotters rendition.
//!
//! A [`FrameScene`] is a plain snapshot of what one frame shows: one fading
//! trail per body plus the shared axis bounds. Painting is behind the
//! [`FramePainter`] trait; [`PlottersPainter`] draws a 3D chart into an RGB
//! buffer and writes it out as PNG.

use crate::camera::ViewAngle;
use crate::config::{MovieConfig, MAX_FRAME_DIMENSION};
use crate::error::{MovieError, MovieResult};
use crate::loader::Snapshot;
use crate::window::TrajectoryWindow;
use glam::DVec3;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

pub const TITLE: &str = "Black Hole Trajectories";
const TRAIL_COLOR: RGBColor = BLUE;
const MARKER_COLOR: RGBColor = BLACK;
const FALLBACK_AXIS_LIMIT: f64 = 1.0;

/// Symmetric axis extent shared by all three axes of every frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderBounds {
    max_range: f64,
}

impl RenderBounds {
    /// Twice the largest distance from the origin found in `snapshot`.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            max_range: 2.0 * snapshot.max_position_norm(),
        }
    }

    pub fn max_range(&self) -> f64 {
        self.max_range
    }

    /// Half of `max_range`; a unit limit when every body sits at the origin.
    pub fn axis_limit(&self) -> f64 {
        let limit = self.max_range / 2.0;
        if limit > 0.0 && limit.is_finite() {
            limit
        } else {
            FALLBACK_AXIS_LIMIT
        }
    }

    pub fn axis_range(&self) -> Range<f64> {
        let limit = self.axis_limit();
        -limit..limit
    }
}

/// Opacity of segment `segment` (0 = oldest) in a tail of `tail_length` points.
///
/// Rises linearly from 0 on the oldest segment to 1 on the newest. A two
/// point tail has a single segment, drawn fully opaque.
pub fn segment_opacity(segment: usize, tail_length: usize) -> f64 {
    if tail_length <= 2 {
        return 1.0;
    }
    (segment as f64 / (tail_length - 2) as f64).clamp(0.0, 1.0)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrailSegment {
    pub from: DVec3,
    pub to: DVec3,
    pub opacity: f64,
}

/// One body's recent positions, oldest first.
#[derive(Clone, Debug, PartialEq)]
pub struct Trail {
    pub points: Vec<DVec3>,
}

impl Trail {
    pub fn head(&self) -> Option<DVec3> {
        self.points.last().copied()
    }

    pub fn segments(&self) -> impl Iterator<Item = TrailSegment> + '_ {
        let tail_length = self.points.len();
        self.points
            .windows(2)
            .enumerate()
            .map(move |(t, pair)| TrailSegment {
                from: pair[0],
                to: pair[1],
                opacity: segment_opacity(t, tail_length),
            })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameScene {
    pub index: usize,
    pub bounds: RenderBounds,
    pub trails: Vec<Trail>,
}

impl FrameScene {
    pub fn capture(index: usize, window: &TrajectoryWindow, bounds: RenderBounds) -> Self {
        let trails = (0..window.num_bodies())
            .map(|body| Trail {
                points: window.trail(body).collect(),
            })
            .collect();

        Self {
            index,
            bounds,
            trails,
        }
    }
}

/// Turns a scene into an image file at `path`.
pub trait FramePainter {
    fn paint(&self, scene: &FrameScene, path: &Path) -> MovieResult<()>;
}

pub struct PlottersPainter {
    width: u32,
    height: u32,
    view: ViewAngle,
}

impl PlottersPainter {
    pub fn new(width: u32, height: u32, view: ViewAngle) -> Self {
        Self {
            width,
            height,
            view,
        }
    }

    pub fn from_config(config: &MovieConfig) -> Self {
        Self::new(config.frame_width, config.frame_height, config.view)
    }

    fn draw(&self, scene: &FrameScene, buffer: &mut [u8]) -> MovieResult<()> {
        let font_size = f64::from(self.height) / 32.0;
        let marker_radius = (self.height / 120).max(2) as i32;
        let stroke = (self.height / 720).max(1);

        let root = BitMapBackend::with_buffer(buffer, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let range = scene.bounds.axis_range();
        let mut chart = ChartBuilder::on(&root)
            .margin((self.height / 40) as i32)
            .caption(TITLE, ("sans-serif", font_size * 1.4))
            .build_cartesian_3d(range.clone(), range.clone(), range)
            .map_err(render_error)?;

        chart.with_projection(|mut pb| {
            pb.pitch = self.view.pitch();
            pb.yaw = self.view.yaw();
            pb.scale = self.view.scale();
            pb.into_matrix()
        });

        chart
            .configure_axes()
            .label_style(("sans-serif", font_size * 0.7))
            .draw()
            .map_err(render_error)?;

        let limit = scene.bounds.axis_limit();
        let label_offset = limit * 1.15;
        chart
            .draw_series(
                [
                    ("X", (label_offset, -limit, -limit)),
                    ("Y", (-limit, -limit, label_offset)),
                    ("Z", (-limit, label_offset, -limit)),
                ]
                .into_iter()
                .map(|(label, at)| Text::new(label, at, ("sans-serif", font_size))),
            )
            .map_err(render_error)?;

        for trail in &scene.trails {
            for segment in trail.segments() {
                chart
                    .draw_series(LineSeries::new(
                        [chart_coord(segment.from), chart_coord(segment.to)],
                        TRAIL_COLOR.mix(segment.opacity).stroke_width(stroke),
                    ))
                    .map_err(render_error)?;
            }

            if let Some(head) = trail.head() {
                chart
                    .draw_series(std::iter::once(Circle::new(
                        chart_coord(head),
                        marker_radius,
                        MARKER_COLOR.filled(),
                    )))
                    .map_err(render_error)?;
            }
        }

        root.present().map_err(render_error)?;
        Ok(())
    }
}

impl FramePainter for PlottersPainter {
    fn paint(&self, scene: &FrameScene, path: &Path) -> MovieResult<()> {
        let mut buffer = vec![0u8; frame_buffer_len(self.width, self.height)?];
        self.draw(scene, &mut buffer)?;
        save_png(path, &buffer, self.width, self.height)
    }
}

/// Bytes of an RGB buffer for a `width` x `height` frame.
fn frame_buffer_len(width: u32, height: u32) -> MovieResult<usize> {
    if width > MAX_FRAME_DIMENSION || height > MAX_FRAME_DIMENSION {
        return Err(MovieError::Render(format!(
            "frame size {}x{} exceeds {} pixels per side",
            width, height, MAX_FRAME_DIMENSION
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(3))
        .ok_or_else(|| MovieError::Render(format!("frame size {}x{} overflows", width, height)))
}

// plotters is y-up, the simulation is z-up
fn chart_coord(p: DVec3) -> (f64, f64, f64) {
    (p.x, p.z, p.y)
}

fn render_error<E: std::fmt::Display>(e: E) -> MovieError {
    MovieError::Render(e.to_string())
}

fn save_png(path: &Path, rgb_data: &[u8], width: u32, height: u32) -> MovieResult<()> {
    image::save_buffer(path, rgb_data, width, height, image::ColorType::Rgb8)
        .map_err(render_error)
}

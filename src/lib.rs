pub mod body;
pub mod camera;
pub mod config;
pub mod error;
pub mod loader;
pub mod scene;
pub mod video;
pub mod window;

use config::MovieConfig;
use error::{MovieError, MovieResult};
use scene::{FrameScene, FramePainter, PlottersPainter, RenderBounds};
use std::path::PathBuf;
use video::{FfmpegEncoder, VideoEncoder};
use window::TrajectoryWindow;

const PROGRESS_INTERVAL: usize = 50;

/// Outcome of the frame rendering pass.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRun {
    pub frame_count: usize,
    pub num_bodies: usize,
    pub bounds: RenderBounds,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MovieSummary {
    pub frame_count: usize,
    pub num_bodies: usize,
    pub max_range: f64,
    pub duration_seconds: f64,
    pub video_path: PathBuf,
}

/// Renders one frame per snapshot, then compiles the frames into a movie.
pub struct MovieRenderer<P = PlottersPainter, E = FfmpegEncoder> {
    config: MovieConfig,
    painter: P,
    encoder: E,
}

impl MovieRenderer {
    pub fn new(config: MovieConfig) -> Self {
        let painter = PlottersPainter::from_config(&config);
        Self {
            config,
            painter,
            encoder: FfmpegEncoder::new(),
        }
    }
}

impl<P: FramePainter, E: VideoEncoder> MovieRenderer<P, E> {
    pub fn with_backends(config: MovieConfig, painter: P, encoder: E) -> Self {
        Self {
            config,
            painter,
            encoder,
        }
    }

    pub fn painter(&self) -> &P {
        &self.painter
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    pub fn run(&self) -> MovieResult<MovieSummary> {
        let frames = self.render_frames()?;
        self.recompile_movie()?;

        Ok(MovieSummary {
            frame_count: frames.frame_count,
            num_bodies: frames.num_bodies,
            max_range: frames.bounds.max_range(),
            duration_seconds: frames.frame_count as f64 / f64::from(self.config.framerate),
            video_path: self.config.video_path(),
        })
    }

    pub fn render_frames(&self) -> MovieResult<FrameRun> {
        self.config.validate()?;

        let loader = self.config.snapshot_loader();
        let last_index = loader.find_last_index()?;
        let frame_count = last_index + 1;

        let last = loader.load(last_index)?;
        let bounds = RenderBounds::from_snapshot(&last);
        let num_bodies = last.len();

        log::info!(
            "Rendering {} frames of {} bodies (tail length {}, axis limit ±{:.4})",
            frame_count,
            num_bodies,
            self.config.tail_length,
            bounds.axis_limit()
        );

        let initial = loader.load(0)?;
        if initial.len() != num_bodies {
            return Err(MovieError::BodyCountMismatch {
                index: 0,
                expected: num_bodies,
                found: initial.len(),
            });
        }
        let mut window = TrajectoryWindow::new(&initial, self.config.tail_length)?;

        std::fs::create_dir_all(self.config.frame_dir())?;

        for index in 0..frame_count {
            let snapshot = loader.load(index)?;
            window.advance(&snapshot)?;

            let scene = FrameScene::capture(index, &window, bounds);
            self.painter.paint(&scene, &self.config.frame_path(index))?;

            if (index + 1) % PROGRESS_INTERVAL == 0 {
                log::info!("Rendered frame {} of {}", index + 1, frame_count);
            }
        }

        self.remove_stale_frames(frame_count)?;

        Ok(FrameRun {
            frame_count,
            num_bodies,
            bounds,
        })
    }

    pub fn recompile_movie(&self) -> MovieResult<()> {
        video::recompile_movie(
            &self.encoder,
            &self.config.frame_dir(),
            &self.config.frame_pattern(),
            self.config.framerate,
            &self.config.video_path(),
        )
    }

    /// Frames past the end of this run, left over from a longer earlier one.
    fn remove_stale_frames(&self, first_stale: usize) -> MovieResult<()> {
        let mut removed = 0;
        loop {
            let path = self.config.frame_path(first_stale + removed);
            if !path.exists() {
                break;
            }
            std::fs::remove_file(&path)?;
            removed += 1;
        }

        if removed > 0 {
            log::info!("Removed {} stale frames", removed);
        }
        Ok(())
    }
}

/// Renders every snapshot under `config.base_dir` and compiles the movie.
pub fn render_trajectory_movie(config: MovieConfig) -> MovieResult<MovieSummary> {
    MovieRenderer::new(config).run()
}

//! Command-line entry point.
//!
//! Renders every `data/data_batch{i}` snapshot under the base directory into
//! `movie_dump/trajectories_{i}.png`, then compiles `trajectories.mkv` with
//! ffmpeg. Set `RUST_LOG=debug` for per-step output.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use trajectory_movie::{
    camera::{ViewAngle, DEFAULT_AZIMUTH_DEGREES, DEFAULT_ELEVATION_DEGREES, DEFAULT_SCALE},
    config::{
        MovieConfig, DEFAULT_FRAMERATE, DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH,
        DEFAULT_TAIL_LENGTH,
    },
    loader::SnapshotFormat,
    render_trajectory_movie,
};

#[derive(Parser, Debug)]
#[command(name = "trajectory_movie")]
#[command(about = "Renders N-body trajectory snapshots into a 3D movie with fading tails")]
struct Args {
    /// Directory holding `data/`; frames and the movie are written here too
    #[arg(long, default_value = ".")]
    base_dir: PathBuf,

    /// Number of trailing positions drawn behind each body (at least 2)
    #[arg(long, default_value_t = DEFAULT_TAIL_LENGTH)]
    tail_length: usize,

    /// Frames per second of the compiled movie
    #[arg(long, default_value_t = DEFAULT_FRAMERATE)]
    framerate: u32,

    /// Frame width in pixels
    #[arg(long, default_value_t = DEFAULT_FRAME_WIDTH)]
    width: u32,

    /// Frame height in pixels
    #[arg(long, default_value_t = DEFAULT_FRAME_HEIGHT)]
    height: u32,

    /// Encoding of the snapshot files
    #[arg(long, value_enum, default_value_t = SnapshotFormat::Json)]
    format: SnapshotFormat,

    /// Camera elevation in degrees
    #[arg(long, default_value_t = DEFAULT_ELEVATION_DEGREES, allow_negative_numbers = true)]
    elevation: f64,

    /// Camera azimuth in degrees
    #[arg(long, default_value_t = DEFAULT_AZIMUTH_DEGREES, allow_negative_numbers = true)]
    azimuth: f64,

    /// Chart zoom factor
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    zoom: f64,
}

impl Args {
    fn into_config(self) -> MovieConfig {
        MovieConfig::new(self.base_dir)
            .with_tail_length(self.tail_length)
            .with_framerate(self.framerate)
            .with_frame_size(self.width, self.height)
            .with_format(self.format)
            .with_view(ViewAngle::new(self.elevation, self.azimuth).with_scale(self.zoom))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Args::parse().into_config();
    let base_dir = config.base_dir.clone();

    let summary = render_trajectory_movie(config)
        .with_context(|| format!("failed to render trajectory movie in {}", base_dir.display()))?;

    log::info!(
        "Wrote {} frames of {} bodies ({:.1} s) to {}",
        summary.frame_count,
        summary.num_bodies,
        summary.duration_seconds,
        summary.video_path.display()
    );
    Ok(())
}

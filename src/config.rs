//! Per-run configuration.
//!
//! Every path the renderer touches is derived from one base directory:
//!
//! ```text
//! {base_dir}/data/data_batch{i}.{json,npy}   input snapshots
//! {base_dir}/movie_dump/trajectories_{i}.png frames
//! {base_dir}/trajectories.mkv                compiled movie
//! ```

use crate::camera::ViewAngle;
use crate::error::{MovieError, MovieResult};
use crate::loader::{SnapshotFormat, SnapshotLoader};
use crate::window::MIN_TAIL_LENGTH;
use std::path::PathBuf;

pub const DEFAULT_TAIL_LENGTH: usize = 10;
pub const DEFAULT_FRAMERATE: u32 = 12;
// 6.4 x 4.8 inches at 300 dpi
pub const DEFAULT_FRAME_WIDTH: u32 = 1920;
pub const DEFAULT_FRAME_HEIGHT: u32 = 1440;
/// Largest accepted frame width or height, in pixels.
pub const MAX_FRAME_DIMENSION: u32 = 16_384;

const DATA_DIR: &str = "data";
const FRAME_DIR: &str = "movie_dump";
const FRAME_PREFIX: &str = "trajectories_";
const VIDEO_FILE: &str = "trajectories.mkv";

#[derive(Clone, Debug)]
pub struct MovieConfig {
    pub base_dir: PathBuf,
    pub tail_length: usize,
    pub framerate: u32,
    pub frame_width: u32,
    pub frame_height: u32,
    pub format: SnapshotFormat,
    pub view: ViewAngle,
}

impl MovieConfig {
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_tail_length(mut self, tail_length: usize) -> Self {
        self.tail_length = tail_length;
        self
    }

    pub fn with_framerate(mut self, framerate: u32) -> Self {
        self.framerate = framerate;
        self
    }

    pub fn with_frame_size(mut self, width: u32, height: u32) -> Self {
        self.frame_width = width;
        self.frame_height = height;
        self
    }

    pub fn with_format(mut self, format: SnapshotFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_view(mut self, view: ViewAngle) -> Self {
        self.view = view;
        self
    }

    pub fn validate(&self) -> MovieResult<()> {
        if self.tail_length < MIN_TAIL_LENGTH {
            return Err(MovieError::InvalidTailLength(self.tail_length));
        }
        if self.framerate == 0 {
            return Err(MovieError::InvalidConfig("framerate must be positive".into()));
        }
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(MovieError::InvalidConfig(format!(
                "frame size {}x{} has no pixels",
                self.frame_width, self.frame_height
            )));
        }
        if self.frame_width > MAX_FRAME_DIMENSION || self.frame_height > MAX_FRAME_DIMENSION {
            return Err(MovieError::InvalidConfig(format!(
                "frame size {}x{} exceeds {} pixels per side",
                self.frame_width, self.frame_height, MAX_FRAME_DIMENSION
            )));
        }
        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join(DATA_DIR)
    }

    pub fn frame_dir(&self) -> PathBuf {
        self.base_dir.join(FRAME_DIR)
    }

    pub fn video_path(&self) -> PathBuf {
        self.base_dir.join(VIDEO_FILE)
    }

    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.frame_dir().join(format!("{}{}.png", FRAME_PREFIX, index))
    }

    /// printf-style pattern the encoder expands to find frames in order.
    pub fn frame_pattern(&self) -> String {
        format!("{}%01d.png", FRAME_PREFIX)
    }

    pub fn snapshot_loader(&self) -> SnapshotLoader {
        SnapshotLoader::new(self.data_dir(), self.format)
    }
}

impl Default for MovieConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            tail_length: DEFAULT_TAIL_LENGTH,
            framerate: DEFAULT_FRAMERATE,
            frame_width: DEFAULT_FRAME_WIDTH,
            frame_height: DEFAULT_FRAME_HEIGHT,
            format: SnapshotFormat::default(),
            view: ViewAngle::default(),
        }
    }
}

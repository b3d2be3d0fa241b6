//! Movie compilation from rendered frames.
//!
//! Frames are encoded by an external program behind the [`VideoEncoder`]
//! trait. The default [`FfmpegEncoder`] needs `ffmpeg` on the PATH.
//!
//! # Process
//! 1. Remove the movie left by a previous run, if any
//! 2. Hand the frame directory and filename pattern to the encoder
//! 3. Surface the encoder's failure instead of leaving a silent gap

use crate::error::{MovieError, MovieResult};
use std::path::Path;
use std::process::Command;

const FFMPEG_PROGRAM: &str = "ffmpeg";

pub trait VideoEncoder {
    /// Encodes `frame_dir/pattern` (printf-style frame index) at `framerate`
    /// frames per second into `output_path`.
    fn encode(
        &self,
        frame_dir: &Path,
        pattern: &str,
        framerate: u32,
        output_path: &Path,
    ) -> MovieResult<()>;
}

pub struct FfmpegEncoder {
    program: String,
    start_number: usize,
}

impl FfmpegEncoder {
    pub fn new() -> Self {
        Self::with_program(FFMPEG_PROGRAM)
    }

    pub fn with_program<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
            start_number: 0,
        }
    }

    pub fn command(
        &self,
        frame_dir: &Path,
        pattern: &str,
        framerate: u32,
        output_path: &Path,
    ) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("-y")
            .arg("-framerate")
            .arg(framerate.to_string())
            .arg("-start_number")
            .arg(self.start_number.to_string())
            .arg("-i")
            .arg(frame_dir.join(pattern))
            .arg("-q:v")
            .arg("0")
            .arg(output_path);
        command
    }
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoEncoder for FfmpegEncoder {
    fn encode(
        &self,
        frame_dir: &Path,
        pattern: &str,
        framerate: u32,
        output_path: &Path,
    ) -> MovieResult<()> {
        log::info!(
            "Encoding {} at {} fps into {}",
            frame_dir.join(pattern).display(),
            framerate,
            output_path.display()
        );

        let output = self
            .command(frame_dir, pattern, framerate, output_path)
            .output()
            .map_err(|source| MovieError::EncoderUnavailable {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            log::error!(
                "{} failed:\n{}",
                self.program,
                String::from_utf8_lossy(&output.stderr)
            );
            return Err(MovieError::EncoderFailed {
                status: output.status,
            });
        }

        Ok(())
    }
}

/// Deletes any existing movie at `output_path`, then encodes a fresh one.
///
/// The old file is gone even if encoding fails afterwards.
pub fn recompile_movie<E: VideoEncoder + ?Sized>(
    encoder: &E,
    frame_dir: &Path,
    pattern: &str,
    framerate: u32,
    output_path: &Path,
) -> MovieResult<()> {
    if output_path.exists() {
        log::debug!("Removing previous movie {}", output_path.display());
        std::fs::remove_file(output_path)?;
    }

    encoder.encode(frame_dir, pattern, framerate, output_path)?;

    log::info!("Movie saved to: {}", output_path.display());
    Ok(())
}

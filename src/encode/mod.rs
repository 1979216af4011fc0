//! Still-image video encoding.
//!
//! An [`Encoder`] turns one audio file plus one still image into an MP4. Progress flows one way
//! into a [`ProgressSink`]; completion is the `Result` returned by [`Encoder::encode`].

use std::path::PathBuf;

use crate::foundation::error::{StillframeError, StillframeResult};

/// System `ffmpeg` subprocess encoder.
pub mod ffmpeg;
/// Progress notifications and `-progress` output parsing.
pub mod progress;
/// Codec and rate settings.
pub mod profile;

pub use ffmpeg::FfmpegEncoder;
pub use profile::EncodeProfile;
pub use progress::{EncodeProgress, NoProgress, ProgressParser, ProgressSink};

/// One audio file to encode against one still image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeJob {
    /// Input audio.
    pub audio: PathBuf,
    /// Input still image (the single video frame).
    pub image: PathBuf,
    /// Output MP4.
    pub output: PathBuf,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl EncodeJob {
    /// Check the job before any process is spawned.
    pub fn validate(&self) -> StillframeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(StillframeError::validation(
                "encode width/height must be non-zero",
            ));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(StillframeError::validation(format!(
                "encode size {}x{} must be even (required for yuv420p mp4 output)",
                self.width, self.height
            )));
        }
        for (what, path) in [("audio", &self.audio), ("image", &self.image)] {
            if !path.is_file() {
                return Err(StillframeError::validation(format!(
                    "{what} input '{}' does not exist",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

/// Encodes a still-image video. Returns only after the output is complete.
pub trait Encoder {
    /// Run `job`, reporting progress into `progress`.
    fn encode(&mut self, job: &EncodeJob, progress: &mut dyn ProgressSink) -> StillframeResult<()>;
}

#[cfg(test)]
#[path = "../../tests/unit/encode/job.rs"]
mod tests;

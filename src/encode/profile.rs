use serde::{Deserialize, Serialize};

use crate::foundation::error::{StillframeError, StillframeResult};

/// Encoder settings for the still-image MP4.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EncodeProfile {
    /// `-c:v`.
    pub video_codec: String,
    /// `-pix_fmt`.
    pub pixel_format: String,
    /// `-crf`.
    pub crf: u8,
    /// `-preset`.
    pub preset: String,
    /// Output frame rate, `-r`.
    pub frame_rate: u32,
    /// `-b:v`.
    pub video_bitrate: String,
    /// `-x264-params`; omitted when `None`.
    pub x264_params: Option<String>,
    /// Flags for the `scale` filter.
    pub scale_flags: String,
    /// `-c:a`.
    pub audio_codec: String,
}

impl Default for EncodeProfile {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_owned(),
            pixel_format: "yuv420p".to_owned(),
            crf: 24,
            preset: "veryslow".to_owned(),
            frame_rate: 6,
            video_bitrate: "6M".to_owned(),
            x264_params: Some("keyint=infinite:scenecut=60".to_owned()),
            scale_flags: "lanczos".to_owned(),
            audio_codec: "aac".to_owned(),
        }
    }
}

impl EncodeProfile {
    /// Reject settings `ffmpeg` would choke on before anything is spawned.
    pub fn validate(&self) -> StillframeResult<()> {
        if self.frame_rate == 0 {
            return Err(StillframeError::validation("encode.frameRate must be non-zero"));
        }
        if self.crf > 51 {
            return Err(StillframeError::validation("encode.crf must be in 0..=51"));
        }
        for (name, v) in [
            ("videoCodec", &self.video_codec),
            ("pixelFormat", &self.pixel_format),
            ("preset", &self.preset),
            ("videoBitrate", &self.video_bitrate),
            ("scaleFlags", &self.scale_flags),
            ("audioCodec", &self.audio_codec),
        ] {
            if v.trim().is_empty() {
                return Err(StillframeError::validation(format!(
                    "encode.{name} must not be empty"
                )));
            }
        }
        Ok(())
    }

    /// `scale=W:H:flags=...` for the given output size.
    pub fn scale_filter(&self, width: u32, height: u32) -> String {
        format!("scale={width}:{height}:flags={}", self.scale_flags)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/profile.rs"]
mod tests;

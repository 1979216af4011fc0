//! JSON configuration.
//!
//! Loaded once at startup and passed by reference. A missing file is created with the defaults.
//! Relative paths resolve against the directory holding the configuration file.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assets::color::FillColor;
use crate::encode::{EncodeProfile, FfmpegEncoder};
use crate::expression::PositionExpr;
use crate::foundation::error::{StillframeError, StillframeResult};
use crate::render::WatermarkStyle;
use crate::text::WrapUnit;

/// Batch configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Input audio directory.
    pub audio_dir: PathBuf,
    /// Output MP4 directory.
    pub video_dir: PathBuf,
    /// Output composite image directory.
    pub image_dir: PathBuf,
    /// Background image.
    pub image_file: PathBuf,
    /// Extension, and thereby format, of the composite images.
    pub image_extension: String,
    /// Watermark font file.
    pub watermark_font_path: PathBuf,
    /// Watermark font size in pixels.
    pub watermark_font_size: f32,
    /// Line height in pixels; `None` means `1.2 * watermark_font_size`.
    pub watermark_line_height: Option<f32>,
    /// Horizontal center of the watermark lines.
    pub watermark_x: PositionExpr,
    /// Top of the watermark block.
    pub watermark_y: PositionExpr,
    /// Wrap width in pixels; `None` means the background width.
    pub watermark_max_width: Option<f32>,
    /// Unit the watermark wraps on.
    pub wrap_unit: WrapUnit,
    /// Watermark color.
    pub fill_style: FillColor,
    /// `ffmpeg` executable; a bare name is looked up on `PATH`.
    pub ffmpeg_path: PathBuf,
    /// Encoder settings.
    pub encode: EncodeProfile,

    #[serde(skip)]
    base_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            audio_dir: PathBuf::from("audio"),
            video_dir: PathBuf::from("video"),
            image_dir: PathBuf::from("images"),
            image_file: PathBuf::from("image.jpg"),
            image_extension: "jpg".to_owned(),
            watermark_font_path: PathBuf::from("font.ttf"),
            watermark_font_size: 190.0,
            watermark_line_height: None,
            watermark_x: PositionExpr::center_x(),
            watermark_y: PositionExpr::centered_block_top(),
            watermark_max_width: None,
            wrap_unit: WrapUnit::Grapheme,
            fill_style: FillColor::white(),
            ffmpeg_path: PathBuf::from("ffmpeg"),
            encode: EncodeProfile::default(),
            base_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Default configuration file name.
    pub const FILE_NAME: &'static str = "config.json";

    /// Load `path`, first writing the defaults there if it does not exist.
    pub fn load_or_create(path: &Path) -> StillframeResult<Self> {
        if !path.exists() {
            Self::default().write(path)?;
            tracing::info!(path = %path.display(), "created default config");
        }
        Self::from_path(path)
    }

    /// Load and validate `path`.
    pub fn from_path(path: &Path) -> StillframeResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| StillframeError::io(path, e))?;
        let mut cfg: Self = serde_json::from_slice(&bytes).map_err(|e| {
            StillframeError::config(format!("failed to parse '{}': {e}", path.display()))
        })?;
        cfg.base_dir = base_dir_of(path);
        cfg.validate()?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    /// Write this configuration as pretty-printed JSON.
    pub fn write(&self, path: &Path) -> StillframeResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StillframeError::io(parent, e))?;
        }
        let mut json = serde_json::to_string_pretty(self)
            .map_err(|e| StillframeError::config(format!("failed to serialize config: {e}")))?;
        json.push('\n');
        std::fs::write(path, json).map_err(|e| StillframeError::io(path, e))
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> StillframeResult<()> {
        if !self.watermark_font_size.is_finite() || self.watermark_font_size <= 0.0 {
            return Err(StillframeError::config(
                "watermarkFontSize must be finite and > 0",
            ));
        }
        if let Some(lh) = self.watermark_line_height
            && (!lh.is_finite() || lh <= 0.0)
        {
            return Err(StillframeError::config(
                "watermarkLineHeight must be finite and > 0",
            ));
        }
        if let Some(mw) = self.watermark_max_width
            && (!mw.is_finite() || mw < 0.0)
        {
            return Err(StillframeError::config(
                "watermarkMaxWidth must be finite and >= 0",
            ));
        }
        if image::ImageFormat::from_extension(&self.image_extension).is_none() {
            return Err(StillframeError::config(format!(
                "imageExtension '{}' is not a known image format",
                self.image_extension
            )));
        }
        self.encode
            .validate()
            .map_err(|e| StillframeError::config(e.to_string()))
    }

    /// Directory relative paths resolve against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve `path` against [`Config::base_dir`] unless it is absolute.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Resolved input audio directory.
    pub fn audio_dir(&self) -> PathBuf {
        self.resolve(&self.audio_dir)
    }

    /// Resolved output video directory.
    pub fn video_dir(&self) -> PathBuf {
        self.resolve(&self.video_dir)
    }

    /// Resolved output image directory.
    pub fn image_dir(&self) -> PathBuf {
        self.resolve(&self.image_dir)
    }

    /// Resolved background image.
    pub fn background_path(&self) -> PathBuf {
        self.resolve(&self.image_file)
    }

    /// Resolved watermark font.
    pub fn font_path(&self) -> PathBuf {
        self.resolve(&self.watermark_font_path)
    }

    /// Output video for the audio file with base name `stem`.
    pub fn video_path(&self, stem: &str) -> PathBuf {
        self.video_dir().join(format!("{stem}.mp4"))
    }

    /// Output composite image for the audio file with base name `stem`.
    pub fn image_path(&self, stem: &str) -> PathBuf {
        self.image_dir().join(format!("{stem}.{}", self.image_extension))
    }

    /// `ffmpeg` executable: bare names stay as-is for `PATH` lookup, anything else is resolved.
    pub fn ffmpeg_program(&self) -> PathBuf {
        let mut comps = self.ffmpeg_path.components();
        match (comps.next(), comps.next()) {
            (Some(Component::Normal(_)), None) => self.ffmpeg_path.clone(),
            _ => self.resolve(&self.ffmpeg_path),
        }
    }

    /// Watermark styling with resolved paths.
    pub fn watermark_style(&self) -> WatermarkStyle {
        WatermarkStyle {
            font_path: self.font_path(),
            font_size: self.watermark_font_size,
            line_height: self.watermark_line_height,
            x: self.watermark_x.clone(),
            y: self.watermark_y.clone(),
            max_width: self.watermark_max_width,
            unit: self.wrap_unit,
            fill: self.fill_style,
        }
    }

    /// Encoder configured from this file.
    pub fn encoder(&self) -> FfmpegEncoder {
        FfmpegEncoder::new(self.ffmpeg_program(), self.encode.clone())
    }
}

fn base_dir_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;

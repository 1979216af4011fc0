//! Stillframe turns a folder of audio files into still-image MP4 videos.
//!
//! For every audio file the base name is wrapped to the background width, rendered as a
//! watermark over a shared background image, saved as a composite still, and encoded together
//! with the audio by the system `ffmpeg`:
//!
//! - Load a [`Config`] (created with defaults when missing)
//! - Build a [`WatermarkComposer`] and an [`FfmpegEncoder`] from it
//! - Drive both with [`run_batch`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Background decoding and color parsing.
pub mod assets;
/// Sequential batch processing.
pub mod batch;
/// JSON configuration.
pub mod config;
/// Still-image video encoding.
pub mod encode;
/// Timestamped fatal-error log.
pub mod errlog;
/// Watermark position expressions.
pub mod expression;
/// Frame composition.
pub mod render;
/// Text shaping, wrapping and placement.
pub mod text;

pub use crate::foundation::error::{StillframeError, StillframeResult};

pub use crate::assets::color::FillColor;
pub use crate::batch::{BatchOutput, BatchReport, list_audio_files, run_batch};
pub use crate::config::Config;
pub use crate::encode::{
    EncodeJob, EncodeProfile, EncodeProgress, Encoder, FfmpegEncoder, NoProgress, ProgressSink,
};
pub use crate::errlog::ErrorLog;
pub use crate::expression::{ExprError, LayoutVars, PositionExpr};
pub use crate::render::{Frame, FrameComposer, WatermarkComposer, WatermarkStyle};
pub use crate::text::{Line, Measure, TextLayoutEngine, WrapUnit, wrap};

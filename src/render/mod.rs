//! Frame composition: watermark layout, glyph rasterization and compositing.

/// The composer seam and its background + watermark implementation.
pub mod composer;
/// Premultiplied RGBA8 pixel operations.
pub mod composite;
/// Composed frames and image output.
pub mod frame;
/// Watermark styling, layout and rasterization.
pub mod watermark;

pub use composer::{FrameComposer, WatermarkComposer};
pub use frame::Frame;
pub use watermark::{WatermarkLayout, WatermarkStyle, layout_watermark, render_watermark};

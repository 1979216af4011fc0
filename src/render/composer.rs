use std::path::Path;

use crate::assets::decode::{Background, load_background};
use crate::foundation::error::StillframeResult;
use crate::render::composite::over_in_place;
use crate::render::frame::Frame;
use crate::render::watermark::{WatermarkStyle, layout_watermark, render_watermark};
use crate::text::engine::TextLayoutEngine;

/// Produces the still frame for one output, given its watermark text.
pub trait FrameComposer {
    /// Compose the frame carrying `text`.
    fn compose(&mut self, text: &str) -> StillframeResult<Frame>;
}

/// Background image plus rendered watermark text.
pub struct WatermarkComposer {
    background: Background,
    engine: TextLayoutEngine,
    style: WatermarkStyle,
}

impl WatermarkComposer {
    /// Build from an already decoded background and a loaded font.
    pub fn new(background: Background, engine: TextLayoutEngine, style: WatermarkStyle) -> Self {
        Self {
            background,
            engine,
            style,
        }
    }

    /// Decode the background at `background_path` and load the style's font.
    #[tracing::instrument(skip(style), fields(font = %style.font_path.display()))]
    pub fn load(background_path: &Path, style: WatermarkStyle) -> StillframeResult<Self> {
        let background = load_background(background_path)?;
        let engine = TextLayoutEngine::from_path(&style.font_path, style.font_size)?;
        tracing::debug!(
            width = background.width,
            height = background.height,
            family = engine.family_name(),
            "composer ready"
        );
        Ok(Self::new(background, engine, style))
    }

    /// Background dimensions, which are also the output frame size.
    pub fn size(&self) -> (u32, u32) {
        (self.background.width, self.background.height)
    }
}

impl FrameComposer for WatermarkComposer {
    fn compose(&mut self, text: &str) -> StillframeResult<Frame> {
        let (width, height) = self.size();
        let layout = layout_watermark(text, &self.style, &mut self.engine, width, height)?;
        tracing::debug!(lines = layout.lines.len(), x = layout.x, "watermark laid out");

        let layer = render_watermark(&mut self.engine, &layout, width, height, self.style.fill)?;
        let mut data = self.background.rgba8_premul.clone();
        over_in_place(&mut data, &layer, 1.0)?;

        Ok(Frame {
            width,
            height,
            data,
        })
    }
}

use std::path::Path;

use crate::foundation::error::{StillframeError, StillframeResult};
use crate::text::wrap::Measure;

/// RGBA8 brush color carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<[u8; 4]> for TextBrushRgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

/// Shapes text in one registered font at one size.
///
/// Used both as the wrapper's [`Measure`] and to produce the glyph layouts that the watermark
/// renderer rasterizes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font_bytes: Vec<u8>,
    size_px: f32,
}

impl TextLayoutEngine {
    /// Register `font_bytes` and prepare to lay out text at `size_px`.
    pub fn new(font_bytes: Vec<u8>, size_px: f32) -> StillframeResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(StillframeError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            StillframeError::validation("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| StillframeError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font_bytes,
            size_px,
        })
    }

    /// Read a font file from disk. See [`TextLayoutEngine::new`].
    pub fn from_path(path: &Path, size_px: f32) -> StillframeResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| StillframeError::io(path, e))?;
        Self::new(bytes, size_px).map_err(|e| {
            StillframeError::validation(format!("font '{}': {e}", path.display()))
        })
    }

    /// Family name resolved from the registered font.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Font size in pixels.
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Raw bytes of the registered font.
    pub fn font_bytes(&self) -> &[u8] {
        &self.font_bytes
    }

    /// Shape `text` as a single unbroken line.
    pub fn layout_line(
        &mut self,
        text: &str,
        brush: TextBrushRgba8,
    ) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Advance width of `text` laid out on one line, trailing whitespace included.
    pub fn line_width(&mut self, text: &str) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        self.layout_line(text, TextBrushRgba8::default()).full_width()
    }
}

impl Measure for TextLayoutEngine {
    fn measure(&mut self, text: &str) -> f32 {
        self.line_width(text)
    }
}

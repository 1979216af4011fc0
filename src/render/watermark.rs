//! Watermark layout and rasterization.
//!
//! Layout is pure: it only needs a [`Measure`], so it can be exercised without a font. Rendering
//! shapes each laid-out line with Parley and fills the glyphs with `vello_cpu` into a transparent
//! premultiplied canvas the size of the background.

use std::path::PathBuf;

use crate::assets::color::FillColor;
use crate::expression::{LayoutVars, PositionExpr};
use crate::foundation::error::{StillframeError, StillframeResult};
use crate::text::engine::{TextBrushRgba8, TextLayoutEngine};
use crate::text::place::line_tops_from;
use crate::text::wrap::{Line, Measure, WrapUnit, widest, wrap_units};

/// Everything that decides how the watermark looks.
#[derive(Clone, Debug, PartialEq)]
pub struct WatermarkStyle {
    /// Font file used for shaping and rasterization.
    pub font_path: PathBuf,
    /// Font size in pixels.
    pub font_size: f32,
    /// Explicit line height; `None` means `1.2 * font_size`.
    pub line_height: Option<f32>,
    /// Horizontal center of every line.
    pub x: PositionExpr,
    /// Top of the text block.
    pub y: PositionExpr,
    /// Wrap width; `None` means the canvas width.
    pub max_width: Option<f32>,
    /// Unit the wrapper breaks on.
    pub unit: WrapUnit,
    /// Glyph fill.
    pub fill: FillColor,
}

impl WatermarkStyle {
    /// Effective line height in pixels.
    pub fn line_height(&self) -> f32 {
        self.line_height.unwrap_or(self.font_size * 1.2)
    }
}

/// Wrapped lines and where they go.
#[derive(Clone, Debug, PartialEq)]
pub struct WatermarkLayout {
    /// Wrapped lines, top to bottom.
    pub lines: Vec<Line>,
    /// Horizontal center shared by every line.
    pub x: f32,
    /// Top edge of each line.
    pub tops: Vec<f32>,
    /// Distance between consecutive line tops.
    pub line_height: f32,
}

impl WatermarkLayout {
    /// Left edge of line `i`.
    pub fn line_left(&self, i: usize) -> f32 {
        self.lines
            .get(i)
            .map_or(self.x, |line| self.x - line.width / 2.0)
    }
}

/// Wrap `text` and resolve the position expressions for a `width` x `height` canvas.
pub fn layout_watermark(
    text: &str,
    style: &WatermarkStyle,
    measure: &mut impl Measure,
    width: u32,
    height: u32,
) -> StillframeResult<WatermarkLayout> {
    if text.is_empty() {
        return Err(StillframeError::validation("watermark text must not be empty"));
    }

    let max_width = style.max_width.unwrap_or(width as f32);
    let lines = wrap_units(&style.unit.split(text), measure, max_width);
    let line_height = style.line_height();
    let n = lines.len();

    let vars = LayoutVars {
        w: f64::from(width),
        h: f64::from(height),
        tw: f64::from(widest(&lines)),
        th: f64::from(line_height) * n as f64,
        lh: f64::from(line_height),
        n: n as f64,
        fs: f64::from(style.font_size),
    };
    let x = style
        .x
        .eval(&vars)
        .map_err(|e| StillframeError::config(format!("watermarkX: {e}")))?;
    let y = style
        .y
        .eval(&vars)
        .map_err(|e| StillframeError::config(format!("watermarkY: {e}")))?;

    Ok(WatermarkLayout {
        tops: line_tops_from(y as f32, n, line_height),
        lines,
        x: x as f32,
        line_height,
    })
}

/// Rasterize `layout` into a transparent premultiplied RGBA8 canvas of `width` x `height`.
pub fn render_watermark(
    engine: &mut TextLayoutEngine,
    layout: &WatermarkLayout,
    width: u32,
    height: u32,
    fill: FillColor,
) -> StillframeResult<Vec<u8>> {
    let (w, h) = canvas_size(width, height)?;
    let brush = TextBrushRgba8::from(fill.to_rgba8());
    let font = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(engine.font_bytes().to_vec()),
        0,
    );

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    for (i, line) in layout.lines.iter().enumerate() {
        let Some(&top) = layout.tops.get(i) else {
            break;
        };
        let shaped = engine.layout_line(&line.text, brush);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(layout.line_left(i)),
            f64::from(top),
        )));

        for pline in shaped.lines() {
            for item in pline.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let b = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(b.r, b.g, b.b, b.a));

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap.data_as_u8_slice().to_vec())
}

fn canvas_size(width: u32, height: u32) -> StillframeResult<(u16, u16)> {
    if width == 0 || height == 0 {
        return Err(StillframeError::render("canvas width/height must be non-zero"));
    }
    let w = u16::try_from(width)
        .map_err(|_| StillframeError::render(format!("canvas width {width} exceeds u16")))?;
    let h = u16::try_from(height)
        .map_err(|_| StillframeError::render(format!("canvas height {height} exceeds u16")))?;
    Ok((w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/render/watermark.rs"]
mod tests;

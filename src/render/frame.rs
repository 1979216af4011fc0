use std::path::Path;

use anyhow::Context as _;
use image::ImageFormat;

use crate::foundation::error::{StillframeError, StillframeResult};
use crate::render::composite::{flatten_premul_to_rgb8, unpremultiply_rgba8};

/// A composed still frame: background with the watermark on top, premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` premultiplied bytes.
    pub data: Vec<u8>,
}

impl Frame {
    /// Write the frame to `path`, picking the format from the extension.
    ///
    /// Formats without alpha (JPEG) are flattened over black first.
    pub fn save(&self, path: &Path) -> StillframeResult<()> {
        let format = ImageFormat::from_path(path).map_err(|e| {
            StillframeError::render(format!("unsupported image path '{}': {e}", path.display()))
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StillframeError::io(parent, e))?;
        }

        let saved = if format == ImageFormat::Jpeg {
            let rgb = flatten_premul_to_rgb8(&self.data, [0, 0, 0])?;
            let img = image::RgbImage::from_raw(self.width, self.height, rgb)
                .ok_or_else(|| StillframeError::render("frame buffer does not match its size"))?;
            img.save_with_format(path, format)
        } else {
            let img =
                image::RgbaImage::from_raw(self.width, self.height, unpremultiply_rgba8(&self.data))
                    .ok_or_else(|| {
                        StillframeError::render("frame buffer does not match its size")
                    })?;
            img.save_with_format(path, format)
        };

        saved.with_context(|| format!("failed to write image '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;

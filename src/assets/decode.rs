use std::path::Path;

use crate::foundation::error::{StillframeError, StillframeResult};
use crate::foundation::math::mul_div255_u8;

/// Decoded background image in premultiplied RGBA8.
#[derive(Clone, Debug)]
pub struct Background {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Vec<u8>,
}

/// Read and decode the background image at `path`.
///
/// Fails with a render error naming the path when the file cannot be read or decoded.
pub fn load_background(path: &Path) -> StillframeResult<Background> {
    let bytes = std::fs::read(path).map_err(|e| StillframeError::io(path, e))?;
    decode_background(&bytes).map_err(|e| {
        StillframeError::render(format!(
            "failed to decode background image '{}': {e}",
            path.display()
        ))
    })
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_background(bytes: &[u8]) -> Result<Background, image::ImageError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(Background {
        width,
        height,
        rgba8_premul,
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 255 {
            continue;
        }
        px[0] = mul_div255_u8(u16::from(px[0]), a);
        px[1] = mul_div255_u8(u16::from(px[1]), a);
        px[2] = mul_div255_u8(u16::from(px[2]), a);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;

//! Source-over compositing and alpha flattening on premultiplied RGBA8 buffers.

use crate::foundation::error::{StillframeError, StillframeResult};
use crate::foundation::math::{mul_div255_u8, mul_div255_u16, unpremul_u8};

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over of `src` onto `dst`, with `src` scaled by `opacity`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Composite `src` over `dst` pixel by pixel. Buffers must be equal-length RGBA8.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> StillframeResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(StillframeError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Flatten premultiplied RGBA8 over an opaque `bg_rgb`, producing packed RGB8.
pub fn flatten_premul_to_rgb8(src_premul: &[u8], bg_rgb: [u8; 3]) -> StillframeResult<Vec<u8>> {
    if !src_premul.len().is_multiple_of(4) {
        return Err(StillframeError::render(
            "flatten_premul_to_rgb8 expects an rgba8 buffer",
        ));
    }

    let mut out = Vec::with_capacity(src_premul.len() / 4 * 3);
    for s in src_premul.chunks_exact(4) {
        let a = u16::from(s[3]);
        if a == 255 {
            out.extend_from_slice(&s[..3]);
            continue;
        }
        let inv = 255u16 - a;
        for i in 0..3 {
            let v = u16::from(s[i]) + mul_div255_u16(u16::from(bg_rgb[i]), inv);
            out.push(v.min(255) as u8);
        }
    }
    Ok(out)
}

/// Convert premultiplied RGBA8 to straight RGBA8.
pub fn unpremultiply_rgba8(src_premul: &[u8]) -> Vec<u8> {
    let mut out = src_premul.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = px[3];
        if a == 255 {
            continue;
        }
        px[0] = unpremul_u8(px[0], a);
        px[1] = unpremul_u8(px[1], a);
        px[2] = unpremul_u8(px[2], a);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;

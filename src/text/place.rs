//! Vertical placement of a wrapped block.

/// Top of a block of `n` lines of height `line_height` centered on `center_y`.
pub fn block_top(n: usize, line_height: f32, center_y: f32) -> f32 {
    center_y - line_height * n as f32 / 2.0
}

/// Top of each line when the block starts at `top`.
pub fn line_tops_from(top: f32, n: usize, line_height: f32) -> Vec<f32> {
    (0..n).map(|i| top + i as f32 * line_height).collect()
}

/// Top of each of `n` lines in a block centered vertically on `center_y`.
pub fn line_tops(n: usize, line_height: f32, center_y: f32) -> Vec<f32> {
    line_tops_from(block_top(n, line_height, center_y), n, line_height)
}

#[cfg(test)]
#[path = "../../tests/unit/text/place.rs"]
mod tests;

/// Watermark fill colors.
pub mod color;
/// Background image decoding.
pub mod decode;

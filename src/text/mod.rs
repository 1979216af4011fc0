//! Text measurement, wrapping and placement for the watermark.

/// Parley-backed shaping and width measurement.
pub mod engine;
/// Vertical placement of wrapped lines.
pub mod place;
/// Greedy line breaking.
pub mod wrap;

pub use engine::{TextBrushRgba8, TextLayoutEngine};
pub use wrap::{Line, Measure, WrapUnit, wrap, wrap_units};

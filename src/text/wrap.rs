//! Greedy line breaking within a fixed pixel width.
//!
//! The wrapper never looks ahead and never backtracks: units are appended to the current line for
//! as long as the measured candidate stays strictly below `max_width`. A unit that is wider than
//! the budget on its own still gets a line of its own; units are never split.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Atomic display unit used when breaking text into lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapUnit {
    /// Extended grapheme clusters (`"e\u{301}"` and emoji sequences stay whole).
    #[default]
    Grapheme,
    /// One unit per Unicode scalar value.
    Char,
}

impl WrapUnit {
    /// Split `text` into ordered units. Concatenating the result yields `text` again.
    pub fn split(self, text: &str) -> Vec<&str> {
        match self {
            Self::Grapheme => text.graphemes(true).collect(),
            Self::Char => text
                .char_indices()
                .map(|(i, c)| &text[i..i + c.len_utf8()])
                .collect(),
        }
    }
}

/// Width measurement for a run of text, in pixels.
///
/// Implementations should return a non-negative width that does not shrink as units are appended;
/// the wrapper does not enforce this, it only relies on it for the greedy result to be meaningful.
pub trait Measure {
    /// Measure the rendered width of `text`.
    fn measure(&mut self, text: &str) -> f32;
}

impl<F> Measure for F
where
    F: FnMut(&str) -> f32,
{
    fn measure(&mut self, text: &str) -> f32 {
        self(text)
    }
}

/// One output line and the width it measured when it was closed.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    /// Line contents.
    pub text: String,
    /// Measured width of `text` in pixels.
    pub width: f32,
}

/// Break `text` into lines whose measured width stays below `max_width`.
///
/// Returns no lines for empty input.
pub fn wrap(text: &str, unit: WrapUnit, mut measure: impl Measure, max_width: f32) -> Vec<Line> {
    wrap_units(&unit.split(text), &mut measure, max_width)
}

/// Break a pre-split unit sequence into lines. See [`wrap`].
pub fn wrap_units(units: &[&str], measure: &mut impl Measure, max_width: f32) -> Vec<Line> {
    let Some((first, rest)) = units.split_first() else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    let mut current = (*first).to_owned();
    let mut current_width = measure.measure(&current);

    for &unit in rest {
        let mut candidate = String::with_capacity(current.len() + unit.len());
        candidate.push_str(&current);
        candidate.push_str(unit);
        let candidate_width = measure.measure(&candidate);

        if candidate_width < max_width && !unit.is_empty() {
            current = candidate;
            current_width = candidate_width;
        } else {
            lines.push(Line {
                text: std::mem::replace(&mut current, unit.to_owned()),
                width: current_width,
            });
            current_width = measure.measure(&current);
        }
    }

    lines.push(Line {
        text: current,
        width: current_width,
    });
    lines
}

/// Width of the widest line, or `0.0` when there are none.
pub fn widest(lines: &[Line]) -> f32 {
    lines.iter().map(|l| l.width).fold(0.0, f32::max)
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;

//! Arithmetic position expressions such as `(h-th)/2`.
//!
//! Expressions are parsed once when the configuration is loaded and evaluated per watermark
//! against the layout variables of that watermark.

pub(crate) mod ast;
pub(crate) mod error;
pub(crate) mod eval;
pub(crate) mod lexer;
pub(crate) mod parser;

pub use error::ExprError;
pub use eval::{LayoutVars, PositionExpr};

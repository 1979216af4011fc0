use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::expression::ast::{BinaryOp, Expr};
use crate::expression::error::ExprError;
use crate::expression::parser::parse_expr;

/// Layout variables visible to position expressions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutVars {
    /// Canvas width (`w`).
    pub w: f64,
    /// Canvas height (`h`).
    pub h: f64,
    /// Widest wrapped line (`tw`).
    pub tw: f64,
    /// Text block height, `n * lh` (`th`).
    pub th: f64,
    /// Line height (`lh`).
    pub lh: f64,
    /// Number of wrapped lines (`n`).
    pub n: f64,
    /// Font size (`fs`).
    pub fs: f64,
}

impl LayoutVars {
    fn get(&self, name: &str) -> Option<f64> {
        Some(match name {
            "w" => self.w,
            "h" => self.h,
            "tw" => self.tw,
            "th" => self.th,
            "lh" => self.lh,
            "n" => self.n,
            "fs" => self.fs,
            _ => return None,
        })
    }
}

/// A watermark coordinate: either a fixed pixel value or an expression over [`LayoutVars`].
///
/// Serialized as a JSON number or string.
#[derive(Clone)]
pub struct PositionExpr(Repr);

#[derive(Clone)]
enum Repr {
    Fixed(f64),
    Expr { source: String, ast: Arc<Expr> },
}

impl PositionExpr {
    /// A fixed coordinate in pixels.
    pub fn fixed(v: f64) -> Self {
        Self(Repr::Fixed(v))
    }

    /// Parse `source` into a position expression.
    pub fn parse(source: &str) -> Result<Self, ExprError> {
        let ast = parse_expr(source)?;
        if let Expr::Num(v) = ast {
            return Ok(Self::fixed(v));
        }
        Ok(Self(Repr::Expr {
            source: source.to_owned(),
            ast: Arc::new(ast),
        }))
    }

    /// `w/2`: the horizontal canvas center.
    pub fn center_x() -> Self {
        let ast = Expr::Binary {
            op: BinaryOp::Div,
            left: Box::new(var("w", 0)),
            right: Box::new(Expr::Num(2.0)),
            offset: 1,
        };
        Self(Repr::Expr {
            source: "w/2".to_owned(),
            ast: Arc::new(ast),
        })
    }

    /// `(h-th)/2`: the top of a block centered vertically on the canvas.
    pub fn centered_block_top() -> Self {
        let ast = Expr::Binary {
            op: BinaryOp::Div,
            left: Box::new(Expr::Binary {
                op: BinaryOp::Sub,
                left: Box::new(var("h", 1)),
                right: Box::new(var("th", 3)),
                offset: 2,
            }),
            right: Box::new(Expr::Num(2.0)),
            offset: 6,
        };
        Self(Repr::Expr {
            source: "(h-th)/2".to_owned(),
            ast: Arc::new(ast),
        })
    }

    /// Evaluate against `vars`. The result is always finite.
    pub fn eval(&self, vars: &LayoutVars) -> Result<f64, ExprError> {
        let v = match &self.0 {
            Repr::Fixed(v) => *v,
            Repr::Expr { ast, .. } => eval_expr(ast, vars)?,
        };
        if !v.is_finite() {
            return Err(ExprError::new(0, "expression did not evaluate to a finite number"));
        }
        Ok(v)
    }
}

impl fmt::Debug for PositionExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Fixed(v) => write!(f, "Fixed({v})"),
            Repr::Expr { source, .. } => write!(f, "Expr({source:?})"),
        }
    }
}

impl PartialEq for PositionExpr {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Repr::Fixed(a), Repr::Fixed(b)) => a == b,
            (Repr::Expr { source: a, .. }, Repr::Expr { source: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Serialize for PositionExpr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match &self.0 {
            Repr::Fixed(v) => serializer.serialize_f64(*v),
            Repr::Expr { source, .. } => serializer.serialize_str(source),
        }
    }
}

impl<'de> Deserialize<'de> for PositionExpr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(f64),
            Src(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Num(v) => Ok(Self::fixed(v)),
            Raw::Src(s) => Self::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

fn var(name: &str, offset: usize) -> Expr {
    Expr::Var {
        name: name.to_owned(),
        offset,
    }
}

fn eval_expr(e: &Expr, vars: &LayoutVars) -> Result<f64, ExprError> {
    match e {
        Expr::Num(v) => Ok(*v),
        Expr::Var { name, offset } => vars
            .get(name)
            .ok_or_else(|| ExprError::new(*offset, format!("unknown variable '{name}'"))),
        Expr::Neg(inner) => Ok(-eval_expr(inner, vars)?),
        Expr::Binary {
            op,
            left,
            right,
            offset,
        } => {
            let l = eval_expr(left, vars)?;
            let r = eval_expr(right, vars)?;
            match op {
                BinaryOp::Add => Ok(l + r),
                BinaryOp::Sub => Ok(l - r),
                BinaryOp::Mul => Ok(l * r),
                BinaryOp::Div | BinaryOp::Mod if r == 0.0 => {
                    Err(ExprError::new(*offset, "division by zero"))
                }
                BinaryOp::Div => Ok(l / r),
                BinaryOp::Mod => Ok(l % r),
            }
        }
        Expr::Call { func, args, offset } => {
            let vals = args
                .iter()
                .map(|a| eval_expr(a, vars))
                .collect::<Result<Vec<_>, _>>()?;
            match (func.as_str(), vals.as_slice()) {
                ("min", [a, b]) => Ok(a.min(*b)),
                ("max", [a, b]) => Ok(a.max(*b)),
                ("clamp", [v, lo, hi]) => Ok(v.max(*lo).min(*hi)),
                ("min" | "max" | "clamp", _) => Err(ExprError::new(
                    *offset,
                    format!("wrong number of arguments to '{func}' ({})", vals.len()),
                )),
                _ => Err(ExprError::new(*offset, format!("unknown function '{func}'"))),
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/eval.rs"]
mod tests;

//! Transform list decomposition.
//!
//! A `transform` attribute is a chain of function calls applied in textual order. Each call maps
//! onto exactly one primitive of the target command set, so the chain is kept as a list rather
//! than folded into a single matrix.

use crate::diagnostics::{Diagnostics, Warning};
use crate::number::{js, split_list};
use crate::Result;
use crate::units::{Axis, Viewport, convert_length, parse_number};
use regex::Regex;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TransformOp {
    Offset { x: f64, y: f64 },
    Scale { x: f64, y: Option<f64> },
    Rotate { degrees: f64, anchor: Option<(f64, f64)> },
    Shear { x: f64, y: f64 },
    Matrix([f64; 6]),
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offset { x, y } => write!(f, "offset {},{}", js(*x), js(*y)),
            Self::Scale { x, y: None } => write!(f, "scale {}", js(*x)),
            Self::Scale { x, y: Some(y) } => write!(f, "scale {},{}", js(*x), js(*y)),
            Self::Rotate { degrees, anchor } => {
                write!(f, "rotate {}", js(*degrees))?;
                if let Some((cx, cy)) = anchor {
                    write!(f, " anchor:{},{}", js(*cx), js(*cy))?;
                }
                Ok(())
            }
            Self::Shear { x, y } => write!(f, "shear {},{}", js(*x), js(*y)),
            Self::Matrix(m) => write!(
                f,
                "matrix {},{},{},{},{},{}",
                js(m[0]),
                js(m[1]),
                js(m[2]),
                js(m[3]),
                js(m[4]),
                js(m[5])
            ),
        }
    }
}

/// Joins ops into the inline `a; b; c` form used inside `transform:[...]` options.
pub fn join_ops(ops: &[TransformOp]) -> String {
    ops.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn skew(degrees: f64) -> f64 {
    (degrees * std::f64::consts::PI / 180.0).tan()
}

fn call_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Za-z]+)\s*\(([^)]*)\)").expect("valid regex"))
}

pub fn decompose_transform(
    value: &str,
    viewport: &Viewport,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<TransformOp>> {
    let mut ops = Vec::new();
    for caps in call_regex().captures_iter(value) {
        let name = &caps[1];
        let params = split_list(&caps[2]);
        let arg = |i: usize, default: &'static str| params.get(i).copied().unwrap_or(default);
        let op = match name {
            "translate" => {
                let x = convert_length(arg(0, "0"), Axis::X, viewport, diagnostics)?;
                let y = convert_length(arg(1, "0"), Axis::Y, viewport, diagnostics)?;
                TransformOp::Offset { x, y }
            }
            "scale" => {
                let x = parse_number(arg(0, "1"))?;
                let y = params.get(1).map(|v| parse_number(v)).transpose()?;
                TransformOp::Scale { x, y }
            }
            "rotate" => {
                let degrees = parse_number(arg(0, "0"))?;
                let anchor = if params.len() > 2 {
                    let cx = convert_length(params[1], Axis::X, viewport, diagnostics)?;
                    let cy = convert_length(params[2], Axis::Y, viewport, diagnostics)?;
                    Some((cx, cy))
                } else {
                    None
                };
                TransformOp::Rotate { degrees, anchor }
            }
            "skewX" => TransformOp::Shear {
                x: skew(parse_number(arg(0, "0"))?),
                y: 0.0,
            },
            "skewY" => TransformOp::Shear {
                x: 0.0,
                y: skew(parse_number(arg(0, "0"))?),
            },
            "matrix" => {
                if params.len() != 6 {
                    diagnostics.warn(Warning::MatrixArity {
                        count: params.len(),
                    });
                    continue;
                }
                let mut m = [0.0; 6];
                for (slot, p) in m.iter_mut().zip(&params[..4]) {
                    *slot = parse_number(p)?;
                }
                m[4] = convert_length(params[4], Axis::X, viewport, diagnostics)?;
                m[5] = convert_length(params[5], Axis::Y, viewport, diagnostics)?;
                TransformOp::Matrix(m)
            }
            other => {
                diagnostics.warn(Warning::UnsupportedTransform {
                    name: other.to_string(),
                });
                continue;
            }
        };
        ops.push(op);
    }
    Ok(ops)
}

//! Length, opacity and list attribute resolution.

use crate::diagnostics::{Diagnostics, Warning};
use crate::geom::{Point, Rect, point, rect};
use crate::number::{js, parse_float_prefix, split_list};
use crate::{Error, Result};
use regex::Regex;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Size of the nearest enclosing document root; percentages resolve against it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn extent(&self, axis: Axis) -> f64 {
        let v = match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        };
        if v == 0.0 { 100.0 } else { v }
    }
}

fn length_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([+-]?(?:\d+\.?\d*|\.\d+)(?:e[+-]?\d+)?)([a-z%]*)$").expect("valid regex")
    })
}

/// Converts a length with an optional unit suffix to pixels.
///
/// An unknown suffix keeps the bare number and records a warning.
pub fn convert_length(
    value: &str,
    axis: Axis,
    viewport: &Viewport,
    diagnostics: &mut Diagnostics,
) -> Result<f64> {
    let s = value.trim().to_ascii_lowercase();
    let invalid = || Error::InvalidUnit {
        value: value.to_string(),
    };
    let caps = length_regex().captures(&s).ok_or_else(invalid)?;
    let num = caps[1].parse::<f64>().map_err(|_| invalid())?;
    let px = match &caps[2] {
        "" | "px" => num,
        "cm" => num * 96.0 / 2.54,
        "mm" => num * 96.0 / 25.4,
        "in" => num * 96.0,
        "pt" => num * 96.0 / 72.0,
        "pc" => num * 16.0,
        "%" => viewport.extent(axis) * num / 100.0,
        unit => {
            diagnostics.warn(Warning::UnsupportedUnit {
                unit: unit.to_string(),
            });
            num
        }
    };
    Ok(px)
}

/// Accepts a fraction (`0.5`) or a percentage (`50%`); anything outside `[0, 1]` is an error.
pub fn convert_opacity(value: &str) -> Result<f64> {
    let s = value.trim();
    let invalid = || Error::InvalidOpacity {
        value: value.to_string(),
    };
    let num = match s.strip_suffix('%') {
        Some(pct) => parse_float_prefix(pct).ok_or_else(invalid)? / 100.0,
        None => parse_float_prefix(s).ok_or_else(invalid)?,
    };
    if !(0.0..=1.0).contains(&num) {
        return Err(invalid());
    }
    Ok(num)
}

/// Parses a bare number argument (transform angles, miter limits, scale factors).
pub fn parse_number(value: &str) -> Result<f64> {
    parse_float_prefix(value).ok_or_else(|| Error::InvalidNumber {
        value: value.to_string(),
    })
}

/// Parses `left top width height` (comma and/or whitespace separated).
pub fn parse_rect(value: &str) -> Result<Rect> {
    let invalid = || Error::InvalidRect {
        value: value.to_string(),
    };
    let nums = split_list(value);
    if nums.len() != 4 {
        return Err(invalid());
    }
    let mut v = [0.0; 4];
    for (slot, n) in v.iter_mut().zip(&nums) {
        *slot = parse_float_prefix(n).ok_or_else(invalid)?;
    }
    Ok(rect(v[0], v[1], v[2], v[3]))
}

/// Parses a `points` list into coordinate pairs.
pub fn parse_points(
    value: &str,
    viewport: &Viewport,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<Point>> {
    let nums = split_list(value);
    if nums.len() < 2 || nums.len() % 2 != 0 {
        return Err(Error::InvalidPoints {
            value: value.to_string(),
        });
    }
    nums.chunks_exact(2)
        .map(|pair| {
            let x = convert_length(pair[0], Axis::X, viewport, diagnostics)?;
            let y = convert_length(pair[1], Axis::Y, viewport, diagnostics)?;
            Ok(point(x, y))
        })
        .collect()
}

/// A resolved `stroke-dasharray`; the target format supports at most an on/off pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Dash {
    None,
    Pattern(Vec<f64>),
}

impl fmt::Display for Dash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Pattern(values) => {
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str(&js(*v))?;
                }
                Ok(())
            }
        }
    }
}

pub fn parse_dash_array(
    value: &str,
    viewport: &Viewport,
    diagnostics: &mut Diagnostics,
) -> Result<Dash> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(Dash::None);
    }
    let parts = split_list(trimmed);
    if parts.is_empty() {
        return Ok(Dash::None);
    }
    if parts.len() > 2 {
        diagnostics.warn(Warning::TooManyDashValues {
            value: value.to_string(),
        });
    }
    let values = parts
        .iter()
        .take(2)
        .map(|p| {
            convert_length(p, Axis::X, viewport, diagnostics).map(crate::number::round6)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Dash::Pattern(values))
}

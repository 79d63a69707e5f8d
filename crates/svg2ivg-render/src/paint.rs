//! Paint resolution and the stroke/fill enumerations.

use crate::gradient::GradientSpec;
use crate::pattern::PatternSpec;
use crate::registry::Registry;
use std::fmt;
use svg2ivg_core::color::{parse_color_paint, url_reference};
use svg2ivg_core::number::is_scalar;
use svg2ivg_core::{Color, ColorPaint, Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    None,
    Color(Color),
    Gradient(GradientSpec),
    Pattern(PatternSpec),
    /// Already in target syntax: a bare luminance scalar or a `gradient:[...]` expression.
    Verbatim(String),
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Color(c) => c.fmt(f),
            Self::Gradient(g) => g.fmt(f),
            Self::Pattern(p) => p.fmt(f),
            Self::Verbatim(s) => f.write_str(s),
        }
    }
}

impl From<ColorPaint> for Paint {
    fn from(value: ColorPaint) -> Self {
        match value {
            ColorPaint::None => Self::None,
            ColorPaint::Color(c) => Self::Color(c),
        }
    }
}

/// Whether a paint value is already expressed in the target syntax.
pub fn is_verbatim_paint(value: &str) -> bool {
    let value = value.trim();
    value.starts_with("gradient:[") || is_scalar(value)
}

/// Resolves a `fill`/`stroke` value to a paint and its opacity multiplier.
///
/// References check gradients first, then patterns; an unknown id is an error.
pub fn resolve_paint(raw: &str, registry: &Registry) -> Result<(Paint, f64)> {
    let trimmed = raw.trim();
    if is_verbatim_paint(trimmed) {
        return Ok((Paint::Verbatim(trimmed.to_string()), 1.0));
    }
    if let Some(id) = url_reference(trimmed) {
        if let Some(g) = registry.gradient(id) {
            return Ok((Paint::Gradient(g.clone()), 1.0));
        }
        if let Some(p) = registry.pattern(id) {
            return Ok((Paint::Pattern(p.clone()), 1.0));
        }
        return Err(Error::UnrecognizedPaintReference {
            value: raw.to_string(),
        });
    }
    let (paint, opacity) = parse_color_paint(trimmed)?;
    Ok((paint.into(), opacity))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineJoin {
    Miter,
    Curve,
    Bevel,
}

impl LineJoin {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim() {
            "miter" | "miter-clip" => Ok(Self::Miter),
            "round" => Ok(Self::Curve),
            "bevel" => Ok(Self::Bevel),
            _ => Err(Error::UnrecognizedLineJoin {
                value: value.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Curve => "curve",
            Self::Bevel => "bevel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim() {
            "butt" => Ok(Self::Butt),
            "round" => Ok(Self::Round),
            "square" => Ok(Self::Square),
            _ => Err(Error::UnrecognizedLineCap {
                value: value.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillRule {
    NonZero,
    EvenOdd,
}

impl FillRule {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "nonzero" => Ok(Self::NonZero),
            "evenodd" => Ok(Self::EvenOdd),
            _ => Err(Error::UnrecognizedFillRule {
                value: value.to_string(),
            }),
        }
    }
}

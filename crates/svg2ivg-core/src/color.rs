//! Color syntax resolution.
//!
//! Accepted forms, in match order: `none`, `#rrggbb`, `#rgb`, `#rrggbbaa`, `#rgba`,
//! `rgb[a]()`, `hsl[a]()`, `hsv[a]()`, the sixteen basic keywords, then the extended keyword
//! table. Alpha channels are folded into the returned opacity.

mod names;

use crate::number::{format_fixed6, parse_float_prefix, round6};
use crate::{Error, Result};
use regex::Regex;
use std::fmt;

/// A flat color in one of the spellings the command stream understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// A basic keyword, emitted by name.
    Named(&'static str),
    Hex([u8; 3]),
    /// Normalized `[0, 1]` channels, already rounded to 6 decimals.
    Rgb([f64; 3]),
    /// Normalized hue (turns), saturation and value, already rounded to 6 decimals.
    Hsv([f64; 3]),
}

/// A color paint: either nothing or a flat color.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorPaint {
    None,
    Color(Color),
}

impl fmt::Display for ColorPaint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Color(c) => c.fmt(f),
        }
    }
}

fn write_triple(f: &mut fmt::Formatter<'_>, func: &str, c: &[f64; 3]) -> fmt::Result {
    write!(
        f,
        "{func}({},{},{})",
        format_fixed6(c[0]),
        format_fixed6(c[1]),
        format_fixed6(c[2])
    )
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Hex([r, g, b]) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Rgb(c) => write_triple(f, "rgb", c),
            Self::Hsv(c) => write_triple(f, "hsv", c),
        }
    }
}

impl Color {
    /// Normalized RGB channels.
    pub fn rgb(&self) -> [f64; 3] {
        let from_bytes = |b: [u8; 3]| b.map(|v| f64::from(v) / 255.0);
        match self {
            Self::Named(name) => {
                names::lookup(names::BASIC_COLORS, name).map_or([0.0; 3], from_bytes)
            }
            Self::Hex(bytes) => from_bytes(*bytes),
            Self::Rgb(c) => *c,
            Self::Hsv([h, s, v]) => hsv_to_rgb(h * 360.0, *s, *v),
        }
    }

    /// ITU-R BT.709 relative luminance, rounded to 6 decimals.
    pub fn luminance(&self) -> f64 {
        let [r, g, b] = self.rgb();
        round6(0.2126 * r + 0.7152 * g + 0.0722 * b)
    }

    /// Renders the color with an explicit alpha channel.
    ///
    /// Hex colors gain a two-digit alpha byte; everything else becomes a four-component
    /// functional color.
    pub fn with_alpha(&self, alpha: f64) -> String {
        match self {
            Self::Hex(_) => format!("{self}{:02x}", alpha_byte(alpha)),
            Self::Hsv(c) => format!(
                "hsv({},{},{},{})",
                format_fixed6(c[0]),
                format_fixed6(c[1]),
                format_fixed6(c[2]),
                format_fixed6(alpha)
            ),
            Self::Named(_) | Self::Rgb(_) => {
                let [r, g, b] = self.rgb();
                format!(
                    "rgb({},{},{},{})",
                    format_fixed6(r),
                    format_fixed6(g),
                    format_fixed6(b),
                    format_fixed6(alpha)
                )
            }
        }
    }
}

/// The `00`..`ff` byte an opacity is stored as in `#rrggbbaa`.
pub fn alpha_byte(alpha: f64) -> u8 {
    (alpha * 255.0).round().clamp(0.0, 255.0) as u8
}

fn functional_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(rgba?|hsla?|hsva?)\((.*)\)$").expect("valid regex"))
}

/// Resolves a non-reference paint string to a color paint and an opacity multiplier.
pub fn parse_color_paint(raw: &str) -> Result<(ColorPaint, f64)> {
    let s = raw.trim().to_ascii_lowercase();
    let unrecognized = || Error::UnrecognizedColor {
        value: raw.to_string(),
    };

    if s == "none" {
        return Ok((ColorPaint::None, 1.0));
    }
    if let Some(hex) = s.strip_prefix('#') {
        let (rgb, alpha) = parse_hex(hex).ok_or_else(unrecognized)?;
        return Ok((ColorPaint::Color(Color::Hex(rgb)), alpha));
    }
    if let Some(caps) = functional_regex().captures(&s) {
        let func = &caps[1];
        let args = caps[2]
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>();
        if !(args.len() == 3 || args.len() == 4) {
            return Err(unrecognized());
        }
        let mut nums = [0.0; 4];
        for (slot, arg) in nums.iter_mut().zip(&args) {
            *slot = parse_float_prefix(arg).ok_or_else(unrecognized)?;
        }
        let alpha = match args.get(3) {
            Some(a) => parse_alpha(a, nums[3]),
            None => 1.0,
        };
        let color = match func.trim_end_matches('a') {
            "rgb" => {
                let channel = |i: usize| round6(rgb_component(args[i], nums[i]) / 255.0);
                Color::Rgb([channel(0), channel(1), channel(2)])
            }
            "hsl" => {
                let c = hsl_to_rgb(nums[0], nums[1] / 100.0, nums[2] / 100.0);
                Color::Rgb(c.map(round6))
            }
            _ => Color::Hsv([
                round6(nums[0] / 360.0),
                round6(nums[1] / 100.0),
                round6(nums[2] / 100.0),
            ]),
        };
        return Ok((ColorPaint::Color(color), alpha));
    }
    if let Some((name, _)) = names::BASIC_COLORS.iter().find(|(n, _)| *n == s) {
        return Ok((ColorPaint::Color(Color::Named(name)), 1.0));
    }
    if let Some(rgb) = names::lookup(names::EXTENDED_COLORS, &s) {
        return Ok((ColorPaint::Color(Color::Hex(rgb)), 1.0));
    }
    Err(unrecognized())
}

fn parse_hex(hex: &str) -> Option<([u8; 3], f64)> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        6 => Some(([byte(0)?, byte(2)?, byte(4)?], 1.0)),
        3 => Some(([nibble(0)?, nibble(1)?, nibble(2)?], 1.0)),
        8 => Some((
            [byte(0)?, byte(2)?, byte(4)?],
            f64::from(byte(6)?) / 255.0,
        )),
        4 => Some((
            [nibble(0)?, nibble(1)?, nibble(2)?],
            f64::from(nibble(3)?) / 255.0,
        )),
        _ => None,
    }
}

/// A channel on the 0-255 scale: percentages scale to 255, values `<= 1` are taken as already
/// normalized, larger values as bytes.
fn rgb_component(arg: &str, num: f64) -> f64 {
    if arg.ends_with('%') {
        255.0 * num / 100.0
    } else if num <= 1.0 {
        num * 255.0
    } else {
        num
    }
}

fn parse_alpha(arg: &str, num: f64) -> f64 {
    if arg.ends_with('%') {
        num / 100.0
    } else if num > 1.0 {
        num / 255.0
    } else {
        num
    }
}

/// Hue in degrees, saturation and lightness in `[0, 1]`; returns normalized RGB.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;
    let (r, g, b) = if h < 1.0 / 6.0 {
        (c, x, 0.0)
    } else if h < 2.0 / 6.0 {
        (x, c, 0.0)
    } else if h < 3.0 / 6.0 {
        (0.0, c, x)
    } else if h < 4.0 / 6.0 {
        (0.0, x, c)
    } else if h < 5.0 / 6.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };
    [r + m, g + m, b + m]
}

/// Hue in degrees, saturation and value in `[0, 1]`; returns normalized RGB.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [f64; 3] {
    let h = (h % 360.0 + 360.0) % 360.0 / 60.0;
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);
    let c = v * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = if h < 1.0 {
        (c, x, 0.0)
    } else if h < 2.0 {
        (x, c, 0.0)
    } else if h < 3.0 {
        (0.0, c, x)
    } else if h < 4.0 {
        (0.0, x, c)
    } else if h < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };
    [r + m, g + m, b + m]
}

/// Extracts the id from `url(#id)`, `url(id)` or a quoted variant, keeping its case.
pub fn url_reference(raw: &str) -> Option<&str> {
    let s = raw.trim();
    let is_url = s.get(..4).is_some_and(|p| p.eq_ignore_ascii_case("url("));
    if s.len() < 5 || !is_url || !s.ends_with(')') {
        return None;
    }
    let inner = s[4..s.len() - 1].trim();
    let inner = inner
        .strip_prefix(['"', '\''])
        .and_then(|v| v.strip_suffix(['"', '\'']))
        .unwrap_or(inner)
        .trim();
    let id = inner.strip_prefix('#').unwrap_or(inner);
    if id.is_empty() { None } else { Some(id) }
}

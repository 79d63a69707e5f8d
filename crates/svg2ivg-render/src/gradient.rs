//! Gradient paints and their luminance-mask variants.

use std::fmt;
use svg2ivg_core::Color;
use svg2ivg_core::color::alpha_byte;
use svg2ivg_core::number::{format_fixed6, js, round6};
use svg2ivg_core::transform::{TransformOp, join_ops};

/// Recursion cap for mask resampling; bounds inserted stops to `2^6 - 1` per interval.
pub const SUBDIVISION_DEPTH: u32 = 6;
/// Largest tolerated gap between true and linearly interpolated mask value.
pub const SUBDIVISION_THRESHOLD: f64 = 0.02;

#[derive(Debug, Clone, PartialEq)]
pub enum GradientGeometry {
    Linear { x1: f64, y1: f64, x2: f64, y2: f64 },
    Radial { cx: f64, cy: f64, r: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum StopColor {
    Color { color: Color, opacity: f64 },
    /// A single-channel mask value.
    Luminance(f64),
}

impl fmt::Display for StopColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color { color, opacity } if *opacity == 1.0 => color.fmt(f),
            Self::Color { color, opacity } => f.write_str(&color.with_alpha(*opacity)),
            Self::Luminance(v) => f.write_str(&format_fixed6(*v)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: StopColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradientSpec {
    pub geometry: GradientGeometry,
    /// Kept in document order, never re-sorted.
    pub stops: Vec<GradientStop>,
    /// Geometry is in object-bounding-box space.
    pub relative: bool,
    pub transform: Vec<TransformOp>,
}

impl fmt::Display for GradientSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.geometry {
            GradientGeometry::Linear { x1, y1, x2, y2 } => write!(
                f,
                "gradient:[linear {},{},{},{}",
                js(x1),
                js(y1),
                js(x2),
                js(y2)
            )?,
            GradientGeometry::Radial { cx, cy, r } => {
                write!(f, "gradient:[radial {},{},{}", js(cx), js(cy), js(r))?
            }
        }
        if self.uses_shorthand() {
            write!(f, " from:{} to:{}", self.stops[0].color, self.stops[1].color)?;
        } else if !self.stops.is_empty() {
            f.write_str(" stops:[")?;
            for (i, stop) in self.stops.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{},{}", js(stop.offset), stop.color)?;
            }
            f.write_str("]")?;
        }
        f.write_str("]")?;
        if !self.transform.is_empty() {
            write!(f, " transform:[{}]", join_ops(&self.transform))?;
        }
        if self.relative {
            f.write_str(" relative:yes")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct Sample {
    offset: f64,
    lum: f64,
    alpha: f64,
}

impl Sample {
    fn value(&self) -> f64 {
        self.lum * self.alpha
    }

    fn midpoint(&self, other: &Sample) -> Sample {
        Sample {
            offset: (self.offset + other.offset) / 2.0,
            lum: (self.lum + other.lum) / 2.0,
            alpha: (self.alpha + other.alpha) / 2.0,
        }
    }

    fn stop(&self) -> GradientStop {
        GradientStop {
            offset: self.offset,
            color: StopColor::Luminance(self.value()),
        }
    }
}

impl GradientSpec {
    /// Exactly two stops, at offsets 0 and 1.
    pub fn uses_shorthand(&self) -> bool {
        matches!(self.stops.as_slice(), [a, b] if a.offset == 0.0 && b.offset == 1.0)
    }

    /// Rebuilds the gradient as a luminance × alpha ramp.
    ///
    /// Interpolating the scalar linearly between two stops is not the same as interpolating
    /// luminance and alpha separately and multiplying, so each interval is bisected while the
    /// two disagree by more than [`SUBDIVISION_THRESHOLD`].
    pub fn luminance_mask(&self) -> GradientSpec {
        let samples = self.stops.iter().map(sample).collect::<Vec<_>>();
        let mut stops = Vec::with_capacity(samples.len());
        if let Some(first) = samples.first() {
            stops.push(first.stop());
        }
        for pair in samples.windows(2) {
            subdivide(&pair[0], &pair[1], 0, &mut stops);
            stops.push(pair[1].stop());
        }
        GradientSpec {
            stops,
            ..self.clone()
        }
    }
}

fn sample(stop: &GradientStop) -> Sample {
    let (lum, alpha) = match &stop.color {
        StopColor::Color { color, opacity } => (color.luminance(), rendered_alpha(color, *opacity)),
        StopColor::Luminance(v) => (*v, 1.0),
    };
    Sample {
        offset: stop.offset,
        lum,
        alpha,
    }
}

/// The alpha as it survives serialization: a byte for hex colors, six decimals otherwise.
fn rendered_alpha(color: &Color, opacity: f64) -> f64 {
    match color {
        Color::Hex(_) => f64::from(alpha_byte(opacity)) / 255.0,
        _ => round6(opacity),
    }
}

fn subdivide(a: &Sample, b: &Sample, depth: u32, out: &mut Vec<GradientStop>) {
    let mid = a.midpoint(b);
    let linear = (a.value() + b.value()) / 2.0;
    if depth < SUBDIVISION_DEPTH && (mid.value() - linear).abs() > SUBDIVISION_THRESHOLD {
        subdivide(a, &mid, depth + 1, out);
        out.push(mid.stop());
        subdivide(&mid, b, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(stops: Vec<GradientStop>) -> GradientSpec {
        GradientSpec {
            geometry: GradientGeometry::Linear {
                x1: 0.0,
                y1: 0.0,
                x2: 1.0,
                y2: 0.0,
            },
            stops,
            relative: true,
            transform: Vec::new(),
        }
    }

    fn stop(offset: f64, color: Color, opacity: f64) -> GradientStop {
        GradientStop {
            offset,
            color: StopColor::Color { color, opacity },
        }
    }

    #[test]
    fn two_edge_stops_use_from_to() {
        let g = linear(vec![
            stop(0.0, Color::Named("red"), 1.0),
            stop(1.0, Color::Named("blue"), 1.0),
        ]);
        assert!(g.uses_shorthand());
        assert_eq!(
            g.to_string(),
            "gradient:[linear 0,0,1,0 from:red to:blue] relative:yes"
        );
    }

    #[test]
    fn other_stop_layouts_use_a_stop_list() {
        let g = linear(vec![
            stop(0.0, Color::Named("red"), 1.0),
            stop(0.5, Color::Hex([0, 0x80, 0]), 0.5),
        ]);
        assert!(!g.uses_shorthand());
        assert_eq!(
            g.to_string(),
            "gradient:[linear 0,0,1,0 stops:[0,red,0.5,#00800080]] relative:yes"
        );

        let mut three = linear(vec![
            stop(0.0, Color::Named("red"), 1.0),
            stop(0.5, Color::Named("lime"), 1.0),
            stop(1.0, Color::Named("blue"), 1.0),
        ]);
        three.relative = false;
        three.transform = vec![TransformOp::Rotate {
            degrees: 90.0,
            anchor: None,
        }];
        assert_eq!(
            three.to_string(),
            "gradient:[linear 0,0,1,0 stops:[0,red,0.5,lime,1,blue]] transform:[rotate 90]"
        );
    }

    #[test]
    fn empty_stop_list_emits_geometry_only() {
        let mut g = linear(Vec::new());
        g.geometry = GradientGeometry::Radial {
            cx: 0.5,
            cy: 0.5,
            r: 0.5,
        };
        assert_eq!(g.to_string(), "gradient:[radial 0.5,0.5,0.5] relative:yes");
        assert!(g.luminance_mask().stops.is_empty());
    }

    #[test]
    fn opaque_ramp_needs_no_extra_stops() {
        let g = linear(vec![
            stop(0.0, Color::Named("black"), 1.0),
            stop(1.0, Color::Named("white"), 1.0),
        ]);
        let mask = g.luminance_mask();
        assert_eq!(mask.stops.len(), 2);
        assert_eq!(
            mask.to_string(),
            "gradient:[linear 0,0,1,0 from:0 to:1] relative:yes"
        );
    }

    #[test]
    fn fading_ramp_is_subdivided_within_bounds() {
        let g = linear(vec![
            stop(0.0, Color::Named("black"), 1.0),
            stop(1.0, Color::Named("white"), 0.0),
        ]);
        let mask = g.luminance_mask();
        let inserted = mask.stops.len() - 2;
        assert!(inserted > 0);
        assert!(inserted <= (1 << SUBDIVISION_DEPTH) - 1);
        assert!(
            mask.stops
                .windows(2)
                .all(|w| w[0].offset < w[1].offset),
            "inserted stops stay ordered"
        );
        assert_eq!(mask.stops[0].color, StopColor::Luminance(0.0));
        assert_eq!(mask.stops.last().unwrap().color, StopColor::Luminance(0.0));
    }

    #[test]
    fn midpoint_is_inserted_between_its_halves() {
        let g = linear(vec![
            stop(0.0, Color::Named("white"), 1.0),
            stop(1.0, Color::Named("white"), 0.0),
        ]);
        // 1·1 → 1·0 is linear in the product, so nothing is inserted.
        assert_eq!(g.luminance_mask().stops.len(), 2);

        let g = linear(vec![
            stop(0.0, Color::Named("black"), 0.0),
            stop(1.0, Color::Named("white"), 0.0),
        ]);
        assert_eq!(g.luminance_mask().stops.len(), 2);
    }
}

//! Elements that only populate the registry: gradients, patterns and masks.

use super::Converter;
use crate::gradient::{GradientGeometry, GradientSpec, GradientStop, StopColor};
use crate::pattern::PatternSpec;
use svg2ivg_core::color::parse_color_paint;
use svg2ivg_core::transform::decompose_transform;
use svg2ivg_core::units::{convert_opacity, parse_number};
use svg2ivg_core::{Attributes, Axis, Color, ColorPaint, Node, Result, TransformOp, Warning};

const USER_SPACE: &str = "userSpaceOnUse";

impl Converter<'_> {
    fn definition_id<'a>(&mut self, element: &str, attrs: &'a Attributes) -> Option<&'a str> {
        let id = attrs.get("id").map(String::as_str);
        if id.is_none() {
            self.warn(Warning::MissingAttribute {
                element: element.to_string(),
                attribute: "id",
            });
        }
        id
    }

    /// A geometry coordinate of a gradient or pattern.
    ///
    /// In relative space a percentage is a fraction of the bounding box; otherwise it resolves
    /// against the viewport like any length.
    fn paint_coordinate(&mut self, value: &str, axis: Axis, relative: bool) -> Result<f64> {
        let trimmed = value.trim();
        match trimmed.strip_suffix('%') {
            Some(pct) if relative => Ok(parse_number(pct)? / 100.0),
            _ => self.length(trimmed, axis),
        }
    }

    fn paint_transform(&mut self, attrs: &Attributes, name: &str) -> Result<Vec<TransformOp>> {
        match attrs.get(name) {
            Some(v) => decompose_transform(v, &self.viewport, &mut self.diagnostics),
            None => Ok(Vec::new()),
        }
    }

    pub(crate) fn gradient(&mut self, node: &Node, attrs: &Attributes, linear: bool) -> Result<()> {
        let element = if linear { "linearGradient" } else { "radialGradient" };
        let Some(id) = self.definition_id(element, attrs) else {
            return Ok(());
        };
        let relative = attrs.get("gradientUnits").map(String::as_str) != Some(USER_SPACE);
        let mut coord = |name: &str, default: &str, axis: Axis| {
            let value = attrs.get(name).map_or(default, String::as_str);
            self.paint_coordinate(value, axis, relative)
        };
        let geometry = if linear {
            GradientGeometry::Linear {
                x1: coord("x1", "0%", Axis::X)?,
                y1: coord("y1", "0%", Axis::Y)?,
                x2: coord("x2", "100%", Axis::X)?,
                y2: coord("y2", "0%", Axis::Y)?,
            }
        } else {
            GradientGeometry::Radial {
                cx: coord("cx", "50%", Axis::X)?,
                cy: coord("cy", "50%", Axis::Y)?,
                r: coord("r", "50%", Axis::X)?,
            }
        };

        let mut stops = gradient_stops(node)?;
        if stops.is_empty() {
            let inherited = attrs
                .get("href")
                .or_else(|| attrs.get("xlink:href"))
                .map(|href| href.trim().trim_start_matches('#'))
                .and_then(|href| self.registry.gradient(href));
            if let Some(source) = inherited {
                stops = source.stops.clone();
            }
        }

        let transform = self.paint_transform(attrs, "gradientTransform")?;
        self.registry.insert_gradient(
            id,
            GradientSpec {
                geometry,
                stops,
                relative,
                transform,
            },
        );
        Ok(())
    }

    pub(crate) fn pattern(&mut self, node: &Node, attrs: &Attributes) -> Result<()> {
        let Some(id) = self.definition_id("pattern", attrs) else {
            return Ok(());
        };
        let (Some(width), Some(height)) = (attrs.get("width"), attrs.get("height")) else {
            let attribute = if attrs.contains_key("width") { "height" } else { "width" };
            self.warn(Warning::MissingAttribute {
                element: "pattern".to_string(),
                attribute,
            });
            return Ok(());
        };
        let relative = attrs.get("patternUnits").map(String::as_str) != Some(USER_SPACE);
        let x = self.paint_coordinate(attrs.get("x").map_or("0", String::as_str), Axis::X, relative)?;
        let y = self.paint_coordinate(attrs.get("y").map_or("0", String::as_str), Axis::Y, relative)?;
        let width = self.paint_coordinate(width, Axis::X, relative)?;
        let height = self.paint_coordinate(height, Axis::Y, relative)?;
        let transform = self.paint_transform(attrs, "patternTransform")?;

        let body = self.capture(|conv| conv.children(node))?.join("; ");
        self.registry.insert_pattern(
            id,
            PatternSpec {
                x,
                y,
                width,
                height,
                relative,
                transform,
                body,
            },
        );
        Ok(())
    }

    /// Pre-renders a `<mask>` body with its content rewritten to luminance paints.
    pub(crate) fn mask_definition(&mut self, node: &Node, attrs: &Attributes) -> Result<()> {
        let Some(id) = self.definition_id("mask", attrs) else {
            return Ok(());
        };
        let body = self.capture(|conv| conv.mask_content(node))?;
        let mut copy = node.clone();
        copy.attributes = attrs.clone();
        self.registry.set_mask_body(id, &copy, body);
        Ok(())
    }
}

fn stop_offset(value: &str) -> Result<f64> {
    let value = value.trim();
    match value.strip_suffix('%') {
        Some(pct) => Ok(parse_number(pct)? / 100.0),
        None => parse_number(value),
    }
}

/// The `<stop>` children that carry both an offset and a color, in document order.
fn gradient_stops(node: &Node) -> Result<Vec<GradientStop>> {
    let mut stops = Vec::new();
    for child in node.elements().filter(|c| c.name == "stop") {
        let attrs = child.expanded_attributes();
        let (Some(offset), Some(color)) = (attrs.get("offset"), attrs.get("stop-color")) else {
            continue;
        };
        let offset = stop_offset(offset)?;
        let (paint, mut opacity) = parse_color_paint(color)?;
        if let Some(v) = attrs.get("stop-opacity") {
            opacity *= convert_opacity(v)?;
        }
        let color = match paint {
            ColorPaint::Color(color) => StopColor::Color { color, opacity },
            ColorPaint::None => StopColor::Color {
                color: Color::Hex([0, 0, 0]),
                opacity: 0.0,
            },
        };
        stops.push(GradientStop { offset, color });
    }
    Ok(stops)
}

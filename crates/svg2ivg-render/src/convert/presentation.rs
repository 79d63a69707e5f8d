use super::Converter;
use crate::paint::{FillRule, LineCap, LineJoin, Paint, resolve_paint};
use svg2ivg_core::number::js;
use svg2ivg_core::units::{convert_opacity, parse_dash_array, parse_number};
use svg2ivg_core::{Attributes, Axis, Result};

const STROKE_ATTRIBUTES: &[&str] = &[
    "stroke",
    "stroke-width",
    "stroke-linejoin",
    "stroke-linecap",
    "stroke-miterlimit",
    "stroke-dasharray",
    "stroke-dashoffset",
];

impl Converter<'_> {
    /// Emits the `pen` and `fill` statements for an element's own presentation attributes.
    ///
    /// `opacity` multiplies into both the stroke and the fill opacity.
    pub(crate) fn presentation(&mut self, attrs: &Attributes) -> Result<()> {
        let base = attrs
            .get("opacity")
            .map(|v| convert_opacity(v))
            .transpose()?
            .unwrap_or(1.0);

        let mut stroke_opacity = base;
        let stroke = match attrs.get("stroke") {
            Some(v) => {
                let (paint, opacity) = resolve_paint(v, &self.registry)?;
                stroke_opacity *= opacity;
                Some(paint)
            }
            None => None,
        };
        if let Some(v) = attrs.get("stroke-opacity") {
            stroke_opacity *= convert_opacity(v)?;
        }

        let mut fill_opacity = base;
        let fill = match attrs.get("fill") {
            Some(v) => {
                let (paint, opacity) = resolve_paint(v, &self.registry)?;
                fill_opacity *= opacity;
                Some(paint)
            }
            None => None,
        };
        if let Some(v) = attrs.get("fill-opacity") {
            fill_opacity *= convert_opacity(v)?;
        }
        let fill_rule = attrs
            .get("fill-rule")
            .map(|v| FillRule::parse(v))
            .transpose()?;

        let has_stroke = STROKE_ATTRIBUTES.iter().any(|a| attrs.contains_key(*a));
        if has_stroke || stroke_opacity != 1.0 {
            let pen = self.pen(attrs, stroke.as_ref(), stroke_opacity)?;
            self.out.line(pen);
        }

        let even_odd = fill_rule == Some(FillRule::EvenOdd);
        if fill.is_some() || fill_opacity != 1.0 || even_odd {
            let mut s = String::from("fill");
            if let Some(paint) = &fill {
                s.push(' ');
                s.push_str(&paint.to_string());
            }
            if even_odd {
                s.push_str(" rule:even-odd");
            }
            if fill_opacity != 1.0 {
                s.push_str(&format!(" opacity:{}", js(fill_opacity)));
            }
            self.out.line(s);
        }
        Ok(())
    }

    fn pen(&mut self, attrs: &Attributes, paint: Option<&Paint>, opacity: f64) -> Result<String> {
        let mut s = String::from("pen");
        if let Some(paint) = paint {
            s.push(' ');
            s.push_str(&paint.to_string());
        }
        if let Some(v) = attrs.get("stroke-width") {
            let width = self.length(v, Axis::X)?;
            s.push_str(&format!(" width:{}", js(width)));
        }
        if let Some(v) = attrs.get("stroke-linejoin") {
            s.push_str(" joints:");
            s.push_str(LineJoin::parse(v)?.as_str());
        }
        if let Some(v) = attrs.get("stroke-linecap") {
            s.push_str(" caps:");
            s.push_str(LineCap::parse(v)?.as_str());
        }
        if let Some(v) = attrs.get("stroke-miterlimit") {
            s.push_str(&format!(" miter-limit:{}", js(parse_number(v)?)));
        }
        if let Some(v) = attrs.get("stroke-dasharray") {
            let dash = parse_dash_array(v, &self.viewport, &mut self.diagnostics)?;
            s.push_str(&format!(" dash:{dash}"));
        }
        if let Some(v) = attrs.get("stroke-dashoffset") {
            let offset = self.length(v, Axis::X)?;
            s.push_str(&format!(" dash-offset:{}", js(offset)));
        }
        if opacity != 1.0 {
            s.push_str(&format!(" opacity:{}", js(opacity)));
        }
        Ok(s)
    }
}

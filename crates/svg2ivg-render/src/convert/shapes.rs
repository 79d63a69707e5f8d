use super::{Converter, required};
use std::fmt::Write as _;
use svg2ivg_core::geom::{Point, Rect, bounds_of, rect};
use svg2ivg_core::number::js;
use svg2ivg_core::units::parse_points;
use svg2ivg_core::{Attributes, Axis, Result, Warning};

impl Converter<'_> {
    fn required_length(
        &mut self,
        element: &str,
        attrs: &Attributes,
        attribute: &str,
        axis: Axis,
    ) -> Result<f64> {
        let value = required(element, attrs, attribute)?;
        self.length(value, axis)
    }

    /// Emits `statement`, wrapped in a scope when the element needs one.
    fn shape(
        &mut self,
        attrs: &Attributes,
        bbox: Option<Rect>,
        statement: Option<String>,
    ) -> Result<()> {
        let scoped = self.context_maybe(attrs, bbox)?;
        if let Some(statement) = statement {
            self.out.line(statement);
        }
        if scoped {
            self.out.close();
        }
        Ok(())
    }

    pub(crate) fn path(&mut self, attrs: &Attributes) -> Result<()> {
        let statement = match attrs.get("d") {
            Some(d) => Some(format!("path svg:[{d}]")),
            None => {
                self.warn(Warning::MissingAttribute {
                    element: "path".to_string(),
                    attribute: "d",
                });
                None
            }
        };
        self.shape(attrs, None, statement)
    }

    pub(crate) fn circle(&mut self, attrs: &Attributes) -> Result<()> {
        let cx = self.required_length("circle", attrs, "cx", Axis::X)?;
        let cy = self.required_length("circle", attrs, "cy", Axis::Y)?;
        let r = self.required_length("circle", attrs, "r", Axis::X)?;
        let bbox = rect(cx - r, cy - r, r * 2.0, r * 2.0);
        let statement = format!("ellipse {},{},{}", js(cx), js(cy), js(r));
        self.shape(attrs, Some(bbox), Some(statement))
    }

    pub(crate) fn ellipse(&mut self, attrs: &Attributes) -> Result<()> {
        let cx = self.required_length("ellipse", attrs, "cx", Axis::X)?;
        let cy = self.required_length("ellipse", attrs, "cy", Axis::Y)?;
        let rx = self.required_length("ellipse", attrs, "rx", Axis::X)?;
        let ry = self.required_length("ellipse", attrs, "ry", Axis::Y)?;
        let bbox = rect(cx - rx, cy - ry, rx * 2.0, ry * 2.0);
        let statement = format!("ellipse {},{},{},{}", js(cx), js(cy), js(rx), js(ry));
        self.shape(attrs, Some(bbox), Some(statement))
    }

    pub(crate) fn line(&mut self, attrs: &Attributes) -> Result<()> {
        let x1 = self.required_length("line", attrs, "x1", Axis::X)?;
        let y1 = self.required_length("line", attrs, "y1", Axis::Y)?;
        let x2 = self.required_length("line", attrs, "x2", Axis::X)?;
        let y2 = self.required_length("line", attrs, "y2", Axis::Y)?;
        let bbox = rect(x1.min(x2), y1.min(y2), (x2 - x1).abs(), (y2 - y1).abs());
        let statement = format!("path svg:[M{},{}L{},{}]", js(x1), js(y1), js(x2), js(y2));
        self.shape(attrs, Some(bbox), Some(statement))
    }

    pub(crate) fn rect(&mut self, attrs: &Attributes) -> Result<()> {
        let x = self.required_length("rect", attrs, "x", Axis::X)?;
        let y = self.required_length("rect", attrs, "y", Axis::Y)?;
        let w = self.required_length("rect", attrs, "width", Axis::X)?;
        let h = self.required_length("rect", attrs, "height", Axis::Y)?;
        let mut statement = format!("rect {},{},{},{}", js(x), js(y), js(w), js(h));

        let rx = attrs.get("rx").map(|v| self.length(v, Axis::X)).transpose()?;
        let ry = attrs.get("ry").map(|v| self.length(v, Axis::Y)).transpose()?;
        match (rx, ry) {
            (Some(rx), Some(ry)) => {
                let _ = write!(statement, " rounded:{},{}", js(rx), js(ry));
            }
            (Some(r), None) | (None, Some(r)) => {
                let _ = write!(statement, " rounded:{}", js(r));
            }
            (None, None) => {}
        }
        self.shape(attrs, Some(rect(x, y, w, h)), Some(statement))
    }

    /// `polygon` (closed) and `polyline` (open).
    pub(crate) fn poly(&mut self, element: &str, attrs: &Attributes, closed: bool) -> Result<()> {
        let points = required(element, attrs, "points")?;
        let points = parse_points(points, &self.viewport, &mut self.diagnostics)?;
        let statement = if points.len() < 2 {
            self.warn(Warning::NotEnoughPoints {
                element: element.to_string(),
            });
            None
        } else {
            Some(format!("path svg:[{}]", point_path(&points, closed)))
        };
        self.shape(attrs, bounds_of(&points), statement)
    }
}

fn point_path(points: &[Point], closed: bool) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{cmd}{},{}", js(p.x), js(p.y));
    }
    if closed {
        d.push('Z');
    }
    d
}

//! Text runs.
//!
//! A `<text>` element and its `<tspan>` descendants flatten into segments, each carrying the
//! fully merged style it is drawn with. Consecutive segments with equal styles share one `font`
//! statement; only the first `TEXT` statement is positioned.

use crate::convert::{Converter, first_font_family};
use crate::paint::{LineCap, LineJoin, resolve_paint};
use regex::Regex;
use std::fmt::Write as _;
use svg2ivg_core::number::js;
use svg2ivg_core::units::{Dash, convert_opacity, parse_dash_array, parse_number};
use svg2ivg_core::{Attributes, Axis, Item, Node, Result, Warning};

#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub paint: String,
    pub opacity: f64,
    pub width: Option<f64>,
    pub joints: Option<LineJoin>,
    pub caps: Option<LineCap>,
    pub miter: Option<f64>,
    pub dash: Option<Dash>,
    pub dash_offset: Option<f64>,
}

impl Outline {
    fn new(paint: String, opacity: f64) -> Self {
        Self {
            paint,
            opacity,
            width: None,
            joints: None,
            caps: None,
            miter: None,
            dash: None,
            dash_offset: None,
        }
    }

    fn option(&self) -> String {
        let mut opts = String::new();
        if let Some(w) = self.width.filter(|w| *w != 0.0) {
            let _ = write!(opts, " width:{}", js(w));
        }
        if let Some(j) = self.joints {
            let _ = write!(opts, " joints:{}", j.as_str());
        }
        if let Some(c) = self.caps {
            let _ = write!(opts, " caps:{}", c.as_str());
        }
        if self.opacity != 1.0 {
            let _ = write!(opts, " opacity:{}", js(self.opacity));
        }
        if let Some(m) = self.miter.filter(|m| *m != 0.0) {
            let _ = write!(opts, " miter:{}", js(m));
        }
        if let Some(d) = &self.dash {
            let _ = write!(opts, " dash:{d}");
        }
        if let Some(o) = self.dash_offset.filter(|o| *o != 0.0) {
            let _ = write!(opts, " dash-offset:{}", js(o));
        }
        if opts.is_empty() && !needs_brackets(&self.paint) {
            format!(" outline:{}", self.paint)
        } else {
            format!(" outline:[{}{opts}]", self.paint)
        }
    }
}

/// Everything a glyph run is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub family: String,
    pub size: f64,
    pub fill: String,
    /// Alpha carried by the fill paint itself; replaced whenever `fill` is set.
    pub fill_alpha: f64,
    /// Product of inherited `opacity` and `fill-opacity` factors.
    pub fill_opacity: f64,
    pub outline: Option<Outline>,
}

impl TextStyle {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            fill: "black".to_string(),
            fill_alpha: 1.0,
            fill_opacity: 1.0,
            outline: None,
        }
    }

    /// The `font` statement selecting this style.
    pub fn statement(&self) -> String {
        let color = if self.fill != "none" && needs_brackets(&self.fill) {
            format!("[{}]", self.fill)
        } else {
            self.fill.clone()
        };
        let mut s = format!(
            "font {} size:{} color:{color}",
            quote_impd(&self.family),
            js(self.size)
        );
        let opacity = self.fill_alpha * self.fill_opacity;
        if opacity != 1.0 {
            let _ = write!(s, " opacity:{}", js(opacity));
        }
        if let Some(outline) = &self.outline {
            s.push_str(&outline.option());
        }
        s
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    pub style: TextStyle,
}

fn needs_brackets(value: &str) -> bool {
    value.contains(|c: char| c == ':' || c.is_whitespace())
}

fn bare_word_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex"))
}

fn whitespace_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

/// A bare word stays as is; anything else is bracketed with `]` escaped.
pub fn quote_impd(value: &str) -> String {
    if bare_word_regex().is_match(value) {
        value.to_string()
    } else {
        format!("[{}]", value.replace(']', "\\]"))
    }
}

fn escape_text(text: &str) -> String {
    text.replace('"', "\\\"")
}

impl Converter<'_> {
    /// Layers an element's text-related attributes over the inherited style.
    fn text_style(&mut self, base: &TextStyle, attrs: &Attributes) -> Result<TextStyle> {
        let mut style = base.clone();
        if let Some(v) = attrs.get("font-family") {
            style.family = first_font_family(v);
        }
        if let Some(v) = attrs.get("font-size") {
            style.size = self.length(v, Axis::Y)?;
        }
        if let Some(v) = attrs.get("fill") {
            let (paint, opacity) = resolve_paint(v, &self.registry)?;
            style.fill = paint.to_string();
            style.fill_alpha = opacity;
        }
        if let Some(v) = attrs.get("opacity") {
            style.fill_opacity *= convert_opacity(v)?;
        }
        if let Some(v) = attrs.get("fill-opacity") {
            style.fill_opacity *= convert_opacity(v)?;
        }

        match attrs.get("stroke").map(|v| v.trim()) {
            Some("none") => style.outline = None,
            Some(v) => {
                let (paint, opacity) = resolve_paint(v, &self.registry)?;
                match &mut style.outline {
                    Some(outline) => {
                        outline.paint = paint.to_string();
                        outline.opacity = opacity;
                    }
                    None => style.outline = Some(Outline::new(paint.to_string(), opacity)),
                }
            }
            None => {}
        }
        let Some(mut outline) = style.outline.take() else {
            return Ok(style);
        };
        if let Some(v) = attrs.get("stroke-opacity") {
            outline.opacity *= convert_opacity(v)?;
        }
        if let Some(v) = attrs.get("stroke-width") {
            outline.width = Some(self.length(v, Axis::X)?);
        }
        if let Some(v) = attrs.get("stroke-linejoin") {
            outline.joints = Some(LineJoin::parse(v)?);
        }
        if let Some(v) = attrs.get("stroke-linecap") {
            outline.caps = Some(LineCap::parse(v)?);
        }
        if let Some(v) = attrs.get("stroke-miterlimit") {
            outline.miter = Some(parse_number(v)?);
        }
        if let Some(v) = attrs.get("stroke-dasharray") {
            outline.dash = Some(parse_dash_array(v, &self.viewport, &mut self.diagnostics)?);
        }
        if let Some(v) = attrs.get("stroke-dashoffset") {
            outline.dash_offset = Some(self.length(v, Axis::X)?);
        }
        style.outline = Some(outline);
        Ok(style)
    }

    /// Flattens an element's text runs and `<tspan>` children into styled segments.
    ///
    /// Whitespace runs collapse to one space, and a space is inserted between adjacent segments
    /// when neither side provides one.
    fn segments(
        &mut self,
        node: &Node,
        attrs: &Attributes,
        base: &TextStyle,
    ) -> Result<Vec<Segment>> {
        let style = self.text_style(base, attrs)?;
        let mut segments: Vec<Segment> = Vec::new();
        let mut prev_ends_with_space = false;
        for item in &node.children {
            match item {
                Item::Text(raw) => {
                    let mut text = whitespace_regex().replace_all(raw, " ").into_owned();
                    if text.is_empty() {
                        continue;
                    }
                    if !segments.is_empty() && !prev_ends_with_space && !text.starts_with(' ') {
                        text.insert(0, ' ');
                    }
                    prev_ends_with_space = text.ends_with(' ');
                    segments.push(Segment {
                        text,
                        style: style.clone(),
                    });
                }
                Item::Element(child) if child.name == "tspan" => {
                    let child_attrs = child.expanded_attributes();
                    let mut nested = self.segments(child, &child_attrs, &style)?;
                    let Some(first) = nested.first_mut() else {
                        continue;
                    };
                    if !segments.is_empty() && !prev_ends_with_space && !first.text.starts_with(' ')
                    {
                        first.text.insert(0, ' ');
                    }
                    prev_ends_with_space = nested.last().is_some_and(|s| s.text.ends_with(' '));
                    segments.append(&mut nested);
                }
                Item::Element(child) => {
                    self.warn(Warning::UnsupportedTextChild {
                        name: child.name.clone(),
                    });
                }
            }
        }
        if let Some(first) = segments.first_mut() {
            first.text = first.text.trim_start().to_string();
        }
        if let Some(last) = segments.last_mut() {
            last.text = last.text.trim_end().to_string();
        }
        segments.retain(|s| !s.text.is_empty());
        Ok(segments)
    }

    pub(crate) fn text(&mut self, node: &Node, attrs: &Attributes) -> Result<()> {
        let scoped = ["transform", "clip-path", "mask"]
            .iter()
            .any(|a| attrs.contains_key(*a));
        if scoped {
            self.out.open("context");
            if let Some(t) = attrs.get("transform") {
                self.transforms(t)?;
            }
            self.references(attrs, None)?;
        }

        let defaults = TextStyle::new(self.font.family.clone(), self.font.size);
        let segments = self.segments(node, attrs, &defaults)?;
        if !segments.is_empty() {
            let x = attrs.get("x").map(|v| self.length(v, Axis::X)).transpose()?;
            let y = attrs.get("y").map(|v| self.length(v, Axis::Y)).transpose()?;
            let anchor = match attrs.get("text-anchor").map(|v| v.trim()) {
                Some("middle") => " anchor:center",
                Some("end") => " anchor:right",
                _ => "",
            };
            let mut at = Some(format!(
                "at:{},{}{anchor}",
                js(x.unwrap_or(0.0)),
                js(y.unwrap_or(0.0))
            ));
            let mut current: Option<&TextStyle> = None;
            for seg in &segments {
                if current != Some(&seg.style) {
                    self.out.line(seg.style.statement());
                    current = Some(&seg.style);
                }
                let text = escape_text(&seg.text);
                match at.take() {
                    Some(at) => self.out.line(format!("TEXT {at} \"{text}\"")),
                    None => self.out.line(format!("TEXT \"{text}\"")),
                }
            }
        }

        if scoped {
            self.out.close();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_impd_brackets_non_words() {
        assert_eq!(quote_impd("serif"), "serif");
        assert_eq!(quote_impd("Times New Roman"), "[Times New Roman]");
        assert_eq!(quote_impd("a]b"), "[a\\]b]");
    }

    #[test]
    fn font_statement_brackets_colors_and_outlines() {
        let mut style = TextStyle::new("Open Sans", 12.0);
        assert_eq!(style.statement(), "font [Open Sans] size:12 color:black");

        style.fill = "rgb(1, 0, 0)".to_string();
        style.fill_opacity = 0.5;
        style.outline = Some(Outline::new("red".to_string(), 1.0));
        assert_eq!(
            style.statement(),
            "font [Open Sans] size:12 color:[rgb(1, 0, 0)] opacity:0.5 outline:red"
        );

        let outline = style.outline.as_mut().unwrap();
        outline.width = Some(2.0);
        outline.joints = Some(LineJoin::Curve);
        assert_eq!(
            style.statement(),
            "font [Open Sans] size:12 color:[rgb(1, 0, 0)] opacity:0.5 outline:[red width:2 joints:curve]"
        );
    }
}

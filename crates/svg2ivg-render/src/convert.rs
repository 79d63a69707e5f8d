//! Depth-first traversal and the per-element statement rules.

mod defs;
mod masking;
mod presentation;
mod shapes;

use crate::element::ElementKind;
use crate::emitter::Emitter;
use crate::registry::Registry;
use svg2ivg_core::diagnostics::ReferenceKind;
use svg2ivg_core::geom::Rect;
use svg2ivg_core::number::js;
use svg2ivg_core::transform::decompose_transform;
use svg2ivg_core::units::{convert_length, parse_rect};
use svg2ivg_core::{
    Attributes, Axis, ConvertOptions, Diagnostics, Document, Error, Node, Result, Viewport,
    Warning,
};

/// First statement of every document.
pub const HEADER: &str = "format IVG-1 requires:IMPD-1";

/// Attributes that make a shape need its own scope.
pub(crate) const PRESENTATION_ATTRIBUTES: &[&str] = &[
    "stroke",
    "stroke-width",
    "stroke-linejoin",
    "stroke-linecap",
    "stroke-miterlimit",
    "stroke-dasharray",
    "stroke-dashoffset",
    "fill",
    "opacity",
    "fill-opacity",
    "stroke-opacity",
    "fill-rule",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub output: String,
    pub warnings: Vec<Warning>,
}

/// Converts every top-level element of `doc` into one command-stream document.
pub fn convert_document(doc: &Document, options: &ConvertOptions) -> Result<Conversion> {
    let mut conv = Converter::new(options);
    conv.out.line(HEADER);
    for node in &doc.nodes {
        conv.element(node)?;
    }
    Ok(Conversion {
        output: conv.out.finish(),
        warnings: conv.diagnostics.into_warnings(),
    })
}

/// Default text face; scoped to the enclosing root.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FontDefaults {
    pub(crate) family: String,
    pub(crate) size: f64,
}

impl Default for FontDefaults {
    fn default() -> Self {
        Self {
            family: "serif".to_string(),
            size: 16.0,
        }
    }
}

pub(crate) struct Converter<'o> {
    options: &'o ConvertOptions,
    pub(crate) out: Emitter,
    pub(crate) registry: Registry,
    pub(crate) viewport: Viewport,
    pub(crate) font: FontDefaults,
    pub(crate) diagnostics: Diagnostics,
    roots_seen: usize,
    svg_depth: usize,
    /// `<use>` targets currently being expanded, innermost last.
    instantiating: Vec<String>,
}

impl<'o> Converter<'o> {
    pub(crate) fn new(options: &'o ConvertOptions) -> Self {
        Self {
            options,
            out: Emitter::new(),
            registry: Registry::new(),
            viewport: Viewport::default(),
            font: FontDefaults::default(),
            diagnostics: Diagnostics::new(),
            roots_seen: 0,
            svg_depth: 0,
            instantiating: Vec::new(),
        }
    }

    pub(crate) fn length(&mut self, value: &str, axis: Axis) -> Result<f64> {
        convert_length(value, axis, &self.viewport, &mut self.diagnostics)
    }

    pub(crate) fn warn(&mut self, warning: Warning) {
        self.diagnostics.warn(warning);
    }

    /// Emits one statement per transform function, in textual order.
    pub(crate) fn transforms(&mut self, value: &str) -> Result<()> {
        for op in decompose_transform(value, &self.viewport, &mut self.diagnostics)? {
            self.out.line(op.to_string());
        }
        Ok(())
    }

    /// Runs `f` against a fresh emitter and returns what it wrote, trimmed line by line.
    pub(crate) fn capture(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<()>,
    ) -> Result<Vec<String>> {
        let saved = std::mem::take(&mut self.out);
        let result = f(self);
        let captured = std::mem::replace(&mut self.out, saved);
        result.map(|()| captured.into_lines())
    }

    fn register(&mut self, node: &Node, attrs: &Attributes) {
        if let Some(id) = attrs.get("id") {
            let copy = Node {
                name: node.name.clone(),
                attributes: attrs.clone(),
                children: node.children.clone(),
            };
            self.registry.define(id, copy);
        }
    }

    /// Clip and mask content is only drawn through id-less copies, so the authored
    /// descendants are registered here for `<use>`.
    fn register_descendants(&mut self, node: &Node) {
        for child in node.elements() {
            let attrs = child.expanded_attributes();
            self.register(child, &attrs);
            self.register_descendants(child);
        }
    }

    pub(crate) fn element(&mut self, node: &Node) -> Result<()> {
        let attrs = node.expanded_attributes();
        self.register(node, &attrs);
        let hidden = attrs.get("visibility").is_some_and(|v| v.trim() == "hidden")
            || attrs.get("display").is_some_and(|v| v.trim() == "none");
        if hidden {
            return Ok(());
        }
        match ElementKind::of(&node.name) {
            ElementKind::Svg => self.svg(node, &attrs),
            ElementKind::G => self.group(node, &attrs),
            ElementKind::Path => self.path(&attrs),
            ElementKind::Circle => self.circle(&attrs),
            ElementKind::Ellipse => self.ellipse(&attrs),
            ElementKind::Line => self.line(&attrs),
            ElementKind::Rect => self.rect(&attrs),
            ElementKind::Polygon => self.poly(&node.name, &attrs, true),
            ElementKind::Polyline => self.poly(&node.name, &attrs, false),
            ElementKind::Text => self.text(node, &attrs),
            ElementKind::Defs => self.defs(node),
            ElementKind::Use => self.use_reference(&attrs),
            ElementKind::ClipPath => {
                self.register_descendants(node);
                Ok(())
            }
            ElementKind::Metadata => Ok(()),
            ElementKind::Mask => {
                self.mask_definition(node, &attrs)?;
                self.register_descendants(node);
                Ok(())
            }
            ElementKind::LinearGradient => self.gradient(node, &attrs, true),
            ElementKind::RadialGradient => self.gradient(node, &attrs, false),
            ElementKind::Pattern => self.pattern(node, &attrs),
            ElementKind::Unsupported(name) => {
                self.warn(Warning::UnsupportedElement {
                    name: name.to_string(),
                });
                Ok(())
            }
        }
    }

    pub(crate) fn children(&mut self, node: &Node) -> Result<()> {
        for child in node.elements() {
            self.element(child)?;
        }
        Ok(())
    }

    /// A root's `width`/`height`, or the configured default with a warning. A nested `<svg>`
    /// without one fills the enclosing viewport.
    fn dimension(&mut self, attrs: &Attributes, attribute: &'static str) -> Result<f64> {
        let (axis, assumed) = match attribute {
            "width" => (Axis::X, self.options.default_width),
            _ => (Axis::Y, self.options.default_height),
        };
        match attrs.get(attribute) {
            Some(v) => self.length(v, axis),
            None if self.svg_depth > 0 => Ok(match axis {
                Axis::X => self.viewport.width,
                Axis::Y => self.viewport.height,
            }),
            None => {
                self.warn(Warning::MissingDimension { attribute, assumed });
                Ok(assumed)
            }
        }
    }

    /// Document roots set up the canvas; an `<svg>` nested inside another one becomes a scope
    /// with its own viewport.
    fn svg(&mut self, node: &Node, attrs: &Attributes) -> Result<()> {
        let width = self.dimension(attrs, "width")?;
        let height = self.dimension(attrs, "height")?;
        let nested = self.svg_depth > 0;

        if nested {
            self.out.open("context");
            let x = attrs.get("x").map(|v| self.length(v, Axis::X)).transpose()?;
            let y = attrs.get("y").map(|v| self.length(v, Axis::Y)).transpose()?;
            let (x, y) = (x.unwrap_or(0.0), y.unwrap_or(0.0));
            if x != 0.0 || y != 0.0 {
                self.out.line(format!("offset {},{}", js(x), js(y)));
            }
        } else {
            if self.roots_seen > 0 {
                self.out.line("reset");
            }
            self.roots_seen += 1;
            tracing::debug!(width, height, root = self.roots_seen, "entering document root");
            self.out
                .line(format!("bounds 0,0,{},{}", js(width), js(height)));
            self.out.line("fill black");
            self.out.line("pen miter-limit:4");
        }

        let saved_viewport = std::mem::replace(&mut self.viewport, Viewport::new(width, height));
        let saved_font = self.font.clone();
        let result = self.svg_body(node, attrs, width, height);
        self.viewport = saved_viewport;
        self.font = saved_font;
        result?;

        if nested {
            self.out.close();
        }
        Ok(())
    }

    fn svg_body(&mut self, node: &Node, attrs: &Attributes, width: f64, height: f64) -> Result<()> {
        if let Some(family) = attrs.get("font-family") {
            self.font.family = first_font_family(family);
        }
        if let Some(size) = attrs.get("font-size") {
            self.font.size = self.length(size, Axis::Y)?;
        }
        if let Some(t) = attrs.get("transform") {
            self.transforms(t)?;
        }
        if let Some(raw) = attrs.get("viewBox") {
            let vb = parse_rect(raw)?;
            if !(vb.size.width > 0.0 && vb.size.height > 0.0) {
                return Err(Error::InvalidRect { value: raw.clone() });
            }
            let (left, top) = (vb.origin.x, vb.origin.y);
            if left != 0.0 || top != 0.0 {
                self.out.line(format!("offset {},{}", js(-left), js(-top)));
            }
            let scale = (width / vb.size.width).min(height / vb.size.height);
            self.out.line(format!("scale {}", js(scale)));
        }
        self.presentation(attrs)?;
        self.svg_depth += 1;
        let result = self.children(node);
        self.svg_depth -= 1;
        result
    }

    fn group(&mut self, node: &Node, attrs: &Attributes) -> Result<()> {
        self.out.open("context");
        if let Some(t) = attrs.get("transform") {
            self.transforms(t)?;
        }
        self.presentation(attrs)?;
        self.references(attrs, None)?;
        self.children(node)?;
        self.out.close();
        Ok(())
    }

    /// Opens a scope when the element carries a transform, presentation attributes, a clip or
    /// a mask. Returns whether one was opened.
    pub(crate) fn context_maybe(&mut self, attrs: &Attributes, bbox: Option<Rect>) -> Result<bool> {
        let needs = PRESENTATION_ATTRIBUTES.iter().any(|a| attrs.contains_key(*a))
            || ["transform", "clip-path", "mask"]
                .iter()
                .any(|a| attrs.contains_key(*a));
        if !needs {
            return Ok(false);
        }
        self.out.open("context");
        if let Some(t) = attrs.get("transform") {
            self.transforms(t)?;
        }
        self.presentation(attrs)?;
        self.references(attrs, bbox)?;
        Ok(true)
    }

    /// Emits the `clip-path` and `mask` references of an element, in that order.
    pub(crate) fn references(&mut self, attrs: &Attributes, bbox: Option<Rect>) -> Result<()> {
        if let Some(clip) = attrs.get("clip-path") {
            self.clip_path(clip, bbox)?;
        }
        if let Some(mask) = attrs.get("mask") {
            self.mask_reference(mask, bbox)?;
        }
        Ok(())
    }

    fn defs(&mut self, node: &Node) -> Result<()> {
        for child in node.elements() {
            if ElementKind::of(&child.name).is_definition_source() {
                self.element(child)?;
            } else {
                let attrs = child.expanded_attributes();
                self.register(child, &attrs);
            }
        }
        Ok(())
    }

    fn use_reference(&mut self, attrs: &Attributes) -> Result<()> {
        let Some(href) = attrs.get("href").or_else(|| attrs.get("xlink:href")) else {
            self.warn(Warning::MissingAttribute {
                element: "use".to_string(),
                attribute: "href",
            });
            return Ok(());
        };
        let id = href.trim();
        let id = id.strip_prefix('#').unwrap_or(id);
        if self.instantiating.iter().any(|active| active == id) {
            self.warn(Warning::RecursiveReference {
                reference: id.to_string(),
            });
            return Ok(());
        }
        let Some(mut clone) = self.registry.definition(id).map(|d| d.node.clone()) else {
            self.warn(Warning::UnresolvedReference {
                kind: ReferenceKind::Use,
                reference: id.to_string(),
            });
            return Ok(());
        };

        for (k, v) in attrs {
            if matches!(k.as_str(), "href" | "xlink:href" | "x" | "y" | "transform") {
                continue;
            }
            clone.attributes.insert(k.clone(), v.clone());
        }
        clone.attributes.shift_remove("id");

        let positioned = ["x", "y", "transform"].iter().any(|a| attrs.contains_key(*a));
        if positioned {
            self.out.open("context");
            if let Some(t) = attrs.get("transform") {
                self.transforms(t)?;
            }
            let tx = attrs.get("x").map(|v| self.length(v, Axis::X)).transpose()?;
            let ty = attrs.get("y").map(|v| self.length(v, Axis::Y)).transpose()?;
            let (tx, ty) = (tx.unwrap_or(0.0), ty.unwrap_or(0.0));
            if tx != 0.0 || ty != 0.0 {
                self.out.line(format!("offset {},{}", js(tx), js(ty)));
            }
        }
        self.instantiating.push(id.to_string());
        let result = self.element(&clone);
        self.instantiating.pop();
        result?;
        if positioned {
            self.out.close();
        }
        Ok(())
    }
}

/// The first entry of a `font-family` list, unquoted.
pub(crate) fn first_font_family(value: &str) -> String {
    let first = value.split(',').next().unwrap_or_default().trim();
    let first = first.strip_prefix(['"', '\'']).unwrap_or(first);
    let first = first.strip_suffix(['"', '\'']).unwrap_or(first);
    first.to_string()
}

/// Looks up a required attribute or fails naming the element.
pub(crate) fn required<'a>(element: &str, attrs: &'a Attributes, attribute: &str) -> Result<&'a str> {
    attrs
        .get(attribute)
        .map(String::as_str)
        .ok_or_else(|| Error::MissingRequiredAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
        })
}

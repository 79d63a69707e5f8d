//! Clip-path and mask references.
//!
//! Both become a `mask [...]` block at the reference site. Clip content is painted with full
//! coverage (`fill 1`, `pen 0`); mask content keeps its own paints, rewritten to luminance.

use super::Converter;
use crate::paint::is_verbatim_paint;
use svg2ivg_core::color::{parse_color_paint, url_reference};
use svg2ivg_core::diagnostics::ReferenceKind;
use svg2ivg_core::geom::Rect;
use svg2ivg_core::number::{format_fixed6, js};
use svg2ivg_core::{ColorPaint, Error, Item, Node, Result, Warning};

const OBJECT_BOUNDING_BOX: &str = "objectBoundingBox";

impl Converter<'_> {
    fn resolve_reference(
        &mut self,
        raw: &str,
        kind: ReferenceKind,
    ) -> Option<(Node, Option<Vec<String>>)> {
        let found = url_reference(raw)
            .and_then(|id| self.registry.definition(id))
            .map(|d| (d.node.clone(), d.mask_body.clone()));
        if found.is_none() {
            self.warn(Warning::UnresolvedReference {
                kind,
                reference: raw.trim().to_string(),
            });
        }
        found
    }

    fn bounding_box_scope(&mut self, bbox: Rect) {
        self.out
            .line(format!("offset {},{}", js(bbox.origin.x), js(bbox.origin.y)));
        self.out
            .line(format!("scale {},{}", js(bbox.size.width), js(bbox.size.height)));
    }

    pub(crate) fn clip_path(&mut self, raw: &str, bbox: Option<Rect>) -> Result<()> {
        let Some((clip, _)) = self.resolve_reference(raw, ReferenceKind::ClipPath) else {
            return Ok(());
        };
        let object_space = clip.attr("clipPathUnits") == Some(OBJECT_BOUNDING_BOX);
        let transform = clip.attr("transform");

        self.out.open("mask");
        let scoped = object_space || transform.is_some();
        if scoped {
            self.out.open("context");
            if object_space {
                match bbox {
                    Some(bbox) => self.bounding_box_scope(bbox),
                    None => self.warn(Warning::MissingBounds {
                        attribute: "clipPathUnits",
                    }),
                }
            }
            if let Some(t) = transform {
                self.transforms(t)?;
            }
        }
        for child in clip.elements() {
            let mut child = child.clone();
            child.expand_style();
            child.attributes.insert("fill".to_string(), "1".to_string());
            child.attributes.insert("stroke".to_string(), "0".to_string());
            child.attributes.shift_remove("clip-path");
            strip_ids(&mut child);
            self.element(&child)?;
        }
        if scoped {
            self.out.close();
        }
        self.out.close();
        Ok(())
    }

    pub(crate) fn mask_reference(&mut self, raw: &str, bbox: Option<Rect>) -> Result<()> {
        let Some((mask, body)) = self.resolve_reference(raw, ReferenceKind::Mask) else {
            return Ok(());
        };
        let object_space = mask.attr("maskContentUnits") == Some(OBJECT_BOUNDING_BOX);

        self.out.open("mask");
        let mut scoped = false;
        if object_space {
            match bbox {
                Some(bbox) => {
                    self.out.open("context");
                    self.bounding_box_scope(bbox);
                    scoped = true;
                }
                None => self.warn(Warning::MissingBounds {
                    attribute: "maskContentUnits",
                }),
            }
        }
        match body {
            Some(lines) => {
                for line in lines {
                    self.out.line(line);
                }
            }
            None => self.mask_content(&mask)?,
        }
        if scoped {
            self.out.close();
        }
        self.out.close();
        Ok(())
    }

    /// Converts the children of a mask with fill and stroke replaced by luminance paints.
    ///
    /// An absent fill becomes full coverage (`1`) and an absent stroke none (`0`).
    pub(crate) fn mask_content(&mut self, mask: &Node) -> Result<()> {
        for child in mask.elements() {
            let mut child = child.clone();
            child.expand_style();
            let fill = match child.attr("fill") {
                Some(v) => self.mask_paint(v)?,
                None => "1".to_string(),
            };
            let stroke = match child.attr("stroke") {
                Some(v) => self.mask_paint(v)?,
                None => "0".to_string(),
            };
            child.attributes.insert("fill".to_string(), fill);
            child.attributes.insert("stroke".to_string(), stroke);
            child.attributes.shift_remove("mask");
            child.attributes.shift_remove("clip-path");
            strip_ids(&mut child);
            self.element(&child)?;
        }
        Ok(())
    }

    /// A paint as a mask value: luminance × opacity for colors, a luminance ramp for gradients.
    pub(crate) fn mask_paint(&self, raw: &str) -> Result<String> {
        let value = raw.trim();
        if let Some(id) = url_reference(value) {
            return match self.registry.gradient(id) {
                Some(g) => Ok(g.luminance_mask().to_string()),
                None => Err(Error::UnrecognizedMaskPaint {
                    value: raw.to_string(),
                }),
            };
        }
        if is_verbatim_paint(value) {
            return Ok(value.to_string());
        }
        match parse_color_paint(value)? {
            (ColorPaint::None, _) => Ok("none".to_string()),
            (ColorPaint::Color(c), opacity) => Ok(format_fixed6(c.luminance() * opacity)),
        }
    }
}

/// Drops `id` throughout a substituted copy so it never shadows the authored element.
fn strip_ids(node: &mut Node) {
    node.attributes.shift_remove("id");
    for item in &mut node.children {
        if let Item::Element(child) = item {
            strip_ids(child);
        }
    }
}

#![forbid(unsafe_code)]

//! SVG markup parser + unit, color and transform resolution (headless).
//!
//! This crate holds the leaf layers of the converter: it turns markup text into a
//! [`markup::Document`] and resolves the attribute mini-languages (lengths, colors, transform
//! lists) into typed values. Emission of the command stream lives in `svg2ivg-render`.

pub mod color;
pub mod diagnostics;
pub mod error;
pub mod geom;
pub mod markup;
pub mod number;
pub mod options;
pub mod transform;
pub mod units;

pub use color::{Color, ColorPaint};
pub use diagnostics::{Diagnostics, ReferenceKind, Warning};
pub use error::{Error, Result};
pub use markup::{Attributes, Document, Item, Node, parse_markup};
pub use options::{ConvertOptions, DefaultSize};
pub use transform::TransformOp;
pub use units::{Axis, Viewport};

#[cfg(test)]
mod tests;

#![forbid(unsafe_code)]

//! Command-stream emission.
//!
//! Walks a parsed [`svg2ivg_core::Document`] depth-first and writes the equivalent IVG document.
//! All traversal state lives in one converter value, so two conversions never share anything.

pub mod convert;
pub mod element;
pub mod emitter;
pub mod gradient;
pub mod paint;
pub mod pattern;
pub mod registry;
pub mod text;

pub use convert::{Conversion, HEADER, convert_document};
pub use element::ElementKind;
pub use emitter::Emitter;
pub use gradient::{GradientGeometry, GradientSpec, GradientStop, StopColor};
pub use paint::{FillRule, LineCap, LineJoin, Paint};
pub use pattern::PatternSpec;
pub use registry::{Definition, Registry};

#[cfg(test)]
mod tests;

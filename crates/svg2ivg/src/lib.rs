#![forbid(unsafe_code)]

//! `svg2ivg` converts SVG markup into the IVG/IMPD nested-bracket command stream.
//!
//! The work is split across two crates re-exported here:
//! - [`svg2ivg_core`]: markup parsing and the attribute mini-languages
//! - [`svg2ivg_render`]: the traversal that emits the command stream
//!
//! ```
//! let out = svg2ivg::convert_str(
//!     r#"<svg width="10" height="10"><circle cx="5" cy="5" r="4"/></svg>"#,
//!     &svg2ivg::ConvertOptions::default(),
//! )
//! .unwrap();
//! assert!(out.output.ends_with("ellipse 5,5,4\n"));
//! ```

pub use svg2ivg_core::*;

pub mod render {
    pub use svg2ivg_render::*;
}

pub use svg2ivg_render::{Conversion, HEADER, convert_document};

/// Parses `text` and converts every top-level element into one command-stream document.
pub fn convert_str(text: &str, options: &ConvertOptions) -> Result<Conversion> {
    let doc = parse_markup(text)?;
    tracing::debug!(roots = doc.nodes.len(), "parsed markup");
    convert_document(&doc, options)
}

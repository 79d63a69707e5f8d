mod paint;
mod references;
mod text;

use crate::*;
use svg2ivg_core::{ConvertOptions, parse_markup};

pub(crate) fn convert(src: &str) -> Conversion {
    convert_with(src, &ConvertOptions::default())
}

pub(crate) fn convert_with(src: &str, options: &ConvertOptions) -> Conversion {
    let doc = parse_markup(src).unwrap();
    convert_document(&doc, options).unwrap()
}

pub(crate) fn convert_err(src: &str) -> svg2ivg_core::Error {
    let doc = parse_markup(src).unwrap();
    convert_document(&doc, &ConvertOptions::default()).unwrap_err()
}

/// Output lines after the header and the `bounds`/`fill black`/`pen miter-limit:4` preamble of a
/// single root.
pub(crate) fn body(src: &str) -> Vec<String> {
    let conversion = convert(src);
    let lines = conversion.output.lines().map(str::to_string).collect::<Vec<_>>();
    assert_eq!(lines[0], HEADER);
    assert!(lines[1].starts_with("bounds "), "{lines:?}");
    assert_eq!(lines[2], "fill black");
    assert_eq!(lines[3], "pen miter-limit:4");
    lines[4..].to_vec()
}

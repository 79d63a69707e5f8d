use std::fs;
use std::path::{Path, PathBuf};
use svg2ivg::{ConvertOptions, Error, HEADER, Warning, convert_str};

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> String {
    let path = repo_root().join("fixtures").join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

/// Every `[` opened on a line is closed by a `]` line at the same depth.
fn assert_balanced(output: &str) {
    let mut depth = 0usize;
    for line in output.lines() {
        let indent = line.chars().take_while(|c| *c == '\t').count();
        let line = line.trim();
        if line == "]" {
            depth = depth.checked_sub(1).expect("unbalanced close");
            assert_eq!(indent, depth, "close at wrong depth: {output}");
        } else {
            assert_eq!(indent, depth, "statement at wrong depth: {line}");
            if line.ends_with('[') {
                depth += 1;
            }
        }
    }
    assert_eq!(depth, 0, "unclosed scope: {output}");
}

#[test]
fn every_fixture_converts_into_a_balanced_stream() {
    let dir = repo_root().join("fixtures");
    let mut seen = 0;
    for entry in fs::read_dir(&dir).expect("fixtures dir") {
        let path = entry.expect("dir entry").path();
        if path.extension().and_then(|e| e.to_str()) != Some("svg") {
            continue;
        }
        let text = fs::read_to_string(&path).expect("read fixture");
        let out = convert_str(&text, &ConvertOptions::default())
            .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
        assert!(out.output.starts_with(HEADER), "{}", path.display());
        assert_balanced(&out.output);
        seen += 1;
    }
    assert!(seen >= 3, "expected the bundled fixtures");
}

#[test]
fn badge_fixture_uses_gradient_and_text() {
    let out = convert_str(&fixture("badge.svg"), &ConvertOptions::default()).unwrap();
    assert!(out.warnings.is_empty(), "{:?}", out.warnings);
    assert!(out.output.contains("bounds 0,0,120,40\n"));
    assert!(out.output.contains("\tfill gradient:[linear 0,0,0,1 from:#4c8eda to:#2a5f9e] relative:yes\n"));
    assert!(out.output.contains("TEXT at:60,26 anchor:center \"svg2ivg\""));
}

#[test]
fn unsized_fixture_takes_the_configured_default() {
    let options: ConvertOptions =
        serde_json::from_str(r#"{"defaultWidth": 64, "defaultHeight": 32}"#).unwrap();
    let out = convert_str(&fixture("unsized.svg"), &options).unwrap();
    assert!(out.output.contains("bounds 0,0,64,32\n"));
    assert_eq!(
        out.warnings,
        vec![
            Warning::MissingDimension {
                attribute: "width",
                assumed: 64.0
            },
            Warning::MissingDimension {
                attribute: "height",
                assumed: 32.0
            },
        ]
    );
}

#[test]
fn malformed_markup_is_reported_with_its_offset() {
    let err = convert_str("<svg><g></svg>", &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, Error::MalformedMarkup { offset: 8, .. }), "{err:?}");
    assert_eq!(
        err.to_string(),
        "Malformed markup at byte 8: expected </g>, found </svg>"
    );
}

use super::{body, convert};
use svg2ivg_core::{ReferenceKind, Warning};

#[test]
fn use_instantiates_a_positioned_copy() {
    assert_eq!(
        body(
            r##"<svg width="10" height="10"><rect id="r" x="0" y="0" width="2" height="2"/><use href="#r" x="5" fill="red"/></svg>"##
        ),
        vec![
            "rect 0,0,2,2",
            "context [",
            "\toffset 5,0",
            "\tcontext [",
            "\t\tfill red",
            "\t\trect 0,0,2,2",
            "\t]",
            "]",
        ]
    );
}

#[test]
fn use_transform_precedes_its_offset() {
    assert_eq!(
        body(
            r##"<svg width="10" height="10"><defs><circle id="dot" cx="1" cy="1" r="1"/></defs><use xlink:href="#dot" transform="scale(2)" x="1" y="1"/></svg>"##
        ),
        vec!["context [", "\tscale 2", "\toffset 1,1", "\tellipse 1,1,1", "]"]
    );
}

#[test]
fn self_referencing_use_is_cut_off() {
    let out = convert(r##"<svg width="1" height="1"><g id="loop"><use href="#loop"/></g></svg>"##);
    assert!(
        out.output
            .ends_with("pen miter-limit:4\ncontext [\n\tcontext [\n\t]\n]\n"),
        "{}",
        out.output
    );
    assert_eq!(
        out.warnings,
        vec![Warning::RecursiveReference {
            reference: "loop".to_string()
        }]
    );
}

#[test]
fn forward_and_missing_references_warn() {
    let out = convert(
        r##"<svg width="1" height="1"><use href="#later"/><use/><rect id="later" x="0" y="0" width="1" height="1"/></svg>"##,
    );
    assert_eq!(
        out.warnings,
        vec![
            Warning::UnresolvedReference {
                kind: ReferenceKind::Use,
                reference: "later".to_string()
            },
            Warning::MissingAttribute {
                element: "use".to_string(),
                attribute: "href"
            },
        ]
    );
}

#[test]
fn definitions_persist_across_roots() {
    let out = convert(
        r##"<svg width="1" height="1"><defs><circle id="dot" cx="1" cy="1" r="1"/></defs></svg>
<svg width="2" height="2"><use href="#dot"/></svg>"##,
    );
    let lines = out.output.lines().collect::<Vec<_>>();
    assert_eq!(
        &lines[4..],
        &[
            "reset",
            "bounds 0,0,2,2",
            "fill black",
            "pen miter-limit:4",
            "ellipse 1,1,1",
        ]
    );
}

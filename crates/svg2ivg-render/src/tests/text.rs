use super::{body, convert};
use svg2ivg_core::Warning;

#[test]
fn tspans_switch_fonts_between_runs() {
    assert_eq!(
        body(
            r#"<svg width="10" height="10"><text x="1" y="2">Hello <tspan fill="red">world</tspan><tspan fill="blue"> again</tspan></text></svg>"#
        ),
        vec![
            "font serif size:16 color:black",
            "TEXT at:1,2 \"Hello \"",
            "font serif size:16 color:red",
            "TEXT \"world\"",
            "font serif size:16 color:blue",
            "TEXT \" again\"",
        ]
    );
}

#[test]
fn equal_styles_share_one_font_statement() {
    assert_eq!(
        body(r#"<svg width="10" height="10"><text>one <tspan>two</tspan></text></svg>"#),
        vec![
            "font serif size:16 color:black",
            "TEXT at:0,0 \"one \"",
            "TEXT \"two\"",
        ]
    );
}

#[test]
fn transformed_text_with_outline() {
    assert_eq!(
        body(
            r##"<svg width="10" height="10"><text x="5" y="6" transform="translate(1,2)" text-anchor="middle" font-family="'Open Sans', sans-serif" font-size="12" stroke="#00f" stroke-width="2">say "hi"</text></svg>"##
        ),
        vec![
            "context [",
            "\toffset 1,2",
            "\tfont [Open Sans] size:12 color:black outline:[#0000ff width:2]",
            "\tTEXT at:5,6 anchor:center \"say \\\"hi\\\"\"",
            "]",
        ]
    );
}

#[test]
fn stroke_none_drops_an_inherited_outline() {
    assert_eq!(
        body(
            r#"<svg width="10" height="10"><text text-anchor="end" stroke="red">a<tspan stroke="none">b</tspan></text></svg>"#
        ),
        vec![
            "font serif size:16 color:black outline:red",
            "TEXT at:0,0 anchor:right \"a\"",
            "font serif size:16 color:black",
            "TEXT \" b\"",
        ]
    );
}

#[test]
fn font_defaults_are_scoped_to_their_root() {
    let out = convert(
        r#"<svg width="1" height="1" font-family="Arial" font-size="20"><text>a</text></svg>
<svg width="1" height="1"><text>b</text></svg>"#,
    );
    let fonts = out
        .output
        .lines()
        .filter(|l| l.starts_with("font "))
        .collect::<Vec<_>>();
    assert_eq!(
        fonts,
        vec!["font Arial size:20 color:black", "font serif size:16 color:black"]
    );
}

#[test]
fn foreign_text_children_are_skipped() {
    let out = convert(r#"<svg width="1" height="1"><text>a<b>x</b></text></svg>"#);
    assert_eq!(
        out.warnings,
        vec![Warning::UnsupportedTextChild {
            name: "b".to_string()
        }]
    );
    assert!(out.output.ends_with("TEXT at:0,0 \"a\"\n"));
}

#[test]
fn empty_text_emits_nothing() {
    assert!(body(r#"<svg width="1" height="1"><text>   </text></svg>"#).is_empty());
}

#[test]
fn tspan_fill_keeps_inherited_opacity() {
    assert_eq!(
        body(
            r#"<svg width="1" height="1"><text opacity="0.5" fill-opacity="0.5"><tspan fill="red">x</tspan></text></svg>"#
        ),
        vec!["font serif size:16 color:red opacity:0.25", "TEXT at:0,0 \"x\""]
    );
}

use super::{body, convert_err};
use svg2ivg_core::Error;

#[test]
fn two_stop_gradient_uses_shorthand() {
    assert_eq!(
        body(
            r##"<svg width="10" height="10"><defs><linearGradient id="g">
  <stop offset="0" stop-color="red"/>
  <stop offset="100%" stop-color="blue" stop-opacity="0.5"/>
</linearGradient></defs><rect x="0" y="0" width="10" height="10" fill="url(#g)"/></svg>"##
        ),
        vec![
            "context [",
            "\tfill gradient:[linear 0,0,1,0 from:red to:rgb(0,0,1,0.5)] relative:yes",
            "\trect 0,0,10,10",
            "]",
        ]
    );
}

#[test]
fn other_stop_layouts_use_a_stop_list() {
    assert_eq!(
        body(
            r##"<svg width="10" height="10"><radialGradient id="r" gradientUnits="userSpaceOnUse" cx="50%" r="2" gradientTransform="rotate(45)">
  <stop offset="0.2" style="stop-color: #102030; stop-opacity: 0.5"/>
  <stop offset="1" stop-color="cornflowerblue"/>
  <stop offset="0.5"/>
</radialGradient><circle cx="1" cy="1" r="1" stroke="url(#r)"/></svg>"##
        ),
        vec![
            "context [",
            "\tpen gradient:[radial 5,5,2 stops:[0.2,#10203080,1,#6495ed]] transform:[rotate 45]",
            "\tellipse 1,1,1",
            "]",
        ]
    );
}

#[test]
fn gradient_without_stops_inherits_from_href() {
    assert_eq!(
        body(
            r##"<svg width="10" height="10"><defs>
  <linearGradient id="base"><stop offset="0" stop-color="white"/><stop offset="1" stop-color="black"/></linearGradient>
  <linearGradient id="derived" xlink:href="#base" x1="0" x2="0" y2="1"/>
</defs><path d="M0 0" fill="url(#derived)"/></svg>"##
        ),
        vec![
            "context [",
            "\tfill gradient:[linear 0,0,0,1 from:white to:black] relative:yes",
            "\tpath svg:[M0 0]",
            "]",
        ]
    );
}

#[test]
fn pattern_paint_embeds_its_rendered_body() {
    assert_eq!(
        body(
            r##"<svg width="10" height="10"><defs><pattern id="p" x="1" width="4" height="4" patternUnits="userSpaceOnUse">
  <rect x="0" y="0" width="2" height="2" fill="red"/>
</pattern></defs><rect x="0" y="0" width="10" height="10" fill="url(#p)"/></svg>"##
        ),
        vec![
            "context [",
            "\tfill pattern:[bounds 0,0,4,4; context [; fill red; rect 0,0,2,2; ]] transform:[offset 1,0]",
            "\trect 0,0,10,10",
            "]",
        ]
    );
}

#[test]
fn relative_pattern_percentages_are_fractions() {
    assert_eq!(
        body(
            r##"<svg width="10" height="10"><pattern id="p" width="25%" height="0.5"/><path d="M0 0" fill="url(#p)"/></svg>"##
        ),
        vec![
            "context [",
            "\tfill pattern:[bounds 0,0,0.25,0.5] relative:yes",
            "\tpath svg:[M0 0]",
            "]",
        ]
    );
}

#[test]
fn definition_ids_keep_their_case() {
    assert_eq!(
        convert_err(
            r##"<svg width="1" height="1"><linearGradient id="Grad"/><path d="" fill="url(#grad)"/></svg>"##
        ),
        Error::UnrecognizedPaintReference {
            value: "url(#grad)".to_string()
        }
    );
}

#[test]
fn later_gradient_with_same_id_wins() {
    let lines = body(
        r##"<svg width="1" height="1">
<linearGradient id="g"><stop offset="0" stop-color="red"/></linearGradient>
<linearGradient id="g"><stop offset="0" stop-color="lime"/></linearGradient>
<path d="" fill="url(#g)"/></svg>"##,
    );
    assert_eq!(lines[1], "\tfill gradient:[linear 0,0,1,0 stops:[0,lime]] relative:yes");
}

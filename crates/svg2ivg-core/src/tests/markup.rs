use crate::markup::expand_style;
use crate::*;

fn only_root(src: &str) -> Node {
    let mut doc = parse_markup(src).unwrap();
    assert_eq!(doc.nodes.len(), 1, "expected one top-level element");
    doc.nodes.remove(0)
}

#[test]
fn parses_nested_elements_attributes_and_text() {
    let root = only_root(
        r#"<?xml version="1.0"?>
<!DOCTYPE svg>
<!-- header -->
<svg width="10" height='20'><g id="a"><rect x="1"/></g><text>Hi &amp; bye</text></svg>"#,
    );
    assert_eq!(root.name, "svg");
    assert_eq!(root.attr("width"), Some("10"));
    assert_eq!(root.attr("height"), Some("20"));

    let children = root.elements().collect::<Vec<_>>();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].name, "g");
    assert_eq!(children[0].elements().next().unwrap().attr("x"), Some("1"));
    assert_eq!(
        children[1].children,
        vec![Item::Text("Hi &amp; bye".to_string())]
    );
}

#[test]
fn attribute_order_is_preserved() {
    let root = only_root(r#"<rect z="1" a="2" m="3"/>"#);
    let keys = root.attributes.keys().map(String::as_str).collect::<Vec<_>>();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn whitespace_before_text_runs_is_skipped_but_trailing_is_kept() {
    let root = only_root("<text>\n   Hello <tspan>world</tspan>  again </text>");
    assert_eq!(root.children.len(), 3);
    assert_eq!(root.children[0], Item::Text("Hello ".to_string()));
    assert_eq!(root.children[2], Item::Text("again ".to_string()));
}

#[test]
fn attribute_without_value_is_empty() {
    let root = only_root("<svg hidden></svg>");
    assert_eq!(root.attr("hidden"), Some(""));
}

#[test]
fn cdata_becomes_text() {
    let root = only_root("<text><![CDATA[a < b]]></text>");
    assert_eq!(root.children, vec![Item::Text("a < b".to_string())]);
}

#[test]
fn mismatched_close_tag_reports_offset() {
    let err = parse_markup("<svg><g></svg>").unwrap_err();
    assert_eq!(
        err,
        Error::MalformedMarkup {
            offset: 8,
            message: "expected </g>, found </svg>".to_string()
        }
    );
}

#[test]
fn missing_gt_is_malformed() {
    let err = parse_markup(r#"<svg width="1"<g/></svg>"#).unwrap_err();
    assert!(matches!(err, Error::MalformedMarkup { offset: 14, .. }), "{err:?}");
}

#[test]
fn unclosed_element_is_malformed() {
    let err = parse_markup("<svg><g>").unwrap_err();
    assert!(matches!(err, Error::MalformedMarkup { offset: 5, .. }), "{err:?}");
}

#[test]
fn unterminated_attribute_value_is_malformed() {
    let err = parse_markup(r#"<svg width="10></svg>"#).unwrap_err();
    assert!(matches!(err, Error::MalformedMarkup { .. }), "{err:?}");
}

#[test]
fn stray_close_tag_is_malformed() {
    let err = parse_markup("</svg>").unwrap_err();
    assert!(matches!(err, Error::MalformedMarkup { offset: 0, .. }), "{err:?}");
}

#[test]
fn style_declarations_override_attributes() {
    let mut attrs = Attributes::new();
    attrs.insert("fill".to_string(), "red".to_string());
    attrs.insert(
        "style".to_string(),
        "FILL: blue !important; stroke:url(#a:b);;bogus".to_string(),
    );
    expand_style(&mut attrs);
    assert_eq!(attrs.get("fill").map(String::as_str), Some("blue"));
    assert_eq!(attrs.get("stroke").map(String::as_str), Some("url(#a:b)"));
    assert!(!attrs.contains_key("style"));
}

#[test]
fn element_structure_matches_roxmltree_on_well_formed_input() {
    let src = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50">
  <defs><linearGradient id="g"><stop offset="0" stop-color="red"/></linearGradient></defs>
  <g transform="translate(1,2)"><circle cx="5" cy="5" r="2"/><path d="M0 0L1 1"/></g>
  <text x="1" y="2">a<tspan fill="#fff">b</tspan></text>
</svg>"##;

    fn names(node: &Node, out: &mut Vec<String>) {
        out.push(node.name.clone());
        for child in node.elements() {
            names(child, out);
        }
    }
    fn rox_names(node: roxmltree::Node<'_, '_>, out: &mut Vec<String>) {
        out.push(node.tag_name().name().to_string());
        for child in node.children().filter(|c| c.is_element()) {
            rox_names(child, out);
        }
    }

    let ours = only_root(src);
    let mut a = Vec::new();
    names(&ours, &mut a);

    let rox = roxmltree::Document::parse(src).unwrap();
    let mut b = Vec::new();
    rox_names(rox.root_element(), &mut b);

    assert_eq!(a, b);
}

use crate::transform::{decompose_transform, join_ops};
use crate::*;

fn ops(value: &str) -> (Vec<TransformOp>, Diagnostics) {
    let mut diag = Diagnostics::new();
    let ops = decompose_transform(value, &Viewport::default(), &mut diag).unwrap();
    (ops, diag)
}

#[test]
fn chain_is_kept_in_textual_order() {
    let (ops, diag) = ops("translate(10) scale(2, 3) rotate(45)");
    assert!(diag.is_empty());
    assert_eq!(
        ops,
        vec![
            TransformOp::Offset { x: 10.0, y: 0.0 },
            TransformOp::Scale {
                x: 2.0,
                y: Some(3.0)
            },
            TransformOp::Rotate {
                degrees: 45.0,
                anchor: None
            },
        ]
    );
    assert_eq!(join_ops(&ops), "offset 10,0; scale 2,3; rotate 45");
}

#[test]
fn rotate_with_center_gets_an_anchor() {
    let (ops, _) = ops("rotate(90 5 5)");
    assert_eq!(ops[0].to_string(), "rotate 90 anchor:5,5");
}

#[test]
fn skew_becomes_shear_tangent() {
    let (ops, _) = ops("skewX(45) skewY(0)");
    let TransformOp::Shear { x, y } = ops[0] else {
        panic!("expected shear, got {:?}", ops[0]);
    };
    assert!((x - 1.0).abs() < 1e-12);
    assert_eq!(y, 0.0);
    assert_eq!(ops[1].to_string(), "shear 0,0");
}

#[test]
fn matrix_requires_six_parameters() {
    let (ops, diag) = ops("matrix(1 0 0 1 5 6) matrix(1 2 3)");
    assert_eq!(ops, vec![TransformOp::Matrix([1.0, 0.0, 0.0, 1.0, 5.0, 6.0])]);
    assert_eq!(diag.warnings(), &[Warning::MatrixArity { count: 3 }]);
}

#[test]
fn unknown_functions_warn_and_are_skipped() {
    let (ops, diag) = ops("perspective(3) translate(1,2)");
    assert_eq!(ops, vec![TransformOp::Offset { x: 1.0, y: 2.0 }]);
    assert_eq!(
        diag.warnings(),
        &[Warning::UnsupportedTransform {
            name: "perspective".to_string()
        }]
    );
}

#![forbid(unsafe_code)]

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Rect = euclid::Rect<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn rect(left: f64, top: f64, width: f64, height: f64) -> Rect {
    euclid::rect(left, top, width, height)
}

/// Axis-aligned bounds of a point list, or `None` when the list is empty.
///
/// Unlike `euclid::Rect::from_points`, the result keeps zero-extent boxes (a horizontal line
/// still has a left/top corner and a width).
pub fn bounds_of(points: &[Point]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in rest {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(rect(min_x, min_y, max_x - min_x, max_y - min_y))
}

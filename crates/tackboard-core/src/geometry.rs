//! Rectangle and distance helpers on top of kurbo.

use kurbo::{Point, Rect};

use crate::arrow::Arrow;
use crate::item::CanvasItem;

/// Bounds reported for an empty board. Keeps downstream math finite.
pub const EMPTY_BOUNDS: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);

/// Build a rectangle from a top-left origin and extent.
pub fn rect_from_origin(origin: Point, width: f64, height: f64) -> Rect {
    Rect::new(origin.x, origin.y, origin.x + width, origin.y + height)
}

/// Expand a rectangle outward by `margin` on every side.
pub fn expand(rect: Rect, margin: f64) -> Rect {
    rect.inflate(margin, margin)
}

/// Overlap test matching the culling contract: rectangles that merely
/// share an edge do not intersect, a 1-unit overlap does.
pub fn rects_intersect(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && a.x1 > b.x0 && a.y0 < b.y1 && a.y1 > b.y0
}

/// Distance from a point to a line segment.
pub fn point_to_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq < f64::EPSILON {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * ab.x + (p.y - a.y) * ab.y) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + ab.x * t, a.y + ab.y * t))
}

/// Union of all item and arrow bounds.
///
/// An empty board yields [`EMPTY_BOUNDS`] rather than an inverted or
/// infinite rectangle.
pub fn content_bounds(items: &[CanvasItem], arrows: &[Arrow]) -> Rect {
    let mut result: Option<Rect> = None;
    for item in items {
        let bounds = item.bounds();
        result = Some(match result {
            Some(r) => r.union(bounds),
            None => bounds,
        });
    }
    for arrow in arrows {
        let bounds = arrow.bounds();
        result = Some(match result {
            Some(r) => r.union(bounds),
            None => bounds,
        });
    }
    result.unwrap_or(EMPTY_BOUNDS)
}

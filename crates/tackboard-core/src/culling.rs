//! Viewport culling: which items need rendering this frame.

use kurbo::{Rect, Size};

use crate::geometry::{expand, rects_intersect};
use crate::item::CanvasItem;
use crate::transform::Transform;

/// Extra canvas-space margin around the viewport so items entering the
/// view during a pan are already rendered.
pub const CULL_MARGIN: f64 = 100.0;

/// Result of a culling pass.
#[derive(Debug, Clone)]
pub struct VisibleSet<'a> {
    /// Items intersecting the expanded viewport, in board order.
    pub items: Vec<&'a CanvasItem>,
    /// The canvas-space viewport the pass was computed against.
    pub viewport_bounds: Rect,
}

/// Filter items to those visible on a screen of the given size.
pub fn visible_items<'a>(
    items: &'a [CanvasItem],
    screen_size: Size,
    transform: &Transform,
) -> VisibleSet<'a> {
    if items.is_empty() {
        return VisibleSet {
            items: Vec::new(),
            viewport_bounds: Rect::ZERO,
        };
    }

    let viewport_bounds = transform.viewport_bounds(screen_size);
    let cull_bounds = expand(viewport_bounds, CULL_MARGIN);
    let items = items
        .iter()
        .filter(|item| rects_intersect(item.bounds(), cull_bounds))
        .collect();

    VisibleSet {
        items,
        viewport_bounds,
    }
}

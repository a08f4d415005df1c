//! Corner resize handles for the selected item.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// How close (in canvas units at zoom 1) a pointer must be to a handle
/// center to grab it.
pub const HANDLE_HIT_TOLERANCE: f64 = 12.0;

/// The four corners of an item's bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Position of this corner on the given rectangle.
    pub fn position(&self, bounds: Rect) -> Point {
        match self {
            Corner::TopLeft => Point::new(bounds.x0, bounds.y0),
            Corner::TopRight => Point::new(bounds.x1, bounds.y0),
            Corner::BottomLeft => Point::new(bounds.x0, bounds.y1),
            Corner::BottomRight => Point::new(bounds.x1, bounds.y1),
        }
    }

    /// The diagonally opposite corner.
    pub fn opposite(&self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }

    /// The point that stays fixed while this corner is dragged.
    pub fn anchor(&self, bounds: Rect) -> Point {
        self.opposite().position(bounds)
    }

    pub fn is_left(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    pub fn is_top(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }
}

/// A resize handle rendered at a corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub corner: Corner,
    pub position: Point,
}

/// Handles for all four corners of the given bounds.
pub fn corner_handles(bounds: Rect) -> [Handle; 4] {
    Corner::ALL.map(|corner| Handle {
        corner,
        position: corner.position(bounds),
    })
}

/// Which corner handle, if any, the point grabs.
pub fn hit_test_corner(bounds: Rect, point: Point, tolerance: f64) -> Option<Corner> {
    let tol_sq = tolerance * tolerance;
    Corner::ALL.into_iter().find(|corner| {
        let handle = corner.position(bounds);
        let dx = point.x - handle.x;
        let dy = point.y - handle.y;
        dx * dx + dy * dy <= tol_sq
    })
}

//! Directional connector arrows.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::point_to_segment_distance;

/// Drags shorter than this (in canvas units) are discarded as accidental
/// clicks instead of committing a tiny arrow.
pub const MIN_ARROW_LENGTH: f64 = 15.0;
/// Radius of the endpoint grab circles, in canvas units.
pub const ENDPOINT_RADIUS: f64 = 12.0;

/// One end of an arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    Start,
    End,
}

/// A straight connector with a head at `end`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arrow {
    pub id: String,
    pub start: Point,
    pub end: Point,
    /// At most one arrow on the board is selected at a time.
    #[serde(default)]
    pub selected: bool,
}

impl Arrow {
    /// Create a new arrow between two canvas points.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            start,
            end,
            selected: false,
        }
    }

    /// Euclidean length of the shaft.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Canvas-space bounding rectangle of both endpoints.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
    }

    /// Move both endpoints by the same delta.
    pub fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    pub fn endpoint(&self, which: Endpoint) -> Point {
        match which {
            Endpoint::Start => self.start,
            Endpoint::End => self.end,
        }
    }

    pub fn set_endpoint(&mut self, which: Endpoint, p: Point) {
        match which {
            Endpoint::Start => self.start = p,
            Endpoint::End => self.end = p,
        }
    }

    /// Which endpoint circle the point falls in, if any. Start wins when
    /// the circles overlap.
    pub fn hit_test_endpoint(&self, point: Point, radius: f64) -> Option<Endpoint> {
        if point.distance(self.start) <= radius {
            Some(Endpoint::Start)
        } else if point.distance(self.end) <= radius {
            Some(Endpoint::End)
        } else {
            None
        }
    }

    /// Whether the point lies within `tolerance` of the shaft.
    pub fn hit_test_body(&self, point: Point, tolerance: f64) -> bool {
        point_to_segment_distance(point, self.start, self.end) <= tolerance
    }
}

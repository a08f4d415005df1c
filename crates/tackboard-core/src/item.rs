//! Canvas items: images and text placed on the board.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::rect_from_origin;

/// Minimum width/height an item can be resized to, in canvas units.
pub const MIN_ITEM_SIZE: f64 = 20.0;
/// Minimum font size for text items.
pub const MIN_FONT_SIZE: f64 = 10.0;
/// Font size given to new text items.
pub const DEFAULT_FONT_SIZE: f64 = 20.0;
/// Extent assumed for items that have not reported a size yet.
pub const DEFAULT_ITEM_SIZE: f64 = 100.0;

/// What kind of content an item carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Image,
    Text,
}

/// Crop region of an image item, in source-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub natural_width: f64,
    pub natural_height: f64,
}

/// An image or text element on the board.
///
/// Position and size live in canvas space. The external store owns the
/// collection; the interaction engine mutates items only through the
/// store's replace calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasItem {
    pub id: String,
    pub kind: ItemKind,
    /// Canvas-space top-left corner.
    pub position: Point,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    /// Font size in canvas units (text items only).
    #[serde(default)]
    pub font_size: Option<f64>,
    /// Selection flag doubling as z-order: the selected item (1) renders
    /// on top of everything else (0).
    #[serde(default)]
    pub z_index: u8,
    /// Image source or text value.
    pub content: String,
    #[serde(default)]
    pub crop: Option<Crop>,
}

impl CanvasItem {
    /// Create an image item at the given canvas position.
    pub fn image(content: impl Into<String>, position: Point) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: ItemKind::Image,
            position,
            width: None,
            height: None,
            font_size: None,
            z_index: 0,
            content: content.into(),
            crop: None,
        }
    }

    /// Create a text item at the given canvas position.
    pub fn text(content: impl Into<String>, position: Point) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: ItemKind::Text,
            position,
            width: None,
            height: None,
            font_size: Some(DEFAULT_FONT_SIZE),
            z_index: 0,
            content: content.into(),
            crop: None,
        }
    }

    /// Current extent, falling back to the default for unsized items.
    pub fn size(&self) -> (f64, f64) {
        (
            self.width.unwrap_or(DEFAULT_ITEM_SIZE),
            self.height.unwrap_or(DEFAULT_ITEM_SIZE),
        )
    }

    /// Canvas-space bounding rectangle.
    pub fn bounds(&self) -> Rect {
        let (width, height) = self.size();
        rect_from_origin(self.position, width, height)
    }

    /// Width-over-height ratio, guarded against a zero height.
    pub fn aspect_ratio(&self) -> f64 {
        let (width, height) = self.size();
        width / height.max(f64::EPSILON)
    }

    pub fn is_selected(&self) -> bool {
        self.z_index == 1
    }

    pub fn contains(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }
}

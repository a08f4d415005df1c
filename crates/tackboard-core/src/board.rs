//! Board content store: items, arrows, and selection state.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::arrow::{Arrow, ENDPOINT_RADIUS, Endpoint};
use crate::geometry::content_bounds;
use crate::item::{CanvasItem, Crop};

/// Which part of an arrow a hit test landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowHit {
    Endpoint(Endpoint),
    Body,
}

/// Errors from loading or saving a board.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Owns the item and arrow collections.
///
/// Mutation goes through whole-collection replacement: callers hand in a
/// pure transform over the owned `Vec` and get the result installed
/// atomically. The convenience methods below are all built on that
/// contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardStore {
    items: Vec<CanvasItem>,
    arrows: Vec<Arrow>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CanvasItem] {
        &self.items
    }

    pub fn arrows(&self) -> &[Arrow] {
        &self.arrows
    }

    /// Replace the item collection with a transformed copy.
    pub fn replace_items<F>(&mut self, f: F)
    where
        F: FnOnce(Vec<CanvasItem>) -> Vec<CanvasItem>,
    {
        let items = std::mem::take(&mut self.items);
        self.items = f(items);
    }

    /// Replace the arrow collection with a transformed copy.
    pub fn replace_arrows<F>(&mut self, f: F)
    where
        F: FnOnce(Vec<Arrow>) -> Vec<Arrow>,
    {
        let arrows = std::mem::take(&mut self.arrows);
        self.arrows = f(arrows);
    }

    pub fn add_item(&mut self, item: CanvasItem) {
        self.replace_items(|mut items| {
            items.push(item);
            items
        });
    }

    /// Apply an edit to the item with the given id, if present.
    pub fn update_item<F>(&mut self, id: &str, f: F)
    where
        F: FnOnce(&mut CanvasItem),
    {
        let mut f = Some(f);
        self.replace_items(|mut items| {
            if let Some(item) = items.iter_mut().find(|item| item.id == id) {
                if let Some(f) = f.take() {
                    f(item);
                }
            }
            items
        });
    }

    /// Set or clear the crop region of an image item.
    pub fn update_item_crop(&mut self, id: &str, crop: Option<Crop>) {
        self.update_item(id, |item| item.crop = crop);
    }

    pub fn remove_item(&mut self, id: &str) {
        self.replace_items(|mut items| {
            items.retain(|item| item.id != id);
            items
        });
    }

    pub fn clear_items(&mut self) {
        self.replace_items(|_| Vec::new());
    }

    /// Mark one item selected and everything else deselected. Selection
    /// doubles as z-order, so the selected item renders on top.
    pub fn select_item(&mut self, id: &str) {
        self.replace_items(|mut items| {
            for item in &mut items {
                item.z_index = u8::from(item.id == id);
            }
            items
        });
    }

    pub fn deselect_items(&mut self) {
        self.replace_items(|mut items| {
            for item in &mut items {
                item.z_index = 0;
            }
            items
        });
    }

    pub fn item(&self, id: &str) -> Option<&CanvasItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn selected_item(&self) -> Option<&CanvasItem> {
        self.items.iter().find(|item| item.is_selected())
    }

    /// The item under a canvas point. The selected item wins because it
    /// renders on top; otherwise later items (drawn later) win.
    pub fn item_at_point(&self, point: Point) -> Option<&CanvasItem> {
        self.items
            .iter()
            .find(|item| item.is_selected() && item.contains(point))
            .or_else(|| self.items.iter().rev().find(|item| item.contains(point)))
    }

    pub fn add_arrow(&mut self, arrow: Arrow) {
        self.replace_arrows(|mut arrows| {
            arrows.push(arrow);
            arrows
        });
    }

    /// Apply an edit to the arrow with the given id, if present.
    pub fn update_arrow<F>(&mut self, id: &str, f: F)
    where
        F: FnOnce(&mut Arrow),
    {
        let mut f = Some(f);
        self.replace_arrows(|mut arrows| {
            if let Some(arrow) = arrows.iter_mut().find(|arrow| arrow.id == id) {
                if let Some(f) = f.take() {
                    f(arrow);
                }
            }
            arrows
        });
    }

    pub fn remove_arrow(&mut self, id: &str) {
        self.replace_arrows(|mut arrows| {
            arrows.retain(|arrow| arrow.id != id);
            arrows
        });
    }

    pub fn clear_arrows(&mut self) {
        self.replace_arrows(|_| Vec::new());
    }

    /// Select one arrow, deselecting all others.
    pub fn select_arrow(&mut self, id: &str) {
        self.replace_arrows(|mut arrows| {
            for arrow in &mut arrows {
                arrow.selected = arrow.id == id;
            }
            arrows
        });
    }

    pub fn deselect_arrows(&mut self) {
        self.replace_arrows(|mut arrows| {
            for arrow in &mut arrows {
                arrow.selected = false;
            }
            arrows
        });
    }

    pub fn selected_arrow(&self) -> Option<&Arrow> {
        self.arrows.iter().find(|arrow| arrow.selected)
    }

    /// The arrow under a canvas point, with the part that was hit.
    ///
    /// Endpoint circles exist only on the selected arrow and take
    /// priority over any body. Body hits go to the topmost (latest)
    /// arrow within `tolerance` of its shaft.
    pub fn arrow_at_point(&self, point: Point, tolerance: f64) -> Option<(&Arrow, ArrowHit)> {
        if let Some(arrow) = self.selected_arrow() {
            if let Some(endpoint) = arrow.hit_test_endpoint(point, ENDPOINT_RADIUS) {
                return Some((arrow, ArrowHit::Endpoint(endpoint)));
            }
        }
        self.arrows
            .iter()
            .rev()
            .find(|arrow| arrow.hit_test_body(point, tolerance))
            .map(|arrow| (arrow, ArrowHit::Body))
    }

    /// Union of all content bounds. Empty boards report a fixed
    /// finite rectangle.
    pub fn content_bounds(&self) -> Rect {
        content_bounds(&self.items, &self.arrows)
    }

    /// Serialize the whole board to JSON.
    pub fn to_json(&self) -> Result<String, BoardError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load a board from JSON.
    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        Ok(serde_json::from_str(json)?)
    }
}

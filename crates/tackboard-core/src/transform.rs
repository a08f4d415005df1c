//! Pure mapping between screen pixels and canvas space.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default zoom range of the interactive viewport.
pub const DEFAULT_MIN_ZOOM: f64 = 0.1;
pub const DEFAULT_MAX_ZOOM: f64 = 5.0;

/// Zoom range used by fit-to-screen, wider than the interactive range so
/// a programmatic fit can frame very small or very large content.
const FIT_MIN_ZOOM: f64 = 0.1;
const FIT_MAX_ZOOM: f64 = 10.0;

/// A transform that would break coordinate math, caught at assignment.
#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    #[error("zoom must be finite and positive, got {0}")]
    InvalidZoom(f64),
    #[error("pan must be finite, got ({0}, {1})")]
    InvalidPan(f64, f64),
}

/// Affine mapping between screen pixels and canvas space.
///
/// Pan is expressed in canvas units: it is multiplied by zoom on the way
/// to the screen. Every call site must keep this convention or the two
/// directions stop round-tripping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        zoom: 1.0,
        pan_x: 0.0,
        pan_y: 0.0,
    };

    /// Create a transform from raw components.
    pub fn new(zoom: f64, pan_x: f64, pan_y: f64) -> Self {
        Self { zoom, pan_x, pan_y }
    }

    /// Validate raw components. Zero, negative, or non-finite zoom and
    /// non-finite pan are rejected here so they never reach the
    /// coordinate math below.
    pub fn checked(zoom: f64, pan_x: f64, pan_y: f64) -> Result<Self, TransformError> {
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(TransformError::InvalidZoom(zoom));
        }
        if !pan_x.is_finite() || !pan_y.is_finite() {
            return Err(TransformError::InvalidPan(pan_x, pan_y));
        }
        Ok(Self { zoom, pan_x, pan_y })
    }

    /// Convert a screen point to canvas coordinates.
    pub fn screen_to_canvas(&self, p: Point) -> Point {
        Point::new(p.x / self.zoom - self.pan_x, p.y / self.zoom - self.pan_y)
    }

    /// Convert a canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, p: Point) -> Point {
        Point::new(
            p.x * self.zoom + self.pan_x * self.zoom,
            p.y * self.zoom + self.pan_y * self.zoom,
        )
    }

    /// Convert a canvas-space rectangle to screen coordinates.
    pub fn canvas_to_screen_rect(&self, rect: Rect) -> Rect {
        let origin = self.canvas_to_screen(rect.origin());
        Rect::new(
            origin.x,
            origin.y,
            origin.x + rect.width() * self.zoom,
            origin.y + rect.height() * self.zoom,
        )
    }

    /// Change zoom while keeping the canvas point under `screen_point`
    /// fixed under it. The anchor is the cursor, never the canvas origin.
    pub fn zoom_around(
        &self,
        screen_point: Point,
        new_zoom: f64,
        min_zoom: f64,
        max_zoom: f64,
    ) -> Transform {
        let new_zoom = new_zoom.clamp(min_zoom, max_zoom);
        let anchor = self.screen_to_canvas(screen_point);
        Transform {
            zoom: new_zoom,
            pan_x: screen_point.x / new_zoom - anchor.x,
            pan_y: screen_point.y / new_zoom - anchor.y,
        }
    }

    /// The canvas-space rectangle currently visible on a screen of the
    /// given size.
    pub fn viewport_bounds(&self, screen_size: Size) -> Rect {
        let tl = self.screen_to_canvas(Point::ZERO);
        let br = self.screen_to_canvas(Point::new(screen_size.width, screen_size.height));
        Rect::new(
            tl.x.min(br.x),
            tl.y.min(br.y),
            tl.x.max(br.x),
            tl.y.max(br.y),
        )
    }

    /// Transform that fits `rect` (plus padding) on screen, centered.
    pub fn fit_rect_to_screen(rect: Rect, screen_size: Size, padding: f64) -> Transform {
        let scale_x = (screen_size.width - padding * 2.0) / rect.width().max(1.0);
        let scale_y = (screen_size.height - padding * 2.0) / rect.height().max(1.0);
        let zoom = scale_x.min(scale_y).clamp(FIT_MIN_ZOOM, FIT_MAX_ZOOM);

        let center = rect.center();
        Transform {
            zoom,
            pan_x: (screen_size.width / 2.0 - center.x * zoom) / zoom,
            pan_y: (screen_size.height / 2.0 - center.y * zoom) / zoom,
        }
    }
}

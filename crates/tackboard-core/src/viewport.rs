//! Interactive viewport: zoom, pan, and fit-to-content.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::input::{Modifiers, MouseButton};
use crate::transform::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, Transform, TransformError};

/// Wheel zoom factor per notch, away and toward.
pub const ZOOM_STEP_OUT: f64 = 0.9;
pub const ZOOM_STEP_IN: f64 = 1.1;

/// Default multiplier applied to raw pan deltas.
pub const DEFAULT_PAN_DAMPING: f64 = 1.5;

/// Zoomable, pannable view over the canvas.
///
/// Wheel input zooms around the cursor; drag input pans with a damping
/// factor that shrinks as zoom grows, so the canvas moves at a steady
/// perceived speed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    pub transform: Transform,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Pan speed multiplier. Tune per input device.
    pub pan_damping: f64,
    #[serde(skip)]
    is_panning: bool,
    #[serde(skip)]
    last_pointer: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            pan_damping: DEFAULT_PAN_DAMPING,
            is_panning: false,
            last_pointer: Point::ZERO,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_panning(&self) -> bool {
        self.is_panning
    }

    pub fn screen_to_canvas(&self, p: Point) -> Point {
        self.transform.screen_to_canvas(p)
    }

    pub fn canvas_to_screen(&self, p: Point) -> Point {
        self.transform.canvas_to_screen(p)
    }

    /// Set zoom directly, clamped to the viewport's range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.transform.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    pub fn set_pan(&mut self, pan_x: f64, pan_y: f64) {
        self.transform.pan_x = pan_x;
        self.transform.pan_y = pan_y;
    }

    /// Install a transform after validating it. The zoom is clamped to
    /// the viewport's range once it passes validation.
    pub fn set_transform(&mut self, transform: Transform) -> Result<(), TransformError> {
        let checked = Transform::checked(transform.zoom, transform.pan_x, transform.pan_y)?;
        self.transform = checked;
        self.transform.zoom = checked.zoom.clamp(self.min_zoom, self.max_zoom);
        Ok(())
    }

    /// Zoom one wheel notch around the cursor. Positive `delta_y`
    /// (scrolling down) zooms out.
    pub fn on_wheel(&mut self, screen_point: Point, delta_y: f64) {
        let factor = if delta_y > 0.0 {
            ZOOM_STEP_OUT
        } else {
            ZOOM_STEP_IN
        };
        self.transform = self.transform.zoom_around(
            screen_point,
            self.transform.zoom * factor,
            self.min_zoom,
            self.max_zoom,
        );
    }

    /// Start a pan if the press is a pan trigger: middle button, or left
    /// button with ctrl/meta held. Returns whether panning began.
    pub fn pan_start(
        &mut self,
        screen_point: Point,
        button: MouseButton,
        modifiers: Modifiers,
    ) -> bool {
        let trigger = button == MouseButton::Middle
            || (button == MouseButton::Left && modifiers.command());
        if trigger {
            self.is_panning = true;
            self.last_pointer = screen_point;
        }
        trigger
    }

    /// Advance an active pan to the new pointer position.
    pub fn pan_move(&mut self, screen_point: Point) {
        if !self.is_panning {
            return;
        }
        let delta = screen_point - self.last_pointer;
        let scale = self.pan_damping / self.transform.zoom.max(f64::MIN_POSITIVE).sqrt();
        self.transform.pan_x += delta.x * scale;
        self.transform.pan_y += delta.y * scale;
        self.last_pointer = screen_point;
    }

    /// End any active pan. Safe to call when no pan is active.
    pub fn pan_end(&mut self) {
        self.is_panning = false;
    }

    /// The canvas-space rectangle currently visible.
    pub fn viewport_bounds(&self, screen_size: Size) -> Rect {
        self.transform.viewport_bounds(screen_size)
    }

    /// Frame the given canvas rectangle on screen.
    pub fn fit_to_content(&mut self, bounds: Rect, screen_size: Size, padding: f64) {
        let mut fitted = Transform::fit_rect_to_screen(bounds, screen_size, padding);
        fitted.zoom = fitted.zoom.clamp(self.min_zoom, self.max_zoom);
        self.transform = fitted;
    }

    /// Back to identity: zoom 1, no pan.
    pub fn reset(&mut self) {
        self.transform = Transform::IDENTITY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_zoom_out_and_in() {
        let mut viewport = Viewport::new();
        viewport.on_wheel(Point::new(400.0, 300.0), 1.0);
        assert!((viewport.transform.zoom - 0.9).abs() < f64::EPSILON);

        viewport.on_wheel(Point::new(400.0, 300.0), -1.0);
        assert!((viewport.transform.zoom - 0.99).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_keeps_cursor_point_fixed() {
        let mut viewport = Viewport::new();
        viewport.set_pan(25.0, -40.0);
        let cursor = Point::new(200.0, 150.0);
        let before = viewport.screen_to_canvas(cursor);

        viewport.on_wheel(cursor, -1.0);
        let after = viewport.screen_to_canvas(cursor);

        assert!((after.x - before.x).abs() < 1e-6);
        assert!((after.y - before.y).abs() < 1e-6);
    }

    #[test]
    fn test_wheel_zoom_clamps_at_range() {
        let mut viewport = Viewport::new();
        viewport.set_zoom(5.0);
        viewport.on_wheel(Point::new(0.0, 0.0), -1.0);
        assert!((viewport.transform.zoom - 5.0).abs() < f64::EPSILON);

        viewport.set_zoom(0.1);
        viewport.on_wheel(Point::new(0.0, 0.0), 1.0);
        assert!((viewport.transform.zoom - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pan_triggers() {
        let mut viewport = Viewport::new();
        let p = Point::new(100.0, 100.0);

        assert!(viewport.pan_start(p, MouseButton::Middle, Modifiers::default()));
        viewport.pan_end();

        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        assert!(viewport.pan_start(p, MouseButton::Left, ctrl));
        viewport.pan_end();

        let meta = Modifiers {
            meta: true,
            ..Modifiers::default()
        };
        assert!(viewport.pan_start(p, MouseButton::Left, meta));
        viewport.pan_end();

        assert!(!viewport.pan_start(p, MouseButton::Left, Modifiers::default()));
        assert!(!viewport.pan_start(p, MouseButton::Right, Modifiers::default()));
        assert!(!viewport.is_panning());
    }

    #[test]
    fn test_pan_move_applies_damped_delta() {
        let mut viewport = Viewport::new();
        viewport.set_zoom(4.0);
        viewport.pan_start(Point::new(100.0, 100.0), MouseButton::Middle, Modifiers::default());
        viewport.pan_move(Point::new(110.0, 100.0));

        // delta.x = 10, scale = 1.5 / sqrt(4) = 0.75
        assert!((viewport.transform.pan_x - 7.5).abs() < 1e-9);
        assert!(viewport.transform.pan_y.abs() < 1e-9);
    }

    #[test]
    fn test_pan_move_without_start_is_noop() {
        let mut viewport = Viewport::new();
        viewport.pan_move(Point::new(500.0, 500.0));
        assert!(viewport.transform.pan_x.abs() < f64::EPSILON);
    }

    #[test]
    fn test_custom_damping_field() {
        let mut viewport = Viewport::new();
        viewport.pan_damping = 3.0;
        viewport.pan_start(Point::new(0.0, 0.0), MouseButton::Middle, Modifiers::default());
        viewport.pan_move(Point::new(10.0, 0.0));
        // zoom 1 so scale = damping
        assert!((viewport.transform.pan_x - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_transform_validates_then_clamps() {
        let mut viewport = Viewport::new();
        assert!(viewport.set_transform(Transform::new(0.0, 0.0, 0.0)).is_err());
        assert!(viewport.set_transform(Transform::new(1.0, f64::NAN, 0.0)).is_err());

        viewport.set_transform(Transform::new(50.0, 10.0, 10.0)).unwrap();
        assert!((viewport.transform.zoom - 5.0).abs() < f64::EPSILON);
        assert!((viewport.transform.pan_x - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fit_to_content_clamps_to_interactive_range() {
        let mut viewport = Viewport::new();
        // Tiny content would fit at zoom 10; interactive max is 5.
        viewport.fit_to_content(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Size::new(800.0, 600.0),
            0.0,
        );
        assert!((viewport.transform.zoom - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset() {
        let mut viewport = Viewport::new();
        viewport.set_zoom(3.0);
        viewport.set_pan(100.0, -100.0);
        viewport.reset();
        assert_eq!(viewport.transform, Transform::IDENTITY);
    }
}

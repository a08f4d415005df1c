//! Image export of the viewport or the whole board.

use kurbo::{Rect, Size};
use thiserror::Error;

use crate::board::BoardStore;
use crate::geometry::expand;
use crate::transform::Transform;
use crate::viewport::Viewport;

/// Canvas-space whitespace added around full-board exports.
pub const EXPORT_PADDING: f64 = 100.0;

/// Errors raised by an export backend.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("capture failed: {0}")]
    Capture(String),
}

/// Backend that rasterizes a canvas region under a given transform.
///
/// The engine stays renderer-agnostic; a web frontend implements this
/// over a 2D context, tests implement it with a recording stub.
pub trait ImageCapture {
    fn capture(&mut self, region: Rect, transform: &Transform) -> Result<(), ExportError>;
}

/// Export exactly what is on screen, with the current transform.
pub fn capture_viewport(
    viewport: &Viewport,
    screen_size: Size,
    backend: &mut dyn ImageCapture,
) -> Result<(), ExportError> {
    let region = viewport.viewport_bounds(screen_size);
    backend.capture(region, &viewport.transform)
}

/// Export the whole board at zoom 1 with uniform padding.
///
/// The viewport transform is swapped out for the export and restored
/// afterwards, whether or not the capture succeeded.
pub fn capture_full_board(
    store: &BoardStore,
    viewport: &mut Viewport,
    backend: &mut dyn ImageCapture,
) -> Result<(), ExportError> {
    let region = expand(store.content_bounds(), EXPORT_PADDING / 2.0);
    let export_transform = Transform {
        zoom: 1.0,
        pan_x: -region.x0,
        pan_y: -region.y0,
    };

    let saved = viewport.transform;
    viewport.transform = export_transform;
    let result = backend.capture(region, &export_transform);
    viewport.transform = saved;
    result
}

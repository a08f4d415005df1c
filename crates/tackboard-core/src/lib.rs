//! Core logic for an infinite-canvas board.
//!
//! This crate is renderer-agnostic: it owns the viewport transform, the
//! board content, and the pointer interaction state machine, and talks
//! to the outside world through the [`RendererHints`] and
//! [`ImageCapture`] traits. A frontend feeds it pointer, wheel, and
//! keyboard events and draws whatever the store and culling pass say is
//! visible.

pub mod arrow;
pub mod board;
pub mod culling;
pub mod engine;
pub mod export;
pub mod geometry;
pub mod handles;
pub mod input;
pub mod item;
pub mod tools;
pub mod transform;
pub mod viewport;

pub use arrow::{Arrow, ENDPOINT_RADIUS, Endpoint, MIN_ARROW_LENGTH};
pub use board::{ArrowHit, BoardError, BoardStore};
pub use culling::{CULL_MARGIN, VisibleSet, visible_items};
pub use engine::{
    ArrowEditMode, ArrowEditState, DragState, Gesture, InteractionEngine, NoHints, RendererHints,
    ResizeState,
};
pub use export::{EXPORT_PADDING, ExportError, ImageCapture, capture_full_board, capture_viewport};
pub use geometry::content_bounds;
pub use handles::{Corner, Handle, HANDLE_HIT_TOLERANCE, corner_handles, hit_test_corner};
pub use input::{
    ClickTracker, KeyEvent, Modifiers, MouseButton, MoveThrottle, PointerEvent,
};
pub use item::{CanvasItem, Crop, ItemKind, MIN_FONT_SIZE, MIN_ITEM_SIZE};
pub use tools::ToolKind;
pub use transform::{Transform, TransformError};
pub use viewport::Viewport;

//! Pointer interaction engine: one gesture at a time, dispatched over a
//! tagged union.

use kurbo::{Point, Size, Vec2};
use log::{debug, warn};

use crate::arrow::{Arrow, Endpoint, MIN_ARROW_LENGTH};
use crate::board::{ArrowHit, BoardStore};
use crate::handles::{Corner, HANDLE_HIT_TOLERANCE, hit_test_corner};
use crate::input::{ClickTracker, KeyEvent, Modifiers, MouseButton, MoveThrottle, PointerEvent};
use crate::item::{ItemKind, MIN_FONT_SIZE, MIN_ITEM_SIZE};
use crate::tools::ToolKind;
use crate::viewport::Viewport;

/// Scale steps for wheel and keyboard resize.
pub const SCALE_UP: f64 = 1.1;
pub const SCALE_DOWN: f64 = 0.9;

/// How close (canvas units at zoom 1) a pointer must be to an arrow
/// shaft to grab it.
pub const ARROW_BODY_TOLERANCE: f64 = 10.0;

/// Visual lift applied to an item while it is being dragged.
const DRAG_LIFT_SCALE: f64 = 1.05;

/// Channel from the engine to whatever draws the board.
///
/// Drag motion goes through [`apply_drag_transform`] instead of the
/// store so the renderer can move a single element cheaply; the store
/// is written once, on release.
///
/// [`apply_drag_transform`]: RendererHints::apply_drag_transform
pub trait RendererHints {
    /// Position an item at a provisional location with a lift scale.
    fn apply_drag_transform(&mut self, id: &str, position: Point, scale: f64);

    /// Clear any provisional transform for an item.
    fn reset_transform(&mut self, id: &str);

    /// On-screen size the renderer measured for an item, if it knows.
    fn rendered_size(&self, id: &str) -> Option<Size>;
}

/// Hints sink for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHints;

impl RendererHints for NoHints {
    fn apply_drag_transform(&mut self, _id: &str, _position: Point, _scale: f64) {}
    fn reset_transform(&mut self, _id: &str) {}
    fn rendered_size(&self, _id: &str) -> Option<Size> {
        None
    }
}

/// An item drag in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub item_id: String,
    /// Canvas-space offset from the item origin to the grab point.
    pub offset: Vec2,
    /// Latest provisional position. Committed to the store on release.
    pub pending: Point,
}

/// A corner resize in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeState {
    pub item_id: String,
    pub corner: Corner,
    /// The corner that stays fixed.
    pub anchor: Point,
    pub start_pointer: Point,
    pub start_width: f64,
    pub start_height: f64,
    pub start_font_size: Option<f64>,
    pub aspect_ratio: f64,
}

/// How an existing arrow is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowEditMode {
    /// One endpoint follows the pointer.
    Endpoint(Endpoint),
    /// Both endpoints translate together.
    Body,
    /// Shift-drag on the body: only the head follows the pointer.
    BodyRedraw,
}

/// An arrow edit in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowEditState {
    pub arrow_id: String,
    pub mode: ArrowEditMode,
    pub last_pointer: Point,
}

/// The single active gesture. A new gesture cannot start until the
/// current one ends.
#[derive(Debug, Clone, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Panning,
    DraggingItem(DragState),
    ResizingItem(ResizeState),
    DrawingArrow(Arrow),
    EditingArrow(ArrowEditState),
}

/// Routes pointer and keyboard input to the viewport and board.
#[derive(Debug, Clone, Default)]
pub struct InteractionEngine {
    pub viewport: Viewport,
    tool: ToolKind,
    gesture: Gesture,
    wheel_resize_target: Option<String>,
    throttle: MoveThrottle,
    clicks: ClickTracker,
}

impl InteractionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Route the next wheel events to resizing this item instead of
    /// zooming. `None` restores zoom behavior.
    pub fn set_wheel_resize_target(&mut self, id: Option<String>) {
        self.wheel_resize_target = id;
    }

    /// Handle a button press. Ignored while a gesture is active.
    pub fn on_pointer_down(
        &mut self,
        store: &mut BoardStore,
        hints: &mut dyn RendererHints,
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    ) {
        if !matches!(self.gesture, Gesture::Idle) {
            return;
        }

        if self.viewport.pan_start(position, button, modifiers) {
            self.gesture = Gesture::Panning;
            return;
        }

        if button != MouseButton::Left {
            return;
        }

        if self.clicks.register(position) {
            self.on_double_click();
            return;
        }

        let canvas = self.viewport.screen_to_canvas(position);
        match self.tool {
            ToolKind::Arrow => {
                self.gesture = Gesture::DrawingArrow(Arrow::new(canvas, canvas));
            }
            ToolKind::Select => self.pointer_down_select(store, hints, canvas, modifiers),
            // Text and image placement happen outside the pointer flow.
            ToolKind::Text | ToolKind::Image => {}
        }
    }

    fn pointer_down_select(
        &mut self,
        store: &mut BoardStore,
        hints: &mut dyn RendererHints,
        canvas: Point,
        modifiers: Modifiers,
    ) {
        let zoom = self.viewport.transform.zoom;

        // Corner handles of the selected item win over everything.
        let resize = store.selected_item().and_then(|item| {
            let bounds = item.bounds();
            hit_test_corner(bounds, canvas, HANDLE_HIT_TOLERANCE / zoom).map(|corner| {
                let (start_width, start_height) = hints
                    .rendered_size(&item.id)
                    .map(|size| (size.width, size.height))
                    .unwrap_or_else(|| item.size());
                ResizeState {
                    item_id: item.id.clone(),
                    corner,
                    anchor: corner.anchor(bounds),
                    start_pointer: canvas,
                    start_width,
                    start_height,
                    start_font_size: item.font_size,
                    aspect_ratio: start_width / start_height.max(f64::EPSILON),
                }
            })
        });
        if let Some(state) = resize {
            debug!("resize start: {} from {:?}", state.item_id, state.corner);
            self.gesture = Gesture::ResizingItem(state);
            return;
        }

        // An item body starts a drag.
        let hit_item = store
            .item_at_point(canvas)
            .map(|item| (item.id.clone(), item.position));
        if let Some((id, origin)) = hit_item {
            debug!("drag start: {id}");
            store.select_item(&id);
            store.deselect_arrows();
            hints.apply_drag_transform(&id, origin, DRAG_LIFT_SCALE);
            self.throttle.reset();
            self.gesture = Gesture::DraggingItem(DragState {
                offset: canvas - origin,
                pending: origin,
                item_id: id,
            });
            return;
        }

        // Then arrows: endpoint circles of the selected arrow, else a
        // shaft hit selects and begins a body edit.
        let hit_arrow = store
            .arrow_at_point(canvas, ARROW_BODY_TOLERANCE / zoom)
            .map(|(arrow, hit)| (arrow.id.clone(), hit));
        if let Some((id, hit)) = hit_arrow {
            let mode = match hit {
                ArrowHit::Endpoint(endpoint) => ArrowEditMode::Endpoint(endpoint),
                ArrowHit::Body if modifiers.shift => ArrowEditMode::BodyRedraw,
                ArrowHit::Body => ArrowEditMode::Body,
            };
            store.select_arrow(&id);
            self.gesture = Gesture::EditingArrow(ArrowEditState {
                arrow_id: id,
                mode,
                last_pointer: canvas,
            });
            return;
        }

        // Empty space clears selection.
        store.deselect_items();
        store.deselect_arrows();
    }

    /// Advance the active gesture to a new pointer position.
    pub fn on_pointer_move(
        &mut self,
        store: &mut BoardStore,
        hints: &mut dyn RendererHints,
        position: Point,
    ) {
        let canvas = self.viewport.screen_to_canvas(position);
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Panning => self.viewport.pan_move(position),
            Gesture::DraggingItem(state) => {
                // Pending is authoritative on every event; only the
                // renderer hint is throttled.
                state.pending = canvas - state.offset;
                if self.throttle.ready() {
                    hints.apply_drag_transform(&state.item_id, state.pending, DRAG_LIFT_SCALE);
                }
            }
            Gesture::ResizingItem(state) => {
                let dx = canvas.x - state.start_pointer.x;
                let sign = if state.corner.is_left() { -1.0 } else { 1.0 };
                let new_width = (state.start_width + sign * dx).max(MIN_ITEM_SIZE);
                let new_height = (new_width / state.aspect_ratio).max(MIN_ITEM_SIZE);
                let x = if state.corner.is_left() {
                    state.anchor.x - new_width
                } else {
                    state.anchor.x
                };
                let y = if state.corner.is_top() {
                    state.anchor.y - new_height
                } else {
                    state.anchor.y
                };
                let font_size = state
                    .start_font_size
                    .map(|font| (font * new_width / state.start_width).max(MIN_FONT_SIZE));

                store.update_item(&state.item_id, |item| {
                    item.position = Point::new(x, y);
                    item.width = Some(new_width);
                    item.height = Some(new_height);
                    if font_size.is_some() {
                        item.font_size = font_size;
                    }
                });
            }
            Gesture::DrawingArrow(arrow) => {
                arrow.end = canvas;
            }
            Gesture::EditingArrow(state) => {
                match state.mode {
                    ArrowEditMode::Endpoint(endpoint) => {
                        store.update_arrow(&state.arrow_id, |arrow| {
                            arrow.set_endpoint(endpoint, canvas);
                        });
                    }
                    ArrowEditMode::Body => {
                        let delta = canvas - state.last_pointer;
                        store.update_arrow(&state.arrow_id, |arrow| arrow.translate(delta));
                    }
                    ArrowEditMode::BodyRedraw => {
                        store.update_arrow(&state.arrow_id, |arrow| arrow.end = canvas);
                    }
                }
                state.last_pointer = canvas;
            }
        }
    }

    /// Finish the active gesture. Drags commit here, exactly once.
    pub fn on_pointer_up(&mut self, store: &mut BoardStore, hints: &mut dyn RendererHints) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => {}
            Gesture::Panning => self.viewport.pan_end(),
            Gesture::DraggingItem(state) => {
                if store.item(&state.item_id).is_some() {
                    store.update_item(&state.item_id, |item| item.position = state.pending);
                } else {
                    warn!("drag target {} vanished before release", state.item_id);
                }
                hints.reset_transform(&state.item_id);
            }
            Gesture::ResizingItem(_) => {}
            Gesture::DrawingArrow(arrow) => {
                if arrow.length() > MIN_ARROW_LENGTH {
                    store.add_arrow(arrow);
                } else {
                    debug!("arrow below length threshold, discarded");
                }
            }
            Gesture::EditingArrow(_) => {}
        }
    }

    /// Wheel input: resize the registered target if one is set and still
    /// exists, otherwise zoom around the cursor.
    pub fn on_wheel(
        &mut self,
        store: &mut BoardStore,
        hints: &mut dyn RendererHints,
        position: Point,
        delta_y: f64,
    ) {
        if let Some(id) = self.wheel_resize_target.clone() {
            if store.item(&id).is_some() {
                let factor = if delta_y > 0.0 { SCALE_DOWN } else { SCALE_UP };
                scale_item(store, hints, &id, factor);
                return;
            }
            self.wheel_resize_target = None;
        }
        self.viewport.on_wheel(position, delta_y);
    }

    /// Keyboard shortcuts: ctrl/cmd +/- scale the selected item, delete
    /// removes the selected arrow, escape abandons the active gesture.
    pub fn on_key(
        &mut self,
        store: &mut BoardStore,
        hints: &mut dyn RendererHints,
        key: &str,
        modifiers: Modifiers,
    ) {
        match key {
            "+" | "=" if modifiers.command() => {
                if let Some(id) = store.selected_item().map(|item| item.id.clone()) {
                    scale_item(store, hints, &id, SCALE_UP);
                }
            }
            "-" if modifiers.command() => {
                if let Some(id) = store.selected_item().map(|item| item.id.clone()) {
                    scale_item(store, hints, &id, SCALE_DOWN);
                }
            }
            "Delete" | "Backspace" => {
                if let Some(id) = store.selected_arrow().map(|arrow| arrow.id.clone()) {
                    store.remove_arrow(&id);
                }
            }
            "Escape" => self.cancel_gesture(hints),
            _ => {}
        }
    }

    /// Dispatch a unified pointer event.
    pub fn on_pointer_event(
        &mut self,
        store: &mut BoardStore,
        hints: &mut dyn RendererHints,
        event: PointerEvent,
    ) {
        match event {
            PointerEvent::Down {
                position,
                button,
                modifiers,
            } => self.on_pointer_down(store, hints, position, button, modifiers),
            PointerEvent::Up { .. } => self.on_pointer_up(store, hints),
            PointerEvent::Move { position } => self.on_pointer_move(store, hints, position),
            PointerEvent::Scroll { position, delta } => {
                self.on_wheel(store, hints, position, delta.y)
            }
        }
    }

    /// Dispatch a keyboard event. Releases are ignored.
    pub fn on_key_event(
        &mut self,
        store: &mut BoardStore,
        hints: &mut dyn RendererHints,
        event: KeyEvent,
        modifiers: Modifiers,
    ) {
        if let KeyEvent::Pressed(key) = event {
            self.on_key(store, hints, &key, modifiers);
        }
    }

    /// Double-click anywhere returns to the select tool.
    pub fn on_double_click(&mut self) {
        self.tool = ToolKind::Select;
    }

    /// Abandon the active gesture without committing anything.
    pub fn cancel_gesture(&mut self, hints: &mut dyn RendererHints) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Panning => self.viewport.pan_end(),
            Gesture::DraggingItem(state) => hints.reset_transform(&state.item_id),
            _ => {}
        }
    }
}

/// Scale an item by a factor, respecting minimum sizes. Text items
/// scale their font; sized dimensions scale alongside.
fn scale_item(store: &mut BoardStore, hints: &dyn RendererHints, id: &str, factor: f64) {
    let Some(item) = store.item(id) else {
        return;
    };

    match item.kind {
        ItemKind::Text => {
            let font_size = item
                .font_size
                .map(|font| (font * factor).max(MIN_FONT_SIZE));
            let width = item.width.map(|w| (w * factor).max(MIN_ITEM_SIZE));
            let height = item.height.map(|h| (h * factor).max(MIN_ITEM_SIZE));
            store.update_item(id, |item| {
                if font_size.is_some() {
                    item.font_size = font_size;
                }
                item.width = width.or(item.width);
                item.height = height.or(item.height);
            });
        }
        ItemKind::Image => {
            let (width, height) = hints
                .rendered_size(id)
                .map(|size| (size.width, size.height))
                .unwrap_or_else(|| item.size());
            let new_width = (width * factor).max(MIN_ITEM_SIZE);
            let new_height = (height * factor).max(MIN_ITEM_SIZE);
            store.update_item(id, |item| {
                item.width = Some(new_width);
                item.height = Some(new_height);
            });
        }
    }
}

//! Pointer and keyboard event types plus input timing helpers.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// True when either platform command modifier is held.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    Scroll {
        position: Point,
        delta: Vec2,
    },
}

/// Keyboard event type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Minimum spacing between renderer drag hints during a move gesture.
pub const MOVE_THROTTLE: Duration = Duration::from_millis(8);

/// Rate limiter for high-frequency pointer-move work.
///
/// Gates only cosmetic per-move output; callers must keep their own
/// authoritative state up to date on every event regardless of what
/// `ready` returns.
#[derive(Debug, Clone)]
pub struct MoveThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl Default for MoveThrottle {
    fn default() -> Self {
        Self::new(MOVE_THROTTLE)
    }
}

impl MoveThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Whether enough time has passed since the last accepted event.
    /// Accepting records the current instant.
    pub fn ready(&mut self) -> bool {
        self.ready_at(Instant::now())
    }

    /// Same as [`ready`](Self::ready) with an injected clock, for tests.
    pub fn ready_at(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the last accepted event so the next one passes immediately.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Double-click detection constants.
const DOUBLE_CLICK_TIME_MS: u128 = 500;
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Detects double-clicks from a stream of left-button presses.
#[derive(Debug, Clone, Default)]
pub struct ClickTracker {
    last_click_time: Option<Instant>,
    last_click_position: Option<Point>,
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a left-button press. Returns true when it completes a
    /// double-click.
    pub fn register(&mut self, position: Point) -> bool {
        self.register_at(position, Instant::now())
    }

    /// Same as [`register`](Self::register) with an injected clock.
    pub fn register_at(&mut self, position: Point, now: Instant) -> bool {
        if let (Some(last_time), Some(last_pos)) = (self.last_click_time, self.last_click_position)
        {
            let elapsed = now.duration_since(last_time).as_millis();
            let distance = position.distance(last_pos);
            if elapsed < DOUBLE_CLICK_TIME_MS && distance < DOUBLE_CLICK_DISTANCE {
                // Reset to prevent triple-click being detected as another double-click
                self.last_click_time = None;
                self.last_click_position = None;
                return true;
            }
        }
        self.last_click_time = Some(now);
        self.last_click_position = Some(position);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_first_event_passes() {
        let mut throttle = MoveThrottle::default();
        assert!(throttle.ready_at(Instant::now()));
    }

    #[test]
    fn test_throttle_gates_within_interval() {
        let mut throttle = MoveThrottle::default();
        let start = Instant::now();
        assert!(throttle.ready_at(start));
        assert!(!throttle.ready_at(start + Duration::from_millis(4)));
        assert!(throttle.ready_at(start + Duration::from_millis(9)));
    }

    #[test]
    fn test_throttle_reset() {
        let mut throttle = MoveThrottle::default();
        let start = Instant::now();
        assert!(throttle.ready_at(start));
        throttle.reset();
        assert!(throttle.ready_at(start + Duration::from_millis(1)));
    }

    #[test]
    fn test_double_click_detection() {
        let mut clicks = ClickTracker::new();
        let pos = Point::new(100.0, 100.0);
        let start = Instant::now();

        assert!(!clicks.register_at(pos, start));
        assert!(clicks.register_at(pos, start + Duration::from_millis(200)));
    }

    #[test]
    fn test_triple_click_is_not_two_doubles() {
        let mut clicks = ClickTracker::new();
        let pos = Point::new(100.0, 100.0);
        let start = Instant::now();

        assert!(!clicks.register_at(pos, start));
        assert!(clicks.register_at(pos, start + Duration::from_millis(100)));
        // Tracker reset after a detection, so the third click starts over.
        assert!(!clicks.register_at(pos, start + Duration::from_millis(200)));
    }

    #[test]
    fn test_double_click_too_slow() {
        let mut clicks = ClickTracker::new();
        let pos = Point::new(100.0, 100.0);
        let start = Instant::now();

        assert!(!clicks.register_at(pos, start));
        assert!(!clicks.register_at(pos, start + Duration::from_millis(600)));
    }

    #[test]
    fn test_double_click_too_far() {
        let mut clicks = ClickTracker::new();
        let start = Instant::now();

        assert!(!clicks.register_at(Point::new(100.0, 100.0), start));
        assert!(!clicks.register_at(
            Point::new(200.0, 200.0),
            start + Duration::from_millis(100)
        ));
    }

    #[test]
    fn test_modifiers_command() {
        let mut modifiers = Modifiers::default();
        assert!(!modifiers.command());
        modifiers.ctrl = true;
        assert!(modifiers.command());
        let meta_only = Modifiers {
            meta: true,
            ..Modifiers::default()
        };
        assert!(meta_only.command());
    }
}

#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! The host UI event loop translates its native callbacks into these values
//! and dispatches them serially to the grid engine.
//!
//! # Design Notes
//!
//! - Pointer coordinates are viewport pixels, not grid-relative; the engine
//!   subtracts the grid's bounding box itself.
//! - `Leave` is distinct from `Up` so hosts can log it, but the engine treats
//!   both as the end of a drag.
//! - With the `serde` feature, events use an internally tagged JSON form
//!   (`{"type":"pointer","kind":"down","x":12.0,"y":40.0}`) for replay scripts.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::PixelPoint;

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Event {
    /// A pointer (mouse/touch/pen) event.
    Pointer(PointerEvent),

    /// The viewport was resized.
    Resize {
        /// New viewport width in pixels.
        width: f64,
    },
}

impl Event {
    /// Shorthand for a pointer event of the given kind.
    #[must_use]
    pub const fn pointer(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self::Pointer(PointerEvent::new(kind, x, y))
    }

    /// Shorthand for a resize event.
    #[must_use]
    pub const fn resize(width: f64) -> Self {
        Self::Resize { width }
    }
}

/// A pointer event in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,

    /// Viewport x coordinate in pixels.
    pub x: f64,

    /// Viewport y coordinate in pixels.
    pub y: f64,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self { kind, x, y }
    }

    /// Event position as a point.
    #[must_use]
    pub const fn position(&self) -> PixelPoint {
        PixelPoint::new(self.x, self.y)
    }

    /// Whether this event ends any drag in progress.
    #[must_use]
    pub const fn is_release(&self) -> bool {
        matches!(self.kind, PointerEventKind::Up | PointerEventKind::Leave)
    }
}

/// Types of pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PointerEventKind {
    /// Primary button pressed.
    Down,

    /// Pointer moved (with or without a button held).
    Move,

    /// Primary button released.
    Up,

    /// Pointer left the grid surface.
    Leave,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_kinds() {
        assert!(PointerEvent::new(PointerEventKind::Up, 0.0, 0.0).is_release());
        assert!(PointerEvent::new(PointerEventKind::Leave, 0.0, 0.0).is_release());
        assert!(!PointerEvent::new(PointerEventKind::Move, 0.0, 0.0).is_release());
        assert!(!PointerEvent::new(PointerEventKind::Down, 0.0, 0.0).is_release());
    }

    #[test]
    fn pointer_shorthand_preserves_position() {
        let event = Event::pointer(PointerEventKind::Down, 12.5, 40.0);
        match event {
            Event::Pointer(pointer) => {
                assert_eq!(pointer.position(), PixelPoint::new(12.5, 40.0));
                assert_eq!(pointer.kind, PointerEventKind::Down);
            }
            Event::Resize { .. } => panic!("expected pointer event"),
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_shape_is_internally_tagged() {
        let event: Event =
            serde_json::from_str(r#"{"type":"pointer","kind":"leave","x":1.0,"y":2.0}"#)
                .expect("pointer event parses");
        assert_eq!(event, Event::pointer(PointerEventKind::Leave, 1.0, 2.0));

        let resize: Event =
            serde_json::from_str(r#"{"type":"resize","width":900.0}"#).expect("resize parses");
        assert_eq!(resize, Event::resize(900.0));
    }
}

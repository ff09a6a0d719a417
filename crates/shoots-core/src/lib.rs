#![forbid(unsafe_code)]

//! Core: geometry, pointer input events, and logging plumbing.
//!
//! # Role in shoots
//! `shoots-core` is the input layer. It owns the tile and pixel geometry the
//! grid engine reasons about, and the normalized event types a host (browser
//! shim, terminal front-end, replay script) feeds into the engine.
//!
//! # Primary responsibilities
//! - **Rect / PixelRect**: tile-space and pixel-space rectangles with overlap
//!   and containment checks.
//! - **Event**: canonical pointer and viewport-resize events.
//! - **logging**: tracing macro re-exports and subscriber installation.
//!
//! # How it fits in the system
//! `shoots-layout` consumes `shoots-core::Event` values and owns all layout
//! state; `shoots-core` itself is stateless.

pub mod event;
pub mod geometry;
pub mod logging;

pub use event::{Event, PointerEvent, PointerEventKind};
pub use geometry::{PixelPoint, PixelRect, Rect};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, info_span, trace, warn};

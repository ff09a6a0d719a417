#![forbid(unsafe_code)]

//! Tile-grid layout for the dashboard.
//!
//! Blocks are rectangles on a `columns × rows` tile grid. The user drags them
//! freely in pixel space; on drop they snap by centre to the nearest tile,
//! are clamped inside the grid, and revert if they would overlap another
//! block. Narrower viewports reflow the canonical layout onto fewer columns
//! without ever losing it.
//!
//! ```
//! use shoots_layout::{GridConfig, GridLayoutEngine};
//!
//! let mut engine = GridLayoutEngine::dashboard(GridConfig::default()).unwrap();
//! engine.set_columns(7).unwrap();
//! assert_eq!(engine.blocks()[1].x(), 2);
//! engine.set_columns(28).unwrap();
//! assert_eq!(engine.blocks()[1].x(), 6);
//! ```

pub mod block;
pub mod breakpoint;
pub mod config;
pub mod drag;
pub mod engine;
pub mod placement;
pub mod reflow;
pub mod responsive;
pub mod seed;

pub use block::{Block, BlockId, BlockSpec, TilePosition};
pub use breakpoint::{Breakpoint, Breakpoints};
pub use config::{DEFAULT_REFLOW_SLACK_ROWS, DEFAULT_ROWS, GridConfig, GridConfigError};
pub use drag::{DragSession, DragStart, DropOutcome, RevertReason, TileMetrics};
pub use engine::{ColumnChange, EngineEffect, GridError, GridLayoutEngine, ReflowReport};
pub use placement::{BlockPlacement, Placement};
pub use reflow::{ReflowPlan, reflow};
pub use responsive::Responsive;
pub use seed::dashboard_blocks;
pub use shoots_core::geometry::{PixelPoint, PixelRect, Rect};

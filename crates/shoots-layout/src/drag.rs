#![forbid(unsafe_code)]

//! Free-form drag sessions and pixel-to-tile snapping.
//!
//! While a pointer button is held on a block the block follows the pointer
//! in pixel space with no snapping. On release the block's rectangle is
//! snapped by its *centre* to the nearest tile and clamped inside the grid.
//!
//! # Invariants
//!
//! 1. At most one [`DragSession`] exists at a time.
//! 2. The pixel position during a drag is unconstrained (may be negative or
//!    beyond the grid); only the drop is clamped.
//! 3. A clamped drop origin always satisfies `0 ≤ x ≤ columns - w` and
//!    `0 ≤ y ≤ rows - h` (saturating at 0 when the block is larger than the grid).
//!
//! # Failure Modes
//!
//! - Non-finite intermediate values (degenerate bounds) snap to 0 and are
//!   then clamped; the engine refuses to start or drop a drag on unusable
//!   bounds before this matters.

use serde::{Deserialize, Serialize};
use shoots_core::geometry::{PixelPoint, PixelRect};

use crate::block::{BlockId, TilePosition};

/// Pixel size of one tile for a given grid bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileMetrics {
    pub tile_width: f64,
    pub tile_height: f64,
}

impl TileMetrics {
    /// `tile_width = width / columns`, `tile_height = height / rows`.
    #[must_use]
    pub fn new(bounds: PixelRect, columns: u16, rows: u16) -> Self {
        Self {
            tile_width: bounds.width / f64::from(columns.max(1)),
            tile_height: bounds.height / f64::from(rows.max(1)),
        }
    }

    /// Grid-relative pixel origin of a tile.
    #[must_use]
    pub fn tile_origin(&self, position: TilePosition) -> PixelPoint {
        PixelPoint::new(
            f64::from(position.x) * self.tile_width,
            f64::from(position.y) * self.tile_height,
        )
    }

    /// Snap a free-form pixel origin for a `w × h` block to tile coordinates
    /// (unclamped; may be negative or past the grid edge).
    #[must_use]
    pub fn snap(&self, pixel: PixelPoint, w: u16, h: u16) -> (i64, i64) {
        (
            snap_axis(pixel.x, w, self.tile_width),
            snap_axis(pixel.y, h, self.tile_height),
        )
    }
}

/// Centre-based snap along one axis:
/// `round((pixel + span * tile / 2) / tile - span / 2)`, rounding half up.
#[must_use]
pub fn snap_axis(pixel: f64, span: u16, tile: f64) -> i64 {
    let half_span = f64::from(span) / 2.0;
    let centre = pixel + half_span * tile;
    round_half_up(centre / tile - half_span)
}

/// Clamp a snapped origin so a block of `span` tiles fits inside `extent` tiles.
#[must_use]
pub fn clamp_axis(snapped: i64, span: u16, extent: u16) -> u16 {
    let max = i64::from(extent.saturating_sub(span));
    // Bounded by `max`, which came from a u16.
    snapped.clamp(0, max) as u16
}

fn round_half_up(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    let rounded = (value + 0.5).floor();
    if rounded >= i64::MAX as f64 {
        return i64::MAX;
    }
    if rounded <= i64::MIN as f64 {
        return i64::MIN;
    }
    rounded as i64
}

/// Transient state of an in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    /// Block being dragged.
    pub block: BlockId,
    /// Pixel offset from the block's top-left to the pointer at drag start.
    pub pointer_offset: PixelPoint,
    /// Tile position to restore on an invalid drop.
    pub original_position: TilePosition,
    /// Current free-form grid-relative pixel origin of the block.
    pub pixel_position: PixelPoint,
}

impl DragSession {
    pub(crate) fn start(
        block: BlockId,
        position: TilePosition,
        pointer: PixelPoint,
        bounds: PixelRect,
        metrics: TileMetrics,
    ) -> Self {
        let origin = metrics.tile_origin(position);
        let local = bounds.to_local(pointer);
        Self {
            block,
            pointer_offset: local.offset_from(origin),
            original_position: position,
            pixel_position: origin,
        }
    }

    /// Follow the pointer: grid-relative pointer minus the recorded offset.
    pub(crate) fn follow(&mut self, pointer: PixelPoint, bounds: PixelRect) {
        self.pixel_position = bounds.to_local(pointer).offset_from(self.pointer_offset);
    }
}

/// Result of asking the engine to begin a drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DragStart {
    Started {
        block: BlockId,
        original_position: TilePosition,
    },
    /// A session is already active; the request was ignored.
    AlreadyDragging { active: BlockId },
}

/// Why a drop left the block where it started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RevertReason {
    /// The snapped rectangle overlapped another block.
    Collision { with: BlockId },
    /// The grid bounding box had no usable size at drop time.
    UnusableBounds,
    /// The session was cancelled (pointer capture lost, reflow).
    Cancelled,
}

/// How a drag session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DropOutcome {
    Committed {
        block: BlockId,
        from: TilePosition,
        to: TilePosition,
    },
    Reverted {
        block: BlockId,
        at: TilePosition,
        #[serde(flatten)]
        reason: RevertReason,
    },
}

impl DropOutcome {
    #[must_use]
    pub const fn block(&self) -> BlockId {
        match self {
            Self::Committed { block, .. } | Self::Reverted { block, .. } => *block,
        }
    }

    /// Final tile position of the dragged block.
    #[must_use]
    pub const fn position(&self) -> TilePosition {
        match self {
            Self::Committed { to, .. } => *to,
            Self::Reverted { at, .. } => *at,
        }
    }

    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics_28x14() -> TileMetrics {
        TileMetrics::new(PixelRect::new(0.0, 0.0, 1120.0, 560.0), 28, 14)
    }

    #[test]
    fn tile_metrics_divide_bounds() {
        let m = metrics_28x14();
        assert_eq!(m.tile_width, 40.0);
        assert_eq!(m.tile_height, 40.0);
        assert_eq!(
            m.tile_origin(TilePosition::new(3, 2)),
            PixelPoint::new(120.0, 80.0)
        );
    }

    #[test]
    fn exact_tile_origin_snaps_to_itself() {
        let m = metrics_28x14();
        assert_eq!(m.snap(PixelPoint::new(800.0, 400.0), 6, 4), (20, 10));
    }

    #[test]
    fn snap_rounds_half_up() {
        // Half a tile right of column 2 rounds to column 3.
        assert_eq!(snap_axis(100.0, 6, 40.0), 3);
        // Just under half stays.
        assert_eq!(snap_axis(99.0, 6, 40.0), 2);
        // Negative half rounds toward +inf.
        assert_eq!(snap_axis(-20.0, 6, 40.0), 0);
        assert_eq!(snap_axis(-21.0, 6, 40.0), -1);
    }

    #[test]
    fn odd_span_snaps_by_centre() {
        // A 3-wide block whose left edge sits 0.4 tiles in.
        assert_eq!(snap_axis(16.0, 3, 40.0), 0);
        assert_eq!(snap_axis(24.0, 3, 40.0), 1);
    }

    #[test]
    fn clamp_keeps_block_inside() {
        assert_eq!(clamp_axis(-5, 6, 28), 0);
        assert_eq!(clamp_axis(30, 6, 28), 22);
        assert_eq!(clamp_axis(10, 6, 28), 10);
        // Block wider than the grid pins to the origin.
        assert_eq!(clamp_axis(3, 30, 28), 0);
    }

    #[test]
    fn non_finite_snaps_to_zero() {
        assert_eq!(snap_axis(f64::NAN, 2, 40.0), 0);
        assert_eq!(snap_axis(10.0, 2, 0.0), 0);
    }

    #[test]
    fn session_tracks_pointer_offset() {
        let bounds = PixelRect::new(100.0, 50.0, 1120.0, 560.0);
        let mut session = DragSession::start(
            BlockId::new(1),
            TilePosition::new(1, 1),
            PixelPoint::new(150.0, 100.0),
            bounds,
            metrics_28x14(),
        );
        assert_eq!(session.pointer_offset, PixelPoint::new(10.0, 10.0));
        assert_eq!(session.pixel_position, PixelPoint::new(40.0, 40.0));

        session.follow(PixelPoint::new(50.0, 20.0), bounds);
        assert_eq!(session.pixel_position, PixelPoint::new(-60.0, -40.0));
    }

    #[test]
    fn outcome_accessors() {
        let outcome = DropOutcome::Reverted {
            block: BlockId::new(2),
            at: TilePosition::new(6, 0),
            reason: RevertReason::Collision {
                with: BlockId::new(1),
            },
        };
        assert_eq!(outcome.block(), BlockId::new(2));
        assert_eq!(outcome.position(), TilePosition::new(6, 0));
        assert!(!outcome.is_committed());
    }
}

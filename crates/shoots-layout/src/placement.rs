#![forbid(unsafe_code)]

//! Render output: where each block should be drawn.
//!
//! Idle blocks are addressed as 1-based grid cells (start + span, the shape
//! CSS grid and most terminal grid widgets expect). The block under an active
//! drag is addressed in grid-relative pixels so it can follow the pointer.

use std::fmt;

use serde::{Deserialize, Serialize};
use shoots_core::geometry::{PixelRect, Rect};

use crate::block::BlockId;

/// How to draw one block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// Snapped to the grid (1-based start lines).
    Cell {
        column_start: u16,
        column_span: u16,
        row_start: u16,
        row_span: u16,
    },
    /// Following the pointer; `rect` is relative to the grid origin.
    Floating { rect: PixelRect },
    /// Parked by reflow: no room on the current grid.
    Overflow,
}

impl Placement {
    #[must_use]
    pub const fn cell(rect: Rect) -> Self {
        Self::Cell {
            column_start: rect.x.saturating_add(1),
            column_span: rect.width,
            row_start: rect.y.saturating_add(1),
            row_span: rect.height,
        }
    }

    /// `grid-column` style value, e.g. `"7 / span 6"`.
    #[must_use]
    pub fn grid_column(&self) -> Option<String> {
        match self {
            Self::Cell {
                column_start,
                column_span,
                ..
            } => Some(format!("{column_start} / span {column_span}")),
            Self::Floating { .. } | Self::Overflow => None,
        }
    }

    /// `grid-row` style value, e.g. `"1 / span 4"`.
    #[must_use]
    pub fn grid_row(&self) -> Option<String> {
        match self {
            Self::Cell {
                row_start,
                row_span,
                ..
            } => Some(format!("{row_start} / span {row_span}")),
            Self::Floating { .. } | Self::Overflow => None,
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cell {
                column_start,
                column_span,
                row_start,
                row_span,
            } => write!(
                f,
                "col {column_start} / span {column_span}, row {row_start} / span {row_span}"
            ),
            Self::Floating { rect } => write!(
                f,
                "floating at ({:.1}, {:.1}) {:.1}×{:.1}px",
                rect.left, rect.top, rect.width, rect.height
            ),
            Self::Overflow => write!(f, "overflow"),
        }
    }
}

/// A block paired with its placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockPlacement {
    pub id: BlockId,
    pub label: String,
    pub placement: Placement,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_is_one_based() {
        let placement = Placement::cell(Rect::new(6, 0, 6, 4));
        assert_eq!(placement.grid_column().as_deref(), Some("7 / span 6"));
        assert_eq!(placement.grid_row().as_deref(), Some("1 / span 4"));
    }

    #[test]
    fn floating_has_no_grid_lines() {
        let placement = Placement::Floating {
            rect: PixelRect::new(12.0, -3.0, 240.0, 160.0),
        };
        assert_eq!(placement.grid_column(), None);
        assert_eq!(
            placement.to_string(),
            "floating at (12.0, -3.0) 240.0×160.0px"
        );
    }

    #[test]
    fn json_is_tagged_by_kind() {
        let json = serde_json::to_value(Placement::cell(Rect::new(0, 0, 2, 4))).expect("json");
        assert_eq!(json["kind"], "cell");
        assert_eq!(json["column_span"], 2);
        let overflow = serde_json::to_value(Placement::Overflow).expect("json");
        assert_eq!(overflow["kind"], "overflow");
    }
}

#![forbid(unsafe_code)]

//! Greedy reflow of the canonical layout onto a narrower grid.
//!
//! # Algorithm
//!
//! Blocks are processed in insertion order. Each block's canonical width is
//! scaled proportionally, `min(ceil(w * C / reference), C)`, its height kept.
//! A first-fit, row-major scan then places it: rows from the running cursor
//! downward, columns left to right, accepting the first rectangle that
//! overlaps nothing already placed in this pass. The cursor only moves down
//! (`cursor = max(cursor, placed.y)`), so later blocks never land above an
//! earlier block's row but may fill gaps at or below it.
//!
//! # Invariants
//!
//! 1. No two placed rectangles overlap.
//! 2. Every placed rectangle lies within `0..C` horizontally.
//! 3. The result is a pure function of the canonical rectangles, `C`, the
//!    reference column count, and the row ceiling.
//!
//! # Failure Modes
//!
//! A block that finds no free rectangle before the row ceiling is reported
//! in [`ReflowPlan::overflowed`] instead of being placed.

use serde::{Deserialize, Serialize};
use shoots_core::geometry::Rect;

use crate::block::BlockId;

/// Output of a reflow pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReflowPlan {
    /// Placed blocks, in processing order.
    pub placed: Vec<(BlockId, Rect)>,
    /// Blocks that did not fit before the row ceiling.
    pub overflowed: Vec<BlockId>,
}

/// Proportionally scale a canonical width to `columns`, rounding up and
/// capping at `columns`.
#[must_use]
pub fn scale_width(original_w: u16, columns: u16, reference_columns: u16) -> u16 {
    if reference_columns == 0 {
        return original_w.min(columns);
    }
    let scaled =
        (u32::from(original_w) * u32::from(columns)).div_ceil(u32::from(reference_columns));
    // Capped at `columns`, so the narrowing cast is lossless.
    scaled.min(u32::from(columns)) as u16
}

/// Reflow canonical rectangles onto a `columns`-wide grid.
///
/// `row_ceiling` is the exclusive upper bound on candidate rows.
#[must_use]
pub fn reflow<I>(blocks: I, columns: u16, reference_columns: u16, row_ceiling: u16) -> ReflowPlan
where
    I: IntoIterator<Item = (BlockId, Rect)>,
{
    let mut plan = ReflowPlan::default();
    let mut cursor_y = 0u16;

    for (id, original) in blocks {
        let w = scale_width(original.width, columns, reference_columns);
        let h = original.height;

        match first_fit(&plan.placed, w, h, columns, cursor_y, row_ceiling) {
            Some(rect) => {
                cursor_y = cursor_y.max(rect.y);
                plan.placed.push((id, rect));
            }
            None => plan.overflowed.push(id),
        }
    }

    plan
}

fn first_fit(
    placed: &[(BlockId, Rect)],
    w: u16,
    h: u16,
    columns: u16,
    from_y: u16,
    row_ceiling: u16,
) -> Option<Rect> {
    if w == 0 || w > columns {
        return None;
    }
    for test_y in from_y..row_ceiling {
        for test_x in 0..=(columns - w) {
            let candidate = Rect::new(test_x, test_y, w, h);
            if placed.iter().all(|(_, other)| !candidate.overlaps(other)) {
                return Some(candidate);
            }
        }
    }
    None
}

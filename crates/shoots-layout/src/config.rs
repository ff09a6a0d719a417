#![forbid(unsafe_code)]

//! Grid dimensions and breakpoint policy.
//!
//! [`GridConfig`] is the only tunable input to the engine. The reference
//! column count (the canonical layout) is the column count of the widest
//! tier; every narrower tier reflows from it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::breakpoint::{Breakpoint, Breakpoints};
use crate::responsive::Responsive;

/// Default number of tile rows.
pub const DEFAULT_ROWS: u16 = 14;

/// Default number of extra rows the reflow scan may probe below the grid.
pub const DEFAULT_REFLOW_SLACK_ROWS: u16 = 10;

/// Grid shape and responsive policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Number of tile rows (constant across breakpoints).
    pub rows: u16,
    /// Column count per breakpoint tier.
    pub columns: Responsive<u16>,
    /// Viewport widths at which each tier starts.
    pub breakpoints: Breakpoints,
    /// Rows the reflow scan may use below `rows` before giving up on a block.
    pub reflow_slack_rows: u16,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: Responsive::new(7)
                .at(Breakpoint::Md, 14)
                .at(Breakpoint::Lg, 28),
            breakpoints: Breakpoints::default(),
            reflow_slack_rows: DEFAULT_REFLOW_SLACK_ROWS,
        }
    }
}

impl GridConfig {
    /// Column count of the canonical layout.
    #[must_use]
    pub fn reference_columns(&self) -> u16 {
        *self.columns.resolve(Breakpoint::WIDEST)
    }

    /// Column count for a viewport width.
    #[must_use]
    pub fn columns_for_width(&self, width: f64) -> u16 {
        *self.columns.resolve(self.breakpoints.classify(width))
    }

    /// Exclusive upper bound on rows the reflow scan probes.
    #[must_use]
    pub fn reflow_row_ceiling(&self) -> u16 {
        self.rows.saturating_add(self.reflow_slack_rows)
    }

    /// Check structural constraints.
    pub fn validate(&self) -> Result<(), GridConfigError> {
        if self.rows == 0 {
            return Err(GridConfigError::ZeroRows);
        }
        if !self.breakpoints.is_valid() {
            return Err(GridConfigError::InvalidBreakpoints {
                md: self.breakpoints.md,
                lg: self.breakpoints.lg,
            });
        }
        let reference = self.reference_columns();
        let mut previous = 0u16;
        for (tier, &columns) in self.columns.resolved_values() {
            if columns == 0 || columns > reference {
                return Err(GridConfigError::InvalidTierColumns {
                    tier,
                    columns,
                    reference,
                });
            }
            if columns < previous {
                return Err(GridConfigError::ShrinkingColumns { tier, columns });
            }
            previous = columns;
        }
        Ok(())
    }
}

/// Grid configuration validation failures.
#[derive(Debug, Clone, PartialEq)]
pub enum GridConfigError {
    ZeroRows,
    InvalidBreakpoints {
        md: f64,
        lg: f64,
    },
    InvalidTierColumns {
        tier: Breakpoint,
        columns: u16,
        reference: u16,
    },
    ShrinkingColumns {
        tier: Breakpoint,
        columns: u16,
    },
}

impl fmt::Display for GridConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroRows => write!(f, "grid must have at least one row"),
            Self::InvalidBreakpoints { md, lg } => write!(
                f,
                "breakpoints must be finite, positive and increasing (md={md}, lg={lg})"
            ),
            Self::InvalidTierColumns {
                tier,
                columns,
                reference,
            } => write!(
                f,
                "tier {tier} has {columns} columns (must be within 1..={reference})"
            ),
            Self::ShrinkingColumns { tier, columns } => write!(
                f,
                "tier {tier} has {columns} columns, fewer than a narrower tier"
            ),
        }
    }
}

impl std::error::Error for GridConfigError {}

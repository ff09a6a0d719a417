#![forbid(unsafe_code)]

//! Viewport breakpoint tiers.
//!
//! The dashboard recognises three tiers. [`Breakpoints`] holds the pixel
//! thresholds separating them; [`Breakpoints::classify`] maps a viewport
//! width to its tier.
//!
//! | tier | default width | default columns |
//! |------|---------------|-----------------|
//! | `Sm` | `< 768`       | 7               |
//! | `Md` | `≥ 768`       | 14              |
//! | `Lg` | `≥ 1200`      | 28              |

use std::fmt;

use serde::{Deserialize, Serialize};

/// Breakpoint tier, ordered from narrowest to widest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Breakpoint {
    Sm = 0,
    Md = 1,
    Lg = 2,
}

impl Breakpoint {
    /// All tiers in ascending order.
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Sm, Breakpoint::Md, Breakpoint::Lg];

    /// The widest tier; its column count is the reference layout.
    pub const WIDEST: Breakpoint = Breakpoint::Lg;

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Minimum viewport widths (pixels) at which each tier above `Sm` begins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    pub md: f64,
    pub lg: f64,
}

impl Breakpoints {
    pub const DEFAULT: Self = Self {
        md: 768.0,
        lg: 1200.0,
    };

    #[must_use]
    pub const fn new(md: f64, lg: f64) -> Self {
        Self { md, lg }
    }

    /// Map a viewport width to its tier. NaN and negative widths land in `Sm`;
    /// positive infinity lands in `Lg`.
    #[must_use]
    pub fn classify(&self, width: f64) -> Breakpoint {
        if width >= self.lg {
            Breakpoint::Lg
        } else if width >= self.md {
            Breakpoint::Md
        } else {
            Breakpoint::Sm
        }
    }

    /// Thresholds must be finite, positive, and strictly increasing.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.md.is_finite() && self.lg.is_finite() && self.md > 0.0 && self.lg > self.md
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::DEFAULT
    }
}

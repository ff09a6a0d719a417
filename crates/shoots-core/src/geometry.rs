#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Two coordinate spaces meet here:
//!
//! - **Tile space** ([`Rect`]): integer columns/rows on the dashboard grid,
//!   origin at the top-left tile.
//! - **Pixel space** ([`PixelRect`], [`PixelPoint`]): floating-point viewport
//!   coordinates as reported by the host's pointer events.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rectangle on the tile grid.
///
/// Uses grid coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in tiles.
    pub width: u16,
    /// Height in tiles.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a tile is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Axis-aligned overlap test.
    ///
    /// Two rectangles overlap unless one lies entirely left of, right of,
    /// above, or below the other. Touching edges do not overlap.
    #[inline]
    pub const fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() <= other.x
            || other.right() <= self.x
            || self.bottom() <= other.y
            || other.bottom() <= self.y)
    }

    /// Same rectangle moved to a new origin.
    #[inline]
    #[must_use]
    pub const fn with_origin(self, x: u16, y: u16) -> Self {
        Self::new(x, y, self.width, self.height)
    }
}

/// A point in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[inline]
    #[must_use]
    pub fn offset_from(self, other: PixelPoint) -> PixelPoint {
        PixelPoint::new(self.x - other.x, self.y - other.y)
    }
}

/// A rectangle in viewport pixels, typically an element's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    #[inline]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> PixelPoint {
        PixelPoint::new(self.left, self.top)
    }

    /// Whether both dimensions are finite and strictly positive.
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Convert a viewport point to coordinates relative to this rectangle's origin.
    #[inline]
    pub fn to_local(&self, point: PixelPoint) -> PixelPoint {
        point.offset_from(self.origin())
    }
}

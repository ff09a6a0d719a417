#![forbid(unsafe_code)]

//! Grid blocks: the rectangles the dashboard places widgets into.

use std::fmt;

use serde::{Deserialize, Serialize};
use shoots_core::geometry::Rect;

/// Stable identifier for a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(u32);

impl BlockId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A tile position (column, row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TilePosition {
    pub x: u16,
    pub y: u16,
}

impl TilePosition {
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for TilePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Declarative description of a block in the canonical (reference-column) layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSpec {
    pub id: BlockId,
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
    #[serde(default)]
    pub label: String,
}

impl BlockSpec {
    #[must_use]
    pub fn new(id: u32, x: u16, y: u16, w: u16, h: u16) -> Self {
        Self {
            id: BlockId::new(id),
            x,
            y,
            w,
            h,
            label: format!("{w}×{h} Block"),
        }
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub const fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// A block on the grid.
///
/// `rect` is where the block currently sits at the active column count.
/// `original` is its canonical rectangle at the reference column count:
/// reflow reads it and never writes it, so returning to the reference
/// column count restores the layout exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub label: String,
    rect: Rect,
    original: Rect,
}

impl Block {
    pub(crate) fn from_spec(spec: BlockSpec) -> Self {
        let rect = spec.rect();
        Self {
            id: spec.id,
            label: spec.label,
            rect,
            original: rect,
        }
    }

    /// Current rectangle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Canonical rectangle at the reference column count.
    #[must_use]
    pub const fn original(&self) -> Rect {
        self.original
    }

    #[must_use]
    pub const fn position(&self) -> TilePosition {
        TilePosition::new(self.rect.x, self.rect.y)
    }

    #[must_use]
    pub const fn x(&self) -> u16 {
        self.rect.x
    }

    #[must_use]
    pub const fn y(&self) -> u16 {
        self.rect.y
    }

    #[must_use]
    pub const fn w(&self) -> u16 {
        self.rect.width
    }

    #[must_use]
    pub const fn h(&self) -> u16 {
        self.rect.height
    }

    pub(crate) fn move_to(&mut self, position: TilePosition) {
        self.rect = self.rect.with_origin(position.x, position.y);
    }

    pub(crate) fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// Persist the current origin as canonical (reference-column commits only).
    pub(crate) fn persist_origin(&mut self) {
        self.original = self.original.with_origin(self.rect.x, self.rect.y);
    }

    pub(crate) fn restore_original(&mut self) {
        self.rect = self.original;
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x:{} y:{} | {}×{}",
            self.id,
            self.rect.x,
            self.rect.y,
            self.rect.width,
            self.rect.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_defaults_label_to_size() {
        let spec = BlockSpec::new(1, 0, 0, 6, 4);
        assert_eq!(spec.label, "6×4 Block");
        assert_eq!(spec.clone().label("Savings").label, "Savings");
    }

    #[test]
    fn move_keeps_original() {
        let mut block = Block::from_spec(BlockSpec::new(1, 0, 0, 6, 4));
        block.move_to(TilePosition::new(20, 10));
        assert_eq!(block.rect(), Rect::new(20, 10, 6, 4));
        assert_eq!(block.original(), Rect::new(0, 0, 6, 4));

        block.persist_origin();
        assert_eq!(block.original(), Rect::new(20, 10, 6, 4));
    }

    #[test]
    fn restore_undoes_resize() {
        let mut block = Block::from_spec(BlockSpec::new(2, 6, 0, 6, 4));
        block.set_rect(Rect::new(2, 0, 2, 4));
        block.restore_original();
        assert_eq!(block.rect(), Rect::new(6, 0, 6, 4));
    }

    #[test]
    fn display_shows_coordinates() {
        let block = Block::from_spec(BlockSpec::new(3, 12, 0, 6, 4));
        assert_eq!(block.to_string(), "#3 x:12 y:0 | 6×4");
    }
}

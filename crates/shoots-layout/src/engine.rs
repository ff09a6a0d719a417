#![forbid(unsafe_code)]

//! The grid layout engine.
//!
//! [`GridLayoutEngine`] owns every block on the dashboard grid, turns pointer
//! gestures into tile-snapped placements, rejects overlapping drops, and
//! reflows the layout when the column count changes.
//!
//! # State Machine
//!
//! Per block: `Idle → Dragging (begin_drag) → Idle at the drop position
//! (no collision) | Idle at the original position (collision)`.
//! [`GridLayoutEngine::set_columns`] is a global transform over idle blocks;
//! any drag in progress is cancelled first.
//!
//! # Invariants
//!
//! 1. At the reference column count no two placed blocks overlap, and every
//!    block's current rectangle equals its canonical rectangle.
//! 2. At any column count no two placed blocks overlap.
//! 3. A committed drop lies inside `[0, columns - w] × [0, rows - h]`.
//! 4. A reverted drop leaves the block exactly where the drag began.
//! 5. `set_columns(reference)` restores every canonical rectangle, so a
//!    reflow round trip is lossless.
//!
//! # Failure Modes
//!
//! - Unknown block ids are caller bugs and surface as
//!   [`GridError::UnknownBlock`]; state is left untouched.
//! - `update_drag`/`end_drag` without an active session are no-ops.
//! - Reflow overflow parks blocks instead of losing them; see
//!   [`ReflowReport::overflowed`].

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use shoots_core::event::{Event, PointerEventKind};
use shoots_core::geometry::{PixelPoint, PixelRect, Rect};
use tracing::{debug, debug_span, warn};

use crate::block::{Block, BlockId, BlockSpec, TilePosition};
use crate::config::{GridConfig, GridConfigError};
use crate::drag::{DragSession, DragStart, DropOutcome, RevertReason, TileMetrics, clamp_axis};
use crate::placement::{BlockPlacement, Placement};
use crate::reflow::reflow;

/// Engine failures. All of them leave the engine state unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    Config(GridConfigError),
    DuplicateBlock(BlockId),
    EmptyBlock { id: BlockId },
    OutOfBounds { id: BlockId, rect: Rect, columns: u16, rows: u16 },
    Overlap { first: BlockId, second: BlockId },
    CanonicalDrift { id: BlockId, rect: Rect, canonical: Rect },
    UnknownBlock(BlockId),
    BlockNotPlaced(BlockId),
    InvalidColumns { requested: u16, reference: u16 },
    UnusableBounds(PixelRect),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid grid config: {err}"),
            Self::DuplicateBlock(id) => write!(f, "block {id} declared more than once"),
            Self::EmptyBlock { id } => write!(f, "block {id} must be at least 1×1"),
            Self::OutOfBounds {
                id,
                rect,
                columns,
                rows,
            } => write!(
                f,
                "block {id} at ({}, {}) {}×{} does not fit a {columns}×{rows} grid",
                rect.x, rect.y, rect.width, rect.height
            ),
            Self::Overlap { first, second } => {
                write!(f, "blocks {first} and {second} overlap in the canonical layout")
            }
            Self::CanonicalDrift {
                id,
                rect,
                canonical,
            } => write!(
                f,
                "block {id} sits at ({}, {}) but its canonical origin is ({}, {})",
                rect.x, rect.y, canonical.x, canonical.y
            ),
            Self::UnknownBlock(id) => write!(f, "block {id} not found"),
            Self::BlockNotPlaced(id) => {
                write!(f, "block {id} is parked in overflow at the current column count")
            }
            Self::InvalidColumns {
                requested,
                reference,
            } => write!(
                f,
                "column count {requested} out of range (must be within 1..={reference})"
            ),
            Self::UnusableBounds(bounds) => write!(
                f,
                "grid bounds {}×{} at ({}, {}) have no usable size",
                bounds.width, bounds.height, bounds.left, bounds.top
            ),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Self::Config(err) = self {
            return Some(err);
        }
        None
    }
}

impl From<GridConfigError> for GridError {
    fn from(err: GridConfigError) -> Self {
        Self::Config(err)
    }
}

/// What a column change did to the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnChange {
    /// Same column count as before; nothing recomputed.
    Unchanged,
    /// Back at the reference column count; canonical rectangles restored.
    Restored,
    /// Narrower grid; blocks reflowed from their canonical rectangles.
    Reflowed,
}

/// Result of [`GridLayoutEngine::set_columns`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflowReport {
    pub from: u16,
    pub to: u16,
    pub change: ColumnChange,
    /// Blocks that found no room and are parked until the grid widens.
    pub overflowed: Vec<BlockId>,
    /// Drag session cancelled to make way for the column change.
    pub cancelled_drag: Option<BlockId>,
}

/// What handling one input event did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum EngineEffect {
    /// The event did not touch engine state.
    Noop,
    DragStarted(DragStart),
    DragMoved {
        block: BlockId,
        pixel_position: PixelPoint,
    },
    Dropped(DropOutcome),
    Columns(ReflowReport),
}

/// Owner of all block positions and the transient drag session.
#[derive(Debug, Clone)]
pub struct GridLayoutEngine {
    config: GridConfig,
    columns: u16,
    blocks: Vec<Block>,
    index: FxHashMap<BlockId, usize>,
    overflowed: Vec<BlockId>,
    drag: Option<DragSession>,
}

impl GridLayoutEngine {
    /// Build an engine at the reference column count.
    ///
    /// The specs describe the canonical layout: each must be at least 1×1,
    /// fit inside `reference_columns × rows`, and overlap no other spec.
    pub fn new(
        config: GridConfig,
        specs: impl IntoIterator<Item = BlockSpec>,
    ) -> Result<Self, GridError> {
        config.validate()?;
        let columns = config.reference_columns();
        let rows = config.rows;

        let mut blocks: Vec<Block> = Vec::new();
        let mut index = FxHashMap::default();
        for spec in specs {
            let rect = spec.rect();
            if rect.is_empty() {
                return Err(GridError::EmptyBlock { id: spec.id });
            }
            if rect.right() > columns || rect.bottom() > rows {
                return Err(GridError::OutOfBounds {
                    id: spec.id,
                    rect,
                    columns,
                    rows,
                });
            }
            if index.contains_key(&spec.id) {
                return Err(GridError::DuplicateBlock(spec.id));
            }
            if let Some(existing) = blocks.iter().find(|b| b.rect().overlaps(&rect)) {
                return Err(GridError::Overlap {
                    first: existing.id,
                    second: spec.id,
                });
            }
            index.insert(spec.id, blocks.len());
            blocks.push(Block::from_spec(spec));
        }

        debug!(blocks = blocks.len(), columns, rows, "grid engine ready");
        Ok(Self {
            config,
            columns,
            blocks,
            index,
            overflowed: Vec::new(),
            drag: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Active column count.
    #[must_use]
    pub fn columns(&self) -> u16 {
        self.columns
    }

    #[must_use]
    pub fn rows(&self) -> u16 {
        self.config.rows
    }

    #[must_use]
    pub fn reference_columns(&self) -> u16 {
        self.config.reference_columns()
    }

    #[must_use]
    pub fn is_reference(&self) -> bool {
        self.columns == self.reference_columns()
    }

    /// All blocks in insertion order, including parked ones.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.index.get(&id).map(|&i| &self.blocks[i])
    }

    /// Blocks parked by the last reflow.
    #[must_use]
    pub fn overflowed(&self) -> &[BlockId] {
        &self.overflowed
    }

    #[must_use]
    pub fn is_placed(&self, id: BlockId) -> bool {
        self.index.contains_key(&id) && !self.overflowed.contains(&id)
    }

    #[must_use]
    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Pixel size of one tile for the given grid bounds.
    #[must_use]
    pub fn tile_metrics(&self, bounds: PixelRect) -> TileMetrics {
        TileMetrics::new(bounds, self.columns, self.config.rows)
    }

    fn placed_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks
            .iter()
            .filter(|block| !self.overflowed.contains(&block.id))
    }

    /// First placed block other than `id` whose rectangle overlaps `rect`.
    #[must_use]
    pub fn collision(&self, id: BlockId, rect: Rect) -> Option<BlockId> {
        self.placed_blocks()
            .find(|other| other.id != id && other.rect().overlaps(&rect))
            .map(|other| other.id)
    }

    /// Top-most placed block under a viewport point.
    ///
    /// Later blocks are drawn over earlier ones, so the search runs from the
    /// end of the insertion order.
    #[must_use]
    pub fn hit_test(&self, pointer: PixelPoint, bounds: PixelRect) -> Option<BlockId> {
        if !bounds.is_usable() {
            return None;
        }
        let metrics = self.tile_metrics(bounds);
        let local = bounds.to_local(pointer);
        if local.x < 0.0 || local.y < 0.0 || local.x >= bounds.width {
            return None;
        }
        let column = (local.x / metrics.tile_width).floor();
        let row = (local.y / metrics.tile_height).floor();
        if !column.is_finite() || !row.is_finite() || row > f64::from(u16::MAX) {
            return None;
        }
        // Both are non-negative and within u16 range here.
        let (column, row) = (column as u16, row as u16);
        self.placed_blocks()
            .filter(|block| block.rect().contains(column, row))
            .last()
            .map(|block| block.id)
    }

    /// Start dragging `id` from a pointer position.
    ///
    /// Starting while another drag is active is ignored and reported as
    /// [`DragStart::AlreadyDragging`].
    pub fn begin_drag(
        &mut self,
        id: BlockId,
        pointer: PixelPoint,
        bounds: PixelRect,
    ) -> Result<DragStart, GridError> {
        let Some(&slot) = self.index.get(&id) else {
            warn!(block = %id, "drag requested for unknown block");
            return Err(GridError::UnknownBlock(id));
        };
        if self.overflowed.contains(&id) {
            return Err(GridError::BlockNotPlaced(id));
        }
        if !bounds.is_usable() {
            return Err(GridError::UnusableBounds(bounds));
        }
        if let Some(active) = &self.drag {
            debug!(block = %id, active = %active.block, "drag ignored: another drag is active");
            return Ok(DragStart::AlreadyDragging {
                active: active.block,
            });
        }

        let position = self.blocks[slot].position();
        let metrics = self.tile_metrics(bounds);
        self.drag = Some(DragSession::start(id, position, pointer, bounds, metrics));
        debug!(block = %id, %position, "drag started");
        Ok(DragStart::Started {
            block: id,
            original_position: position,
        })
    }

    /// Follow the pointer. Returns the new free-form pixel origin, or `None`
    /// when no drag is active.
    pub fn update_drag(&mut self, pointer: PixelPoint, bounds: PixelRect) -> Option<PixelPoint> {
        let session = self.drag.as_mut()?;
        session.follow(pointer, bounds);
        Some(session.pixel_position)
    }

    /// Drop the dragged block: snap, clamp, check collisions, then commit or
    /// revert. Returns `None` when no drag is active.
    pub fn end_drag(&mut self, bounds: PixelRect) -> Option<DropOutcome> {
        let session = self.drag.take()?;
        let Some(&slot) = self.index.get(&session.block) else {
            // Sessions are only created for indexed blocks.
            return None;
        };
        let (w, h, rect) = {
            let block = &self.blocks[slot];
            (block.w(), block.h(), block.rect())
        };

        if !bounds.is_usable() {
            warn!(block = %session.block, "drop on unusable grid bounds; reverting");
            return Some(self.revert(slot, session, RevertReason::UnusableBounds));
        }

        let metrics = self.tile_metrics(bounds);
        let (snapped_x, snapped_y) = metrics.snap(session.pixel_position, w, h);
        let target = TilePosition::new(
            clamp_axis(snapped_x, w, self.columns),
            clamp_axis(snapped_y, h, self.config.rows),
        );
        let candidate = rect.with_origin(target.x, target.y);

        if let Some(blocker) = self.collision(session.block, candidate) {
            debug!(block = %session.block, %blocker, %target, "drop collides; reverting");
            return Some(self.revert(slot, session, RevertReason::Collision { with: blocker }));
        }

        let reference = self.is_reference();
        let block = &mut self.blocks[slot];
        block.move_to(target);
        if reference {
            block.persist_origin();
        }
        debug!(
            block = %session.block,
            from = %session.original_position,
            to = %target,
            canonical = reference,
            "drop committed"
        );
        Some(DropOutcome::Committed {
            block: session.block,
            from: session.original_position,
            to: target,
        })
    }

    /// Abandon the active drag without moving anything.
    pub fn cancel_drag(&mut self) -> Option<DropOutcome> {
        let session = self.drag.take()?;
        let slot = *self.index.get(&session.block)?;
        debug!(block = %session.block, "drag cancelled");
        Some(self.revert(slot, session, RevertReason::Cancelled))
    }

    fn revert(&mut self, slot: usize, session: DragSession, reason: RevertReason) -> DropOutcome {
        self.blocks[slot].move_to(session.original_position);
        DropOutcome::Reverted {
            block: session.block,
            at: session.original_position,
            reason,
        }
    }

    /// Switch to `new_columns`.
    ///
    /// The reference count restores canonical rectangles; anything narrower
    /// reflows from them. Repeating the current count is a no-op.
    pub fn set_columns(&mut self, new_columns: u16) -> Result<ReflowReport, GridError> {
        let reference = self.reference_columns();
        if new_columns == 0 || new_columns > reference {
            return Err(GridError::InvalidColumns {
                requested: new_columns,
                reference,
            });
        }

        let from = self.columns;
        if new_columns == from {
            return Ok(ReflowReport {
                from,
                to: new_columns,
                change: ColumnChange::Unchanged,
                overflowed: self.overflowed.clone(),
                cancelled_drag: None,
            });
        }

        let cancelled_drag = self.cancel_drag().map(|outcome| outcome.block());

        let change = if new_columns == reference {
            for block in &mut self.blocks {
                block.restore_original();
            }
            self.overflowed.clear();
            ColumnChange::Restored
        } else {
            let _span = debug_span!("grid.reflow", from, to = new_columns).entered();
            let plan = reflow(
                self.blocks.iter().map(|block| (block.id, block.original())),
                new_columns,
                reference,
                self.config.reflow_row_ceiling(),
            );
            for (id, rect) in plan.placed {
                if let Some(&slot) = self.index.get(&id) {
                    self.blocks[slot].set_rect(rect);
                }
            }
            if !plan.overflowed.is_empty() {
                warn!(
                    columns = new_columns,
                    overflowed = ?plan.overflowed,
                    "reflow could not place every block"
                );
            }
            self.overflowed = plan.overflowed;
            ColumnChange::Reflowed
        };

        self.columns = new_columns;
        debug!(from, to = new_columns, ?change, "columns changed");
        Ok(ReflowReport {
            from,
            to: new_columns,
            change,
            overflowed: self.overflowed.clone(),
            cancelled_drag,
        })
    }

    /// Map a viewport width through the breakpoints and apply the resulting
    /// column count.
    pub fn set_viewport_width(&mut self, width: f64) -> Result<ReflowReport, GridError> {
        let columns = self.config.columns_for_width(width);
        self.set_columns(columns)
    }

    /// Dispatch one input event.
    ///
    /// Pointer-down hit-tests and starts a drag; move follows; up and leave
    /// both drop; resize re-evaluates the breakpoint.
    pub fn handle_event(
        &mut self,
        event: &Event,
        bounds: PixelRect,
    ) -> Result<EngineEffect, GridError> {
        match event {
            Event::Pointer(pointer) => {
                let position = pointer.position();
                match pointer.kind {
                    PointerEventKind::Down => match self.hit_test(position, bounds) {
                        Some(id) => self
                            .begin_drag(id, position, bounds)
                            .map(EngineEffect::DragStarted),
                        None => Ok(EngineEffect::Noop),
                    },
                    PointerEventKind::Move => Ok(self
                        .update_drag(position, bounds)
                        .zip(self.drag.as_ref().map(|session| session.block))
                        .map_or(EngineEffect::Noop, |(pixel_position, block)| {
                            EngineEffect::DragMoved {
                                block,
                                pixel_position,
                            }
                        })),
                    PointerEventKind::Up | PointerEventKind::Leave => Ok(self
                        .end_drag(bounds)
                        .map_or(EngineEffect::Noop, EngineEffect::Dropped)),
                }
            }
            Event::Resize { width } => self.set_viewport_width(*width).map(EngineEffect::Columns),
        }
    }

    /// Render output for every block, in insertion order.
    #[must_use]
    pub fn placements(&self, bounds: PixelRect) -> Vec<BlockPlacement> {
        let metrics = self.tile_metrics(bounds);
        self.blocks
            .iter()
            .map(|block| {
                let placement = match &self.drag {
                    _ if self.overflowed.contains(&block.id) => Placement::Overflow,
                    Some(session) if session.block == block.id => Placement::Floating {
                        rect: PixelRect::new(
                            session.pixel_position.x,
                            session.pixel_position.y,
                            f64::from(block.w()) * metrics.tile_width,
                            f64::from(block.h()) * metrics.tile_height,
                        ),
                    },
                    _ => Placement::cell(block.rect()),
                };
                BlockPlacement {
                    id: block.id,
                    label: block.label.clone(),
                    placement,
                }
            })
            .collect()
    }

    /// Check the layout invariants for the current column count.
    pub fn validate_layout(&self) -> Result<(), GridError> {
        let placed: Vec<&Block> = self.placed_blocks().collect();
        for (i, block) in placed.iter().enumerate() {
            let rect = block.rect();
            if rect.is_empty() {
                return Err(GridError::EmptyBlock { id: block.id });
            }
            // Rows only bind at the reference count; reflow may spill into slack rows.
            let below_grid = self.is_reference() && rect.bottom() > self.config.rows;
            if rect.right() > self.columns || below_grid {
                return Err(GridError::OutOfBounds {
                    id: block.id,
                    rect,
                    columns: self.columns,
                    rows: self.config.rows,
                });
            }
            if let Some(other) = placed[i + 1..]
                .iter()
                .find(|other| other.rect().overlaps(&rect))
            {
                return Err(GridError::Overlap {
                    first: block.id,
                    second: other.id,
                });
            }
            if self.is_reference() && rect != block.original() {
                return Err(GridError::CanonicalDrift {
                    id: block.id,
                    rect,
                    canonical: block.original(),
                });
            }
        }
        Ok(())
    }
}

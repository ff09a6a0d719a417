#![forbid(unsafe_code)]

//! `shoots replay`: feed a recorded event script through the engine.
//!
//! A script is JSON:
//!
//! ```json
//! {
//!   "bounds": { "left": 0, "top": 0, "width": 1120, "height": 560 },
//!   "events": [
//!     { "type": "pointer", "kind": "down", "x": 20, "y": 20 },
//!     { "type": "pointer", "kind": "move", "x": 820, "y": 420 },
//!     { "type": "pointer", "kind": "up", "x": 820, "y": 420 },
//!     { "type": "resize", "width": 500 }
//!   ]
//! }
//! ```
//!
//! `blocks` (canonical block specs) and `viewport_width` are optional; the
//! seeded dashboard at the widest tier is used otherwise.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use serde::{Deserialize, Serialize};
use shoots_core::event::{Event, PointerEventKind};
use shoots_layout::{
    BlockSpec, DragStart, DropOutcome, EngineEffect, GridConfig, GridLayoutEngine, PixelRect,
    RevertReason,
};
use tracing::{debug, info_span};

use crate::error::{Result, ShootsError};
use crate::layout::{LayoutReport, write_report};

#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    /// Path to the JSON replay script.
    pub script: PathBuf,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplayScript {
    /// Grid bounding box in viewport pixels.
    pub bounds: PixelRect,
    /// Viewport width applied before the first event.
    #[serde(default)]
    pub viewport_width: Option<f64>,
    /// Canonical layout; the dashboard seed when absent.
    #[serde(default)]
    pub blocks: Option<Vec<BlockSpec>>,
    pub events: Vec<Event>,
}

impl ReplayScript {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ShootsError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ShootsError::Script {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ReplayStep {
    pub index: usize,
    pub event: Event,
    pub effect: EngineEffect,
}

#[derive(Debug, Serialize)]
pub struct ReplayOutcome {
    pub steps: Vec<ReplayStep>,
    pub layout: LayoutReport,
}

/// Run every event in order; the first engine error aborts the replay.
pub fn replay(script: &ReplayScript, grid: &GridConfig) -> Result<(ReplayOutcome, GridLayoutEngine)> {
    let _span = info_span!("replay", events = script.events.len()).entered();
    let mut engine = match &script.blocks {
        Some(blocks) => GridLayoutEngine::new(grid.clone(), blocks.iter().cloned())?,
        None => GridLayoutEngine::dashboard(grid.clone())?,
    };

    let mut width = script.viewport_width.unwrap_or(script.bounds.width);
    if let Some(initial) = script.viewport_width {
        engine.set_viewport_width(initial)?;
    }

    let mut steps = Vec::with_capacity(script.events.len());
    for (index, event) in script.events.iter().enumerate() {
        if let Event::Resize { width: resized } = event {
            width = *resized;
        }
        let effect = engine.handle_event(event, script.bounds)?;
        debug!(index, ?effect, "replay step");
        steps.push(ReplayStep {
            index,
            event: *event,
            effect,
        });
    }

    let layout = LayoutReport::capture(&engine, script.bounds, grid.breakpoints.classify(width));
    Ok((ReplayOutcome { steps, layout }, engine))
}

pub fn run_replay(args: &ReplayArgs, grid: &GridConfig, out: &mut dyn Write) -> Result<()> {
    let script = ReplayScript::from_path(&args.script)?;
    let (outcome, engine) = replay(&script, grid)?;

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &outcome)?;
        writeln!(out)?;
        return Ok(());
    }

    for step in &outcome.steps {
        writeln!(
            out,
            "{:>3}. {:<28} {}",
            step.index + 1,
            describe_event(&step.event),
            describe_effect(&step.effect)
        )?;
    }
    writeln!(out)?;
    write_report(&outcome.layout, &engine, out)
}

#[must_use]
pub fn describe_event(event: &Event) -> String {
    match event {
        Event::Pointer(pointer) => {
            let kind = match pointer.kind {
                PointerEventKind::Down => "down",
                PointerEventKind::Move => "move",
                PointerEventKind::Up => "up",
                PointerEventKind::Leave => "leave",
            };
            format!("pointer {kind} ({:.1}, {:.1})", pointer.x, pointer.y)
        }
        Event::Resize { width } => format!("resize {width:.0}px"),
    }
}

#[must_use]
pub fn describe_effect(effect: &EngineEffect) -> String {
    match effect {
        EngineEffect::Noop => "-".to_string(),
        EngineEffect::DragStarted(DragStart::Started {
            block,
            original_position,
        }) => format!("drag {block} from {original_position}"),
        EngineEffect::DragStarted(DragStart::AlreadyDragging { active }) => {
            format!("ignored: {active} is already being dragged")
        }
        EngineEffect::DragMoved {
            block,
            pixel_position,
        } => format!(
            "{block} at ({:.1}, {:.1})px",
            pixel_position.x, pixel_position.y
        ),
        EngineEffect::Dropped(DropOutcome::Committed { block, from, to }) => {
            format!("{block} committed {from} -> {to}")
        }
        EngineEffect::Dropped(DropOutcome::Reverted { block, at, reason }) => {
            let why = match reason {
                RevertReason::Collision { with } => format!("collides with {with}"),
                RevertReason::UnusableBounds => "grid has no usable size".to_string(),
                RevertReason::Cancelled => "cancelled".to_string(),
            };
            format!("{block} reverted to {at}: {why}")
        }
        EngineEffect::Columns(report) => {
            let mut text = format!("columns {} -> {} ({:?})", report.from, report.to, report.change);
            if !report.overflowed.is_empty() {
                let ids: Vec<String> = report.overflowed.iter().map(ToString::to_string).collect();
                text.push_str(&format!(", overflow: {}", ids.join(" ")));
            }
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(events: &str) -> ReplayScript {
        serde_json::from_str(&format!(
            r#"{{"bounds": {{"left": 0, "top": 0, "width": 1120, "height": 560}}, "events": {events}}}"#
        ))
        .expect("script parses")
    }

    #[test]
    fn drag_and_drop_commits() {
        let script = script(
            r#"[
                {"type": "pointer", "kind": "down", "x": 20, "y": 20},
                {"type": "pointer", "kind": "move", "x": 820, "y": 420},
                {"type": "pointer", "kind": "up", "x": 820, "y": 420}
            ]"#,
        );
        let (outcome, engine) = replay(&script, &GridConfig::default()).expect("replays");
        assert_eq!(outcome.steps.len(), 3);
        assert_eq!(
            describe_effect(&outcome.steps[2].effect),
            "#1 committed (0, 0) -> (20, 10)"
        );
        assert_eq!(engine.blocks()[0].position().x, 20);
    }

    #[test]
    fn resize_is_tracked_for_breakpoint() {
        let script = script(r#"[{"type": "resize", "width": 500}]"#);
        let (outcome, _) = replay(&script, &GridConfig::default()).expect("replays");
        assert_eq!(outcome.layout.columns, 7);
        assert_eq!(outcome.layout.breakpoint.label(), "sm");
        assert_eq!(
            describe_effect(&outcome.steps[0].effect),
            "columns 28 -> 7 (Reflowed)"
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed = serde_json::from_str::<ReplayScript>(
            r#"{"bounds": {"left": 0, "top": 0, "width": 1, "height": 1}, "events": [], "speed": 2}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn describes_events() {
        assert_eq!(
            describe_event(&Event::pointer(PointerEventKind::Leave, 1.0, 2.5)),
            "pointer leave (1.0, 2.5)"
        );
        assert_eq!(describe_event(&Event::resize(768.0)), "resize 768px");
    }
}

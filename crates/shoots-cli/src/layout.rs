#![forbid(unsafe_code)]

//! `shoots layout`: the seeded dashboard at a given viewport width.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use shoots_layout::{
    BlockId, BlockPlacement, Breakpoint, GridConfig, GridLayoutEngine, PixelRect, Rect,
};

use crate::error::Result;

#[derive(Debug, Clone, Args)]
pub struct LayoutArgs {
    /// Viewport width in pixels; selects the breakpoint tier.
    #[arg(long, default_value_t = 1280.0)]
    pub width: f64,

    /// Grid box height in pixels (tile height = height / rows).
    #[arg(long, default_value_t = 560.0)]
    pub height: f64,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct LayoutReport {
    pub breakpoint: Breakpoint,
    pub columns: u16,
    pub rows: u16,
    pub placements: Vec<BlockPlacement>,
    pub overflowed: Vec<BlockId>,
}

impl LayoutReport {
    #[must_use]
    pub fn capture(engine: &GridLayoutEngine, bounds: PixelRect, breakpoint: Breakpoint) -> Self {
        Self {
            breakpoint,
            columns: engine.columns(),
            rows: engine.rows(),
            placements: engine.placements(bounds),
            overflowed: engine.overflowed().to_vec(),
        }
    }
}

pub fn run_layout(args: &LayoutArgs, grid: &GridConfig, out: &mut dyn Write) -> Result<()> {
    let mut engine = GridLayoutEngine::dashboard(grid.clone())?;
    engine.set_viewport_width(args.width)?;
    let bounds = PixelRect::new(0.0, 0.0, args.width, args.height);
    let report = LayoutReport::capture(&engine, bounds, grid.breakpoints.classify(args.width));

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }
    write_report(&report, &engine, out)
}

pub(crate) fn write_report(
    report: &LayoutReport,
    engine: &GridLayoutEngine,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(
        out,
        "{} tier: {} columns × {} rows",
        report.breakpoint, report.columns, report.rows
    )?;
    for placement in &report.placements {
        writeln!(
            out,
            "  {:<4} {:<12} {}",
            placement.id.to_string(),
            placement.label,
            placement.placement
        )?;
    }
    writeln!(out)?;
    for line in ascii_map(engine) {
        writeln!(out, "  {line}")?;
    }
    Ok(())
}

/// One text row per tile row; each placed block is drawn with the last
/// character of its id, free tiles as `.`.
#[must_use]
pub fn ascii_map(engine: &GridLayoutEngine) -> Vec<String> {
    let placed: Vec<(char, Rect)> = engine
        .blocks()
        .iter()
        .filter(|block| engine.is_placed(block.id))
        .map(|block| (marker(block.id), block.rect()))
        .collect();
    let height = placed
        .iter()
        .map(|(_, rect)| rect.bottom())
        .max()
        .unwrap_or(0)
        .max(engine.rows());

    (0..height)
        .map(|row| {
            (0..engine.columns())
                .map(|column| {
                    placed
                        .iter()
                        .rev()
                        .find(|(_, rect)| rect.contains(column, row))
                        .map_or('.', |(mark, _)| *mark)
                })
                .collect()
        })
        .collect()
}

fn marker(id: BlockId) -> char {
    char::from_digit(id.get() % 36, 36).unwrap_or('#')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &LayoutArgs) -> String {
        let mut out = Vec::new();
        run_layout(args, &GridConfig::default(), &mut out).expect("layout runs");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn narrow_viewport_reflows_to_seven_columns() {
        let text = run(&LayoutArgs {
            width: 500.0,
            height: 560.0,
            json: false,
        });
        assert!(text.starts_with("sm tier: 7 columns × 14 rows"), "{text}");
        assert!(text.contains("col 3 / span 2, row 1 / span 4"), "{text}");
        assert!(text.contains("  112233.\n"), "{text}");
    }

    #[test]
    fn json_lists_cells() {
        let text = run(&LayoutArgs {
            width: 1280.0,
            height: 560.0,
            json: true,
        });
        let value: serde_json::Value = serde_json::from_str(&text).expect("json");
        assert_eq!(value["columns"], 28);
        assert_eq!(value["breakpoint"], "lg");
        assert_eq!(value["placements"][2]["placement"]["column_start"], 13);
        assert_eq!(value["overflowed"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn ascii_map_marks_blocks() {
        let engine = GridLayoutEngine::dashboard(GridConfig::default()).expect("valid");
        let map = ascii_map(&engine);
        assert_eq!(map.len(), 14);
        assert_eq!(map[0], "111111222222333333..........");
        assert_eq!(map[4], ".".repeat(28));
    }
}

//! Property tests: random layouts and random gesture/resize streams must
//! never produce overlapping blocks, out-of-grid drops, or a lossy reflow.

use proptest::prelude::*;
use shoots_layout::{
    BlockSpec, DropOutcome, GridConfig, GridError, GridLayoutEngine, PixelPoint, PixelRect, Rect,
};

const BOUNDS: PixelRect = PixelRect::new(0.0, 0.0, 1120.0, 560.0);

#[derive(Debug, Clone)]
enum Op {
    Drag { block: usize, to_x: f64, to_y: f64 },
    Columns(u16),
    Cancel { block: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..8, -400.0f64..1600.0, -400.0f64..900.0)
            .prop_map(|(block, to_x, to_y)| Op::Drag { block, to_x, to_y }),
        2 => prop::sample::select(vec![7u16, 14, 28]).prop_map(Op::Columns),
        1 => (0usize..8).prop_map(|block| Op::Cancel { block }),
    ]
}

/// Random rectangles on the 28×14 grid, keeping only those that do not
/// overlap an earlier one.
fn layout_strategy() -> impl Strategy<Value = Vec<BlockSpec>> {
    prop::collection::vec((0u16..28, 0u16..14, 1u16..9, 1u16..6), 1..9).prop_map(|raw| {
        let mut taken: Vec<Rect> = Vec::new();
        let mut specs = Vec::new();
        for (i, (x, y, w, h)) in raw.into_iter().enumerate() {
            let rect = Rect::new(x, y, w.min(28 - x), h.min(14 - y));
            if taken.iter().any(|other| other.overlaps(&rect)) {
                continue;
            }
            taken.push(rect);
            specs.push(BlockSpec::new(i as u32 + 1, rect.x, rect.y, rect.width, rect.height));
        }
        specs
    })
}

fn rects(engine: &GridLayoutEngine) -> Vec<Rect> {
    engine.blocks().iter().map(|block| block.rect()).collect()
}

/// Apply one op and check the per-op invariants.
fn apply(engine: &mut GridLayoutEngine, op: &Op) -> Result<(), TestCaseError> {
    match *op {
        Op::Drag { block, to_x, to_y } => {
            let target = &engine.blocks()[block % engine.blocks().len()];
            let (id, start) = (target.id, target.position());
            let metrics = engine.tile_metrics(BOUNDS);
            let grab = PixelPoint::new(
                f64::from(start.x) * metrics.tile_width + 1.0,
                f64::from(start.y) * metrics.tile_height + 1.0,
            );
            match engine.begin_drag(id, grab, BOUNDS) {
                Ok(_) => {}
                Err(GridError::BlockNotPlaced(_)) => {
                    prop_assert!(engine.overflowed().contains(&id));
                    return Ok(());
                }
                Err(err) => return Err(TestCaseError::fail(format!("unexpected error: {err}"))),
            }
            engine.update_drag(PixelPoint::new(to_x, to_y), BOUNDS);
            let outcome = engine.end_drag(BOUNDS);
            let block = engine.block(id).expect("block still exists");
            match outcome {
                Some(DropOutcome::Committed { to, .. }) => {
                    prop_assert_eq!(block.position(), to);
                    prop_assert!(to.x <= engine.columns().saturating_sub(block.w()));
                    prop_assert!(to.y <= engine.rows().saturating_sub(block.h()));
                }
                Some(DropOutcome::Reverted { at, .. }) => {
                    prop_assert_eq!(at, start);
                    prop_assert_eq!(block.position(), start);
                }
                None => return Err(TestCaseError::fail("drop without an active session")),
            }
        }
        Op::Columns(columns) => {
            let report = engine
                .set_columns(columns)
                .map_err(|err| TestCaseError::fail(err.to_string()))?;
            prop_assert_eq!(report.to, columns);
            prop_assert_eq!(engine.columns(), columns);
        }
        Op::Cancel { block } => {
            let id = engine.blocks()[block % engine.blocks().len()].id;
            if engine.is_placed(id) {
                engine
                    .begin_drag(id, PixelPoint::new(0.0, 0.0), BOUNDS)
                    .map_err(|err| TestCaseError::fail(err.to_string()))?;
                let before = engine.block(id).map(|b| b.position());
                let outcome = engine.cancel_drag().expect("session active");
                prop_assert_eq!(Some(outcome.position()), before);
            }
        }
    }
    prop_assert!(!engine.is_dragging());
    prop_assert_eq!(engine.validate_layout(), Ok(()));
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn random_operation_streams_preserve_invariants(
        specs in layout_strategy(),
        ops in prop::collection::vec(op_strategy(), 1..40),
    ) {
        let mut engine = GridLayoutEngine::new(GridConfig::default(), specs)
            .expect("generated layouts never overlap");
        for op in &ops {
            apply(&mut engine, op)?;
        }
        engine.set_columns(28).expect("reference columns are valid");
        prop_assert_eq!(engine.validate_layout(), Ok(()));
        prop_assert!(engine.overflowed().is_empty());
    }

    #[test]
    fn reflow_round_trip_is_identity(
        specs in layout_strategy(),
        narrow in prop::sample::select(vec![7u16, 14]),
    ) {
        let mut engine = GridLayoutEngine::new(GridConfig::default(), specs)
            .expect("generated layouts never overlap");
        let canonical = rects(&engine);
        engine.set_columns(narrow).expect("valid");
        prop_assert_eq!(engine.validate_layout(), Ok(()));
        engine.set_columns(28).expect("valid");
        prop_assert_eq!(rects(&engine), canonical);
    }

    #[test]
    fn reflow_is_deterministic(specs in layout_strategy()) {
        let mut a = GridLayoutEngine::new(GridConfig::default(), specs.clone()).expect("valid");
        let mut b = GridLayoutEngine::new(GridConfig::default(), specs).expect("valid");
        a.set_columns(7).expect("valid");
        b.set_columns(14).expect("valid");
        b.set_columns(7).expect("valid");
        prop_assert_eq!(rects(&a), rects(&b));
        prop_assert_eq!(a.overflowed(), b.overflowed());
    }
}

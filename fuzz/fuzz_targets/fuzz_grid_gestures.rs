#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shoots_core::event::{Event, PointerEventKind};
use shoots_layout::{BlockSpec, GridConfig, GridLayoutEngine, PixelRect, Rect};

#[derive(Debug, Arbitrary)]
enum Step {
    Pointer { kind: u8, x: i16, y: i16 },
    Resize { width: u16 },
    Cancel,
}

#[derive(Debug, Arbitrary)]
struct Input {
    blocks: Vec<(u8, u8, u8, u8)>,
    bounds: (i16, i16, u16, u16),
    steps: Vec<Step>,
}

fuzz_target!(|input: Input| {
    // Keep only blocks that fit the 28×14 grid without overlapping.
    let mut taken: Vec<Rect> = Vec::new();
    let mut specs = Vec::new();
    for (i, &(x, y, w, h)) in input.blocks.iter().take(16).enumerate() {
        let x = u16::from(x % 28);
        let y = u16::from(y % 14);
        let rect = Rect::new(x, y, (u16::from(w) % 8 + 1).min(28 - x), (u16::from(h) % 6 + 1).min(14 - y));
        if taken.iter().any(|other| other.overlaps(&rect)) {
            continue;
        }
        taken.push(rect);
        specs.push(BlockSpec::new(i as u32, rect.x, rect.y, rect.width, rect.height));
    }
    let Ok(mut engine) = GridLayoutEngine::new(GridConfig::default(), specs) else {
        panic!("filtered layout rejected");
    };

    let (left, top, width, height) = input.bounds;
    let bounds = PixelRect::new(f64::from(left), f64::from(top), f64::from(width), f64::from(height));

    for step in input.steps.iter().take(256) {
        match *step {
            Step::Pointer { kind, x, y } => {
                let kind = match kind % 4 {
                    0 => PointerEventKind::Down,
                    1 => PointerEventKind::Move,
                    2 => PointerEventKind::Up,
                    _ => PointerEventKind::Leave,
                };
                let event = Event::pointer(kind, f64::from(x), f64::from(y));
                // Hit-tested blocks always exist, so only bounds can be refused.
                let _ = engine.handle_event(&event, bounds);
            }
            Step::Resize { width } => {
                engine
                    .handle_event(&Event::resize(f64::from(width)), bounds)
                    .expect("breakpoint tiers are always valid column counts");
            }
            Step::Cancel => {
                engine.cancel_drag();
            }
        }
        if !engine.is_dragging() {
            assert_eq!(engine.validate_layout(), Ok(()));
        }
    }

    engine.set_columns(28).expect("reference columns");
    assert_eq!(engine.validate_layout(), Ok(()));
    assert!(engine.overflowed().is_empty());
});

#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use gridpager::{AxisExtent, DragPhase, Pager, PagerConfig};
use gridpager_core::event::{DragEvent, PagerEvent, ScenePhase};
use gridpager_core::geometry::{Axis, Size, Vec2};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    total_horizontal: Option<u8>,
    total_vertical: Option<u8>,
    initial: (u8, u8),
    bounce: bool,
    ops: Vec<Op>,
}

#[derive(Debug, Arbitrary)]
enum Op {
    Changed { x: i16, y: i16 },
    Ended { x: i16, y: i16, px: i16, py: i16 },
    Cancelled,
    Tick { ms: u8 },
    Complete { generation: u8 },
    Scene { phase: u8 },
    Resize { width: u16, height: u16 },
}

fn start_page(initial: u8, total: Option<u8>) -> i64 {
    match total {
        Some(0) | None => 0,
        Some(t) => i64::from(initial % t),
    }
}

fn vec(x: i16, y: i16) -> Vec2 {
    Vec2::new(f64::from(x), f64::from(y))
}

fuzz_target!(|input: Input| {
    let config = PagerConfig::new()
        .total_horizontal_pages(input.total_horizontal.map(u32::from))
        .total_vertical_pages(input.total_vertical.map(u32::from))
        .initial_page(
            start_page(input.initial.0, input.total_horizontal),
            start_page(input.initial.1, input.total_vertical),
        )
        .bounce(input.bounce)
        .enable_page_visibility(true);
    let mut pager = Pager::new(config, |h: i64, v: i64| (h, v));
    pager.resize(Size::new(320.0, 640.0));

    for op in input.ops.into_iter().take(512) {
        let event: PagerEvent = match op {
            Op::Changed { x, y } => DragEvent::changed(vec(x, y)).into(),
            Op::Ended { x, y, px, py } => DragEvent::ended(vec(x, y), vec(px, py)).into(),
            Op::Cancelled => DragEvent::ExternallyCancelled.into(),
            Op::Tick { ms } => {
                pager.tick(Duration::from_millis(u64::from(ms)));
                continue;
            }
            Op::Complete { generation } => {
                if let Some(request) = pager.pending_settle() {
                    if request.ticket.generation() % 4 == u64::from(generation % 4) {
                        pager.complete_settle(request.ticket);
                    }
                }
                continue;
            }
            Op::Scene { phase } => match phase % 3 {
                0 => ScenePhase::Active,
                1 => ScenePhase::Inactive,
                _ => ScenePhase::Background,
            }
            .into(),
            Op::Resize { width, height } => {
                PagerEvent::Resize(Size::new(f64::from(width), f64::from(height)))
            }
        };
        pager.handle(event);

        // Post-conditions that must always hold:
        let index = pager.index();
        let extents = pager.machine().extents();
        for axis in [Axis::Horizontal, Axis::Vertical] {
            if let AxisExtent::Finite(total) = extents.get(axis) {
                if total > 0 {
                    assert!(extents.get(axis).contains(index.get(axis)), "index OOB");
                }
            }
        }
        let offset = pager.offset();
        assert!(offset.is_finite(), "offset not finite");
        match pager.phase() {
            DragPhase::Idle => assert!(offset.is_zero(), "idle with offset"),
            DragPhase::Dragging(session) => match session.locked_axis {
                Some(axis) => assert_eq!(offset.component(axis.cross()), 0.0),
                None => assert!(offset.is_zero()),
            },
            DragPhase::Settling { .. } => {}
        }
        assert_eq!(pager.context().current_page(), index);
        let _ = pager.frame();
    }
});

#![forbid(unsafe_code)]

//! The neighbor window: which cells exist around the current page and
//! where they sit.
//!
//! Only a small cross of cells is ever materialized: the current page plus
//! its immediate neighbor on each side of each axis (the 3×3 cross). With
//! bounce enabled the window reaches two pages out, so a rubber-band pull
//! past the first neighbor never uncovers empty space (the 5×5 cross).
//!
//! On a finite axis a neighbor outside `[0, total)` is simply left out.
//! Display never wraps; wrap-around only happens when a commit advances the
//! index.
//!
//! Rendering is external. A [`CellProvider`] produces content for a page
//! pair and a [`GridComposer`] receives the placed cells each frame.

use smallvec::SmallVec;

use gridpager_core::geometry::{Axis, Size, Vec2};

use crate::context::PagerSnapshot;
use crate::extent::GridExtent;
use crate::index::{Direction, PageIndex};
use crate::visibility::NeighborRole;

/// Inline capacity of a neighbor window (the 5×5 cross holds nine cells).
pub const MAX_SLOTS: usize = 9;

/// One cell position in the neighbor window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NeighborSlot {
    /// Side of the current page, or `Current`.
    pub role: NeighborRole,
    /// Horizontal position in page units relative to the current page.
    pub dx: i8,
    /// Vertical position in page units relative to the current page.
    pub dy: i8,
    /// The page shown in this slot.
    pub page: PageIndex,
}

impl NeighborSlot {
    /// Pages away from the current page (0, 1 or 2).
    #[inline]
    #[must_use]
    pub fn depth(self) -> u8 {
        self.dx.unsigned_abs().max(self.dy.unsigned_abs())
    }

    /// Top-left corner of the slot in viewport coordinates.
    #[must_use]
    pub fn origin(self, page_size: Size, offset: Vec2) -> Vec2 {
        Vec2::new(
            f64::from(self.dx) * page_size.width + offset.x,
            f64::from(self.dy) * page_size.height + offset.y,
        )
    }
}

/// Builds the neighbor window for an index.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeighborGrid;

impl NeighborGrid {
    /// Slots for `index`, current first, then depth 1, then depth 2.
    #[must_use]
    pub fn compose(
        index: PageIndex,
        extents: GridExtent,
        bounce: bool,
    ) -> SmallVec<[NeighborSlot; MAX_SLOTS]> {
        let mut slots = SmallVec::new();
        slots.push(NeighborSlot {
            role: NeighborRole::Current,
            dx: 0,
            dy: 0,
            page: index,
        });
        let reach: i8 = if bounce { 2 } else { 1 };
        for depth in 1..=reach {
            for axis in [Axis::Horizontal, Axis::Vertical] {
                for direction in [Direction::Backward, Direction::Forward] {
                    let delta = depth * direction.step() as i8;
                    let Some(page_on_axis) =
                        index.neighbor(axis, i64::from(delta), extents.get(axis))
                    else {
                        continue;
                    };
                    let (dx, dy, page) = match axis {
                        Axis::Horizontal => (
                            delta,
                            0,
                            PageIndex::new(page_on_axis, index.vertical),
                        ),
                        Axis::Vertical => (
                            0,
                            delta,
                            PageIndex::new(index.horizontal, page_on_axis),
                        ),
                    };
                    slots.push(NeighborSlot {
                        role: NeighborRole::neighbor(axis, direction),
                        dx,
                        dy,
                        page,
                    });
                }
            }
        }
        slots
    }
}

// ---------------------------------------------------------------------------
// Cell content
// ---------------------------------------------------------------------------

/// Produces the content for a page pair.
///
/// Called for every slot of the window on every frame, including cells that
/// may never come on screen, so implementations should be cheap and free of
/// side effects.
pub trait CellProvider {
    /// Rendered content type.
    type Cell;

    /// Content for page `(horizontal, vertical)`.
    fn cell(&self, horizontal: i64, vertical: i64) -> Self::Cell;
}

impl<T, F> CellProvider for F
where
    F: Fn(i64, i64) -> T,
{
    type Cell = T;

    fn cell(&self, horizontal: i64, vertical: i64) -> T {
        self(horizontal, vertical)
    }
}

/// A slot with its content and placement for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCell<T> {
    pub slot: NeighborSlot,
    /// Top-left corner in viewport coordinates.
    pub origin: Vec2,
    /// Visibility for depth-0 and depth-1 slots when page visibility is
    /// enabled and the role applies to the active axis.
    pub visibility: Option<f64>,
    pub content: T,
}

impl<T> PlacedCell<T> {
    /// Whether any part of the cell overlaps a viewport of `page_size`.
    #[must_use]
    pub fn intersects_viewport(&self, page_size: Size) -> bool {
        let Vec2 { x, y } = self.origin;
        x < page_size.width
            && x + page_size.width > 0.0
            && y < page_size.height
            && y + page_size.height > 0.0
    }
}

/// Everything the rendering layer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PagerFrame<T> {
    pub cells: SmallVec<[PlacedCell<T>; MAX_SLOTS]>,
    /// Drag or settle offset applied to every cell.
    pub offset: Vec2,
    pub page_size: Size,
    /// Whether cells outside the viewport should be clipped.
    pub clip: bool,
    pub snapshot: PagerSnapshot,
}

impl<T> PagerFrame<T> {
    /// Assemble a frame for `snapshot` with content from `provider`.
    #[must_use]
    pub fn build<P>(
        provider: &P,
        slots: &[NeighborSlot],
        offset: Vec2,
        page_size: Size,
        clip: bool,
        snapshot: PagerSnapshot,
    ) -> Self
    where
        P: CellProvider<Cell = T> + ?Sized,
    {
        let cells = slots
            .iter()
            .map(|&slot| PlacedCell {
                slot,
                origin: slot.origin(page_size, offset),
                visibility: if slot.depth() <= 1 {
                    snapshot.visibility(slot.role)
                } else {
                    None
                },
                content: provider.cell(slot.page.horizontal, slot.page.vertical),
            })
            .collect();
        Self {
            cells,
            offset,
            page_size,
            clip,
            snapshot,
        }
    }

    /// The cell in the current slot.
    #[must_use]
    pub fn current(&self) -> Option<&PlacedCell<T>> {
        self.cells
            .iter()
            .find(|c| c.slot.role == NeighborRole::Current)
    }

    /// Cells to draw: all of them, or only those overlapping the viewport
    /// when clipping is on.
    pub fn visible_cells(&self) -> impl Iterator<Item = &PlacedCell<T>> {
        let clip = self.clip;
        let page_size = self.page_size;
        self.cells
            .iter()
            .filter(move |c| !clip || c.intersects_viewport(page_size))
    }
}

/// The rendering side of the pager.
pub trait GridComposer<T> {
    /// Lay out and draw one frame.
    fn compose(&mut self, frame: &PagerFrame<T>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visibility::VisibilityInfo;

    fn roles(slots: &[NeighborSlot]) -> Vec<(NeighborRole, i8, i8)> {
        slots.iter().map(|s| (s.role, s.dx, s.dy)).collect()
    }

    #[test]
    fn unbounded_cross_has_five_cells() {
        let slots = NeighborGrid::compose(PageIndex::new(3, -1), GridExtent::UNBOUNDED, false);
        assert_eq!(
            roles(&slots),
            vec![
                (NeighborRole::Current, 0, 0),
                (NeighborRole::Leading, -1, 0),
                (NeighborRole::Trailing, 1, 0),
                (NeighborRole::Top, 0, -1),
                (NeighborRole::Bottom, 0, 1),
            ]
        );
        assert_eq!(slots[1].page, PageIndex::new(2, -1));
        assert_eq!(slots[4].page, PageIndex::new(3, 0));
        assert!(!slots.spilled());
    }

    #[test]
    fn bounce_reaches_two_pages() {
        let slots = NeighborGrid::compose(PageIndex::default(), GridExtent::UNBOUNDED, true);
        assert_eq!(slots.len(), MAX_SLOTS);
        assert!(!slots.spilled());
        assert_eq!(slots.iter().filter(|s| s.depth() == 2).count(), 4);
        let far_trailing = slots
            .iter()
            .find(|s| s.dx == 2)
            .expect("far trailing slot");
        assert_eq!(far_trailing.role, NeighborRole::Trailing);
        assert_eq!(far_trailing.page, PageIndex::new(2, 0));
    }

    #[test]
    fn finite_edges_drop_missing_neighbors() {
        let extents = GridExtent::from_totals(Some(3), Some(1));
        let slots = NeighborGrid::compose(PageIndex::new(0, 0), extents, true);
        assert_eq!(
            roles(&slots),
            vec![
                (NeighborRole::Current, 0, 0),
                (NeighborRole::Trailing, 1, 0),
                (NeighborRole::Trailing, 2, 0),
            ]
        );
    }

    #[test]
    fn closure_is_a_cell_provider() {
        let provider = |h: i64, v: i64| format!("{h}:{v}");
        assert_eq!(provider.cell(4, -2), "4:-2");
    }

    #[test]
    fn frame_places_cells_with_offset() {
        let page = Size::new(300.0, 600.0);
        let slots = NeighborGrid::compose(PageIndex::default(), GridExtent::UNBOUNDED, false);
        let snapshot = PagerSnapshot {
            visibility: Some(VisibilityInfo {
                percent: -0.25,
                axis: Some(Axis::Horizontal),
            }),
            ..PagerSnapshot::default()
        };
        let frame = PagerFrame::build(
            &|h: i64, v: i64| (h, v),
            &slots,
            Vec2::new(-75.0, 0.0),
            page,
            true,
            snapshot,
        );
        let current = frame.current().expect("current cell");
        assert_eq!(current.origin, Vec2::new(-75.0, 0.0));
        assert_eq!(current.visibility, Some(0.75));

        let trailing = &frame.cells[2];
        assert_eq!(trailing.content, (1, 0));
        assert_eq!(trailing.origin, Vec2::new(225.0, 0.0));
        assert_eq!(trailing.visibility, Some(0.25));
        assert_eq!(frame.cells[3].visibility, None);
    }

    #[test]
    fn clipping_hides_off_screen_cells() {
        let page = Size::new(300.0, 600.0);
        let slots = NeighborGrid::compose(PageIndex::default(), GridExtent::UNBOUNDED, false);
        let build = |clip| {
            PagerFrame::build(
                &|h: i64, v: i64| (h, v),
                &slots,
                Vec2::new(-75.0, 0.0),
                page,
                clip,
                PagerSnapshot::default(),
            )
        };
        let clipped: Vec<_> = build(true).visible_cells().map(|c| c.content).collect();
        assert_eq!(clipped, vec![(0, 0), (1, 0)]);
        assert_eq!(build(false).visible_cells().count(), 5);
    }
}

#![forbid(unsafe_code)]

//! Whether a pending commit would step off the end of a finite axis.
//!
//! Wrap-around is only reachable through [`PageIndex::advance`]; a drag
//! release never wraps, so the first page refuses backward commits and the
//! last page refuses forward ones. An axis with no pages refuses everything.

use gridpager_core::geometry::Axis;

use crate::extent::{AxisExtent, GridExtent};
use crate::index::{Direction, PageIndex};

/// Boundary test on a single axis.
#[must_use]
pub fn axis_at_boundary(index: i64, extent: AxisExtent, direction: Direction) -> bool {
    match extent {
        AxisExtent::Unbounded => false,
        AxisExtent::Finite(0) => true,
        AxisExtent::Finite(_) => match direction {
            Direction::Backward => extent.is_first(index),
            Direction::Forward => extent.is_last(index),
        },
    }
}

/// Boundary test for the locked axis of a drag session.
///
/// Returns `false` when no axis is locked.
#[must_use]
pub fn is_at_boundary(
    locked_axis: Option<Axis>,
    index: PageIndex,
    extents: GridExtent,
    direction: Direction,
) -> bool {
    locked_axis.is_some_and(|axis| axis_at_boundary(index.get(axis), extents.get(axis), direction))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_never_at_boundary() {
        for idx in [-5, 0, 5] {
            for dir in [Direction::Backward, Direction::Forward] {
                assert!(!axis_at_boundary(idx, AxisExtent::Unbounded, dir));
            }
        }
    }

    #[test]
    fn first_page_refuses_backward_only() {
        let e = AxisExtent::Finite(5);
        assert!(axis_at_boundary(0, e, Direction::Backward));
        assert!(!axis_at_boundary(0, e, Direction::Forward));
    }

    #[test]
    fn last_page_refuses_forward_only() {
        let e = AxisExtent::Finite(5);
        assert!(axis_at_boundary(4, e, Direction::Forward));
        assert!(!axis_at_boundary(4, e, Direction::Backward));
        assert!(!axis_at_boundary(2, e, Direction::Forward));
    }

    #[test]
    fn single_page_refuses_both() {
        let e = AxisExtent::Finite(1);
        assert!(axis_at_boundary(0, e, Direction::Forward));
        assert!(axis_at_boundary(0, e, Direction::Backward));
    }

    #[test]
    fn empty_axis_is_always_at_boundary() {
        let e = AxisExtent::Finite(0);
        assert!(axis_at_boundary(0, e, Direction::Forward));
        assert!(axis_at_boundary(0, e, Direction::Backward));
    }

    #[test]
    fn no_locked_axis_is_never_at_boundary() {
        let extents = GridExtent::from_totals(Some(1), Some(1));
        assert!(!is_at_boundary(
            None,
            PageIndex::default(),
            extents,
            Direction::Forward
        ));
    }

    #[test]
    fn consults_only_the_locked_axis() {
        // Vertical is pinned at its last page, horizontal has room.
        let extents = GridExtent::from_totals(Some(5), Some(3));
        let index = PageIndex::new(1, 2);
        assert!(!is_at_boundary(
            Some(Axis::Horizontal),
            index,
            extents,
            Direction::Forward
        ));
        assert!(is_at_boundary(
            Some(Axis::Vertical),
            index,
            extents,
            Direction::Forward
        ));
    }
}

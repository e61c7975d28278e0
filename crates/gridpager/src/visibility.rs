#![forbid(unsafe_code)]

//! Per-cell visibility derived from the drag offset.
//!
//! The offset along the active axis is expressed as a fraction of the page
//! size (`percent`, nominally in `[-1, 1]`). A positive percent means the
//! content moved right or down, uncovering the leading or top neighbor.
//!
//! | Role | Visibility |
//! |------|------------|
//! | `Current` | `1 - |percent|` |
//! | `Leading` / `Top` | `percent` when positive, else `0` |
//! | `Trailing` / `Bottom` | `-percent` when negative, else `0` |
//!
//! A side role only applies to its own axis. `Leading` while the vertical
//! axis is active (or no axis is active) yields `None`, meaning "not
//! applicable this frame", which consumers must not read as zero.
//!
//! Everything here is a pure function of its inputs.

use gridpager_core::geometry::{Axis, Vec2};

use crate::index::Direction;

/// Which slot of the neighbor window a cell occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NeighborRole {
    /// The committed page.
    Current,
    /// The previous page on the horizontal axis (to the left).
    Leading,
    /// The next page on the horizontal axis (to the right).
    Trailing,
    /// The previous page on the vertical axis (above).
    Top,
    /// The next page on the vertical axis (below).
    Bottom,
}

impl NeighborRole {
    /// Every role, current first.
    pub const ALL: [Self; 5] = [
        Self::Current,
        Self::Leading,
        Self::Trailing,
        Self::Top,
        Self::Bottom,
    ];

    /// Role for a neighbor on `axis` in `direction`.
    #[must_use]
    pub const fn neighbor(axis: Axis, direction: Direction) -> Self {
        match (axis, direction) {
            (Axis::Horizontal, Direction::Backward) => Self::Leading,
            (Axis::Horizontal, Direction::Forward) => Self::Trailing,
            (Axis::Vertical, Direction::Backward) => Self::Top,
            (Axis::Vertical, Direction::Forward) => Self::Bottom,
        }
    }

    /// Axis the role lives on; `None` for `Current`.
    #[must_use]
    pub const fn axis(self) -> Option<Axis> {
        match self {
            Self::Current => None,
            Self::Leading | Self::Trailing => Some(Axis::Horizontal),
            Self::Top | Self::Bottom => Some(Axis::Vertical),
        }
    }

    /// Side of the current page the role sits on; `None` for `Current`.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::Current => None,
            Self::Leading | Self::Top => Some(Direction::Backward),
            Self::Trailing | Self::Bottom => Some(Direction::Forward),
        }
    }
}

/// The offset fraction and the axis it was measured on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibilityInfo {
    /// Offset along `axis` divided by the page size; `0` without an axis.
    pub percent: f64,
    /// The active axis, if any.
    pub axis: Option<Axis>,
}

impl VisibilityInfo {
    /// Measure `offset` against `page_size` along `axis`.
    #[must_use]
    pub fn measure(offset: Vec2, page_size: f64, axis: Option<Axis>) -> Self {
        let percent = match axis {
            Some(axis) if page_size > 0.0 => {
                let p = offset.component(axis) / page_size;
                if p.is_finite() { p } else { 0.0 }
            }
            _ => 0.0,
        };
        Self { percent, axis }
    }

    /// Visibility of the cell in `role`.
    #[must_use]
    pub fn visibility(self, role: NeighborRole) -> Option<f64> {
        let percent = self.percent;
        match role {
            NeighborRole::Current => Some(1.0 - percent.abs()),
            side => {
                if side.axis() != self.axis {
                    return None;
                }
                Some(match side.direction() {
                    Some(Direction::Backward) if percent > 0.0 => percent,
                    Some(Direction::Forward) if percent < 0.0 => -percent,
                    _ => 0.0,
                })
            }
        }
    }
}

/// Visibility of the cell in `role` for the given offset.
///
/// `page_size` is the extent of one page along `active_axis`. A page with
/// no size reports a percent of zero.
#[must_use]
pub fn project(
    role: NeighborRole,
    offset: Vec2,
    page_size: f64,
    active_axis: Option<Axis>,
) -> Option<f64> {
    VisibilityInfo::measure(offset, page_size, active_axis).visibility(role)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: f64 = 300.0;

    fn close(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-12)
    }

    #[test]
    fn current_and_leading_at_positive_offset() {
        let offset = Vec2::new(0.4 * PAGE, 0.0);
        let axis = Some(Axis::Horizontal);
        assert!(close(project(NeighborRole::Current, offset, PAGE, axis), 0.6));
        assert!(close(project(NeighborRole::Leading, offset, PAGE, axis), 0.4));
        assert!(close(project(NeighborRole::Trailing, offset, PAGE, axis), 0.0));
    }

    #[test]
    fn leading_is_zero_at_negative_offset() {
        let offset = Vec2::new(-0.4 * PAGE, 0.0);
        let axis = Some(Axis::Horizontal);
        assert!(close(project(NeighborRole::Leading, offset, PAGE, axis), 0.0));
        assert!(close(project(NeighborRole::Trailing, offset, PAGE, axis), 0.4));
    }

    #[test]
    fn vertical_roles_follow_vertical_axis() {
        let offset = Vec2::new(0.0, -0.25 * PAGE);
        let axis = Some(Axis::Vertical);
        assert!(close(project(NeighborRole::Bottom, offset, PAGE, axis), 0.25));
        assert!(close(project(NeighborRole::Top, offset, PAGE, axis), 0.0));
        assert!(close(project(NeighborRole::Current, offset, PAGE, axis), 0.75));
    }

    #[test]
    fn off_axis_roles_are_not_applicable() {
        let offset = Vec2::new(120.0, 0.0);
        let h = Some(Axis::Horizontal);
        assert_eq!(project(NeighborRole::Top, offset, PAGE, h), None);
        assert_eq!(project(NeighborRole::Bottom, offset, PAGE, h), None);
        for role in [
            NeighborRole::Leading,
            NeighborRole::Trailing,
            NeighborRole::Top,
            NeighborRole::Bottom,
        ] {
            assert_eq!(project(role, offset, PAGE, None), None);
        }
    }

    #[test]
    fn no_axis_means_fully_visible_current() {
        assert!(close(
            project(NeighborRole::Current, Vec2::new(50.0, 0.0), PAGE, None),
            1.0
        ));
    }

    #[test]
    fn zero_page_size_reports_zero_percent() {
        let info = VisibilityInfo::measure(Vec2::new(50.0, 0.0), 0.0, Some(Axis::Horizontal));
        assert_eq!(info.percent, 0.0);
        assert!(close(info.visibility(NeighborRole::Current), 1.0));
    }

    #[test]
    fn projection_is_idempotent() {
        let offset = Vec2::new(-87.5, 0.0);
        let axis = Some(Axis::Horizontal);
        for role in NeighborRole::ALL {
            assert_eq!(
                project(role, offset, PAGE, axis),
                project(role, offset, PAGE, axis)
            );
        }
    }

    #[test]
    fn role_axis_and_direction_round_trip() {
        for axis in [Axis::Horizontal, Axis::Vertical] {
            for dir in [Direction::Backward, Direction::Forward] {
                let role = NeighborRole::neighbor(axis, dir);
                assert_eq!(role.axis(), Some(axis));
                assert_eq!(role.direction(), Some(dir));
            }
        }
        assert_eq!(NeighborRole::Current.axis(), None);
    }
}

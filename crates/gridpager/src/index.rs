#![forbid(unsafe_code)]

//! The committed page pair and its arithmetic.
//!
//! # Invariants
//!
//! 1. On a `Finite(total)` axis with `total > 0`, the index stays in
//!    `[0, total)` across any number of `advance` calls, provided it started
//!    there.
//! 2. On an `Unbounded` axis, `advance` is plain ±1 and may go negative.
//! 3. `advance` on a `Finite(0)` axis is a no-op.
//!
//! # Preconditions
//!
//! `reset` expects `0 <= value < total` on finite axes (or `0` on an axis
//! with no pages). This is asserted in debug builds only; release builds
//! store whatever they are given.

use gridpager_core::geometry::Axis;

use crate::extent::AxisExtent;

/// Which way a committed transition moves along an axis.
///
/// `Forward` reveals the next page (index + 1). A drag toward negative
/// coordinates (left or up) pulls the next page in, so the direction is the
/// opposite sign of the drag translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward the previous page (`-1`).
    Backward,
    /// Toward the next page (`+1`).
    Forward,
}

impl Direction {
    /// `-sign(translation)`, or `None` for zero and non-finite input.
    #[must_use]
    pub fn from_translation(translation: f64) -> Option<Self> {
        if !translation.is_finite() || translation == 0.0 {
            None
        } else if translation < 0.0 {
            Some(Self::Forward)
        } else {
            Some(Self::Backward)
        }
    }

    /// `+1` for forward, `-1` for backward.
    #[inline]
    #[must_use]
    pub const fn step(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// Current page on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageIndex {
    pub horizontal: i64,
    pub vertical: i64,
}

impl PageIndex {
    /// Create an index pair.
    #[inline]
    #[must_use]
    pub const fn new(horizontal: i64, vertical: i64) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Index on `axis`.
    #[inline]
    #[must_use]
    pub const fn get(self, axis: Axis) -> i64 {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    fn slot_mut(&mut self, axis: Axis) -> &mut i64 {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    /// Overwrite the index on `axis`. Used to place the initial page.
    pub fn reset(&mut self, axis: Axis, value: i64, extent: AxisExtent) {
        debug_assert!(
            extent.contains(value) || (extent.is_empty() && value == 0),
            "initial page {value} outside {extent:?} on {axis:?}"
        );
        *self.slot_mut(axis) = value;
    }

    /// Move one page in `direction`, wrapping on finite axes.
    pub fn advance(&mut self, axis: Axis, direction: Direction, extent: AxisExtent) {
        let slot = self.slot_mut(axis);
        *slot = stepped(*slot, direction.step(), extent).unwrap_or(*slot);
    }

    /// Index `delta` pages away on `axis` without wrapping, or `None` when
    /// that page does not exist on a finite axis.
    #[must_use]
    pub fn neighbor(self, axis: Axis, delta: i64, extent: AxisExtent) -> Option<i64> {
        let next = self.get(axis).checked_add(delta)?;
        extent.contains(next).then_some(next)
    }
}

/// Wrapped (finite) or plain (unbounded) step; `None` for an empty axis.
fn stepped(index: i64, step: i64, extent: AxisExtent) -> Option<i64> {
    match extent {
        AxisExtent::Finite(0) => None,
        AxisExtent::Finite(total) => Some((index + step).rem_euclid(i64::from(total))),
        AxisExtent::Unbounded => Some(index.saturating_add(step)),
    }
}

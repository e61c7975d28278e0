#![forbid(unsafe_code)]

//! Per-axis page ranges.

use gridpager_core::geometry::Axis;

/// How many pages an axis holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisExtent {
    /// Pages `0..total`; commits wrap around at either end.
    Finite(u32),
    /// Every integer is a page, negative ones included.
    Unbounded,
}

impl AxisExtent {
    /// `Some(total)` becomes `Finite`, `None` becomes `Unbounded`.
    #[inline]
    #[must_use]
    pub const fn from_total(total: Option<u32>) -> Self {
        match total {
            Some(total) => Self::Finite(total),
            None => Self::Unbounded,
        }
    }

    /// Page count, or `None` when unbounded.
    #[inline]
    #[must_use]
    pub const fn total(self) -> Option<u32> {
        match self {
            Self::Finite(total) => Some(total),
            Self::Unbounded => None,
        }
    }

    /// Whether `index` names a page on this axis.
    #[inline]
    #[must_use]
    pub fn contains(self, index: i64) -> bool {
        match self {
            Self::Finite(total) => (0..i64::from(total)).contains(&index),
            Self::Unbounded => true,
        }
    }

    /// Whether the axis has no pages at all (`Finite(0)`).
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Finite(0))
    }

    /// Whether `index` is the first page of a finite axis.
    #[inline]
    #[must_use]
    pub const fn is_first(self, index: i64) -> bool {
        matches!(self, Self::Finite(_)) && index == 0
    }

    /// Whether `index` is the last page of a finite axis.
    #[inline]
    #[must_use]
    pub const fn is_last(self, index: i64) -> bool {
        match self {
            Self::Finite(total) => index == total as i64 - 1,
            Self::Unbounded => false,
        }
    }
}

/// Extents for both axes of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridExtent {
    pub horizontal: AxisExtent,
    pub vertical: AxisExtent,
}

impl GridExtent {
    /// Both axes unbounded.
    pub const UNBOUNDED: Self = Self::new(AxisExtent::Unbounded, AxisExtent::Unbounded);

    /// Create from explicit extents.
    #[must_use]
    pub const fn new(horizontal: AxisExtent, vertical: AxisExtent) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Create from optional page totals.
    #[must_use]
    pub const fn from_totals(horizontal: Option<u32>, vertical: Option<u32>) -> Self {
        Self::new(
            AxisExtent::from_total(horizontal),
            AxisExtent::from_total(vertical),
        )
    }

    /// Extent of `axis`.
    #[inline]
    #[must_use]
    pub const fn get(self, axis: Axis) -> AxisExtent {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }
}

impl Default for GridExtent {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_total_maps_none_to_unbounded() {
        assert_eq!(AxisExtent::from_total(None), AxisExtent::Unbounded);
        assert_eq!(AxisExtent::from_total(Some(4)), AxisExtent::Finite(4));
        assert_eq!(AxisExtent::Finite(4).total(), Some(4));
        assert_eq!(AxisExtent::Unbounded.total(), None);
    }

    #[test]
    fn finite_contains_half_open_range() {
        let e = AxisExtent::Finite(3);
        assert!(!e.contains(-1));
        assert!(e.contains(0));
        assert!(e.contains(2));
        assert!(!e.contains(3));
        assert!(AxisExtent::Unbounded.contains(i64::MIN));
    }

    #[test]
    fn first_and_last() {
        let e = AxisExtent::Finite(5);
        assert!(e.is_first(0));
        assert!(e.is_last(4));
        assert!(!e.is_last(3));
        assert!(!AxisExtent::Unbounded.is_first(0));
        assert!(!AxisExtent::Unbounded.is_last(0));
        // A single page is both first and last.
        assert!(AxisExtent::Finite(1).is_first(0) && AxisExtent::Finite(1).is_last(0));
    }

    #[test]
    fn empty_extent() {
        assert!(AxisExtent::Finite(0).is_empty());
        assert!(!AxisExtent::Finite(1).is_empty());
        assert!(!AxisExtent::Unbounded.is_empty());
    }

    #[test]
    fn grid_extent_lookup() {
        let g = GridExtent::from_totals(Some(3), None);
        assert_eq!(g.get(Axis::Horizontal), AxisExtent::Finite(3));
        assert_eq!(g.get(Axis::Vertical), AxisExtent::Unbounded);
        assert_eq!(GridExtent::default(), GridExtent::UNBOUNDED);
    }
}

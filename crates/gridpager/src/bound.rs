#![forbid(unsafe_code)]

//! Rubber-band damping for drags past the first or last page.
//!
//! Dragging away from a boundary, or along an unbounded axis, moves content
//! one-to-one. Dragging toward a boundary the current page already sits on
//! is free up to `page / 1.8`, then resisted with a quadratic ease-out that
//! reaches full resistance at `page / 1.5`:
//!
//! ```text
//! progress   = (|raw| - normal) / (max - normal)
//! dampening  = 1 - progress²
//! bounded    = sign(raw) · (normal + (|raw| - normal) · dampening)
//! ```
//!
//! No clamp is applied. Exactly at `max` the output is `normal`; past it,
//! `progress > 1` and the dampened term turns negative, so very long drags
//! swing the content back below `normal`.

use crate::extent::AxisExtent;

/// `page / NORMAL_DIVISOR` is where damping begins.
pub const NORMAL_DIVISOR: f64 = 1.8;

/// `page / MAX_DIVISOR` is where damping reaches full strength.
pub const MAX_DIVISOR: f64 = 1.5;

/// Damping thresholds for a page of the given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampingZone {
    /// Below this magnitude offsets pass through unchanged.
    pub normal: f64,
    /// At this magnitude the dampening factor reaches zero.
    pub max: f64,
}

impl DampingZone {
    /// Zone for `page_size`.
    #[must_use]
    pub fn for_page(page_size: f64) -> Self {
        Self {
            normal: page_size / NORMAL_DIVISOR,
            max: page_size / MAX_DIVISOR,
        }
    }

    /// Apply the damping curve to `raw` (sign preserved).
    #[must_use]
    pub fn apply(self, raw: f64) -> f64 {
        let magnitude = raw.abs();
        if magnitude <= self.normal {
            return raw;
        }
        let over = magnitude - self.normal;
        let progress = over / (self.max - self.normal);
        let dampening = 1.0 - progress * progress;
        raw.signum() * (self.normal + over * dampening)
    }
}

/// Whether `raw` pulls toward a boundary that `index` already sits on.
#[must_use]
pub fn pulls_past_boundary(raw: f64, index: i64, extent: AxisExtent) -> bool {
    (extent.is_first(index) && raw > 0.0) || (extent.is_last(index) && raw < 0.0)
}

/// Compute the visual offset for a raw drag component on one axis.
///
/// Degenerate inputs collapse to zero: a non-finite `raw`, an axis with no
/// pages, or a boundary pull on a page with no size.
#[must_use]
pub fn resolve_offset(raw: f64, page_size: f64, index: i64, extent: AxisExtent) -> f64 {
    if !raw.is_finite() || extent.is_empty() {
        return 0.0;
    }
    if !pulls_past_boundary(raw, index, extent) {
        return raw;
    }
    if !(page_size > 0.0) {
        return 0.0;
    }
    DampingZone::for_page(page_size).apply(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: f64 = 300.0;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn unbounded_passes_through() {
        for raw in [-1000.0, -10.0, 0.0, 10.0, 1000.0] {
            assert_eq!(resolve_offset(raw, PAGE, 0, AxisExtent::Unbounded), raw);
        }
    }

    #[test]
    fn moving_away_from_boundary_passes_through() {
        let e = AxisExtent::Finite(5);
        // First page, dragging left (toward page 1).
        assert_eq!(resolve_offset(-250.0, PAGE, 0, e), -250.0);
        // Last page, dragging right (toward page 3).
        assert_eq!(resolve_offset(250.0, PAGE, 4, e), 250.0);
        // Middle page, either way.
        assert_eq!(resolve_offset(250.0, PAGE, 2, e), 250.0);
        assert_eq!(resolve_offset(-250.0, PAGE, 2, e), -250.0);
    }

    #[test]
    fn identity_zone_at_boundary() {
        let e = AxisExtent::Finite(5);
        let normal = PAGE / NORMAL_DIVISOR;
        assert_eq!(resolve_offset(normal, PAGE, 0, e), normal);
        assert_eq!(resolve_offset(-normal, PAGE, 4, e), -normal);
        assert_eq!(resolve_offset(50.0, PAGE, 0, e), 50.0);
    }

    #[test]
    fn saturates_at_max_threshold() {
        let e = AxisExtent::Finite(5);
        let zone = DampingZone::for_page(PAGE);
        assert!(close(resolve_offset(zone.max, PAGE, 0, e), zone.normal));
        assert!(close(resolve_offset(-zone.max, PAGE, 4, e), -zone.normal));
    }

    #[test]
    fn damped_output_is_between_normal_and_raw() {
        let e = AxisExtent::Finite(5);
        let zone = DampingZone::for_page(PAGE);
        let raw = (zone.normal + zone.max) / 2.0;
        let out = resolve_offset(raw, PAGE, 0, e);
        assert!(out > zone.normal && out < raw, "out = {out}");
        // progress = 0.5, dampening = 0.75
        let expected = zone.normal + (raw - zone.normal) * 0.75;
        assert!(close(out, expected));
    }

    #[test]
    fn overshoot_beyond_max_pulls_back() {
        let e = AxisExtent::Finite(5);
        let zone = DampingZone::for_page(PAGE);
        let out = resolve_offset(zone.max * 2.0, PAGE, 0, e);
        assert!(out < zone.normal, "out = {out}");
    }

    #[test]
    fn single_page_damps_both_directions() {
        let e = AxisExtent::Finite(1);
        let zone = DampingZone::for_page(PAGE);
        assert!(close(resolve_offset(zone.max, PAGE, 0, e), zone.normal));
        assert!(close(resolve_offset(-zone.max, PAGE, 0, e), -zone.normal));
    }

    #[test]
    fn degenerate_inputs_collapse_to_zero() {
        assert_eq!(resolve_offset(f64::NAN, PAGE, 0, AxisExtent::Unbounded), 0.0);
        assert_eq!(resolve_offset(f64::INFINITY, PAGE, 0, AxisExtent::Finite(3)), 0.0);
        assert_eq!(resolve_offset(120.0, PAGE, 0, AxisExtent::Finite(0)), 0.0);
        assert_eq!(resolve_offset(120.0, 0.0, 0, AxisExtent::Finite(3)), 0.0);
    }
}

#![forbid(unsafe_code)]

//! Settle animations.
//!
//! The pager never simulates free physics: after a release it plays one of a
//! few fixed curves from the current offset to a target offset. Every curve
//! is an [`Animation`] producing a progress value that starts at 0.0 and
//! ends at 1.0; the caller maps progress onto offsets.
//!
//! - [`Tween`]: fixed duration with an [`Easing`] curve.
//! - [`Spring`]: damped harmonic oscillator, may overshoot 1.0 on the way.
//! - [`SettleCurve`]: a configurable description that builds either.
//!
//! # Invariants
//!
//! 1. `value()` is 0.0 before the first tick and exactly 1.0 once
//!    `is_complete()` is true.
//! 2. `tick()` on a complete animation is a no-op.
//! 3. `reset()` returns the animation to its initial state.

use std::time::Duration;

pub mod presets;
pub mod spring;

pub use presets::SettleCurve;
pub use spring::Spring;

/// A time-driven progress value.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation reached its end state.
    fn is_complete(&self) -> bool;

    /// Current progress. 0.0 at start, 1.0 at rest. Springs may overshoot.
    fn value(&self) -> f64;

    /// Return to the initial state.
    fn reset(&mut self);
}

impl std::fmt::Debug for dyn Animation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animation")
            .field("value", &self.value())
            .field("complete", &self.is_complete())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

/// Easing curve for timed animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Quadratic ease-in (accelerating).
    EaseIn,
    /// Quadratic ease-out (decelerating).
    #[default]
    EaseOut,
    /// Quadratic S-curve.
    EaseInOut,
    /// Cubic ease-out, a harder stop than `EaseOut`.
    EaseOutCubic,
}

impl Easing {
    /// Apply the easing function to a progress value (clamped to 0.0..=1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv / 2.0
                }
            }
            Self::EaseOutCubic => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// Fixed-duration animation shaped by an [`Easing`] curve.
///
/// A zero duration completes on construction.
#[derive(Debug, Clone)]
pub struct Tween {
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl Tween {
    /// Create a tween with the default ease-out curve.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            easing: Easing::default(),
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Total duration.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear (un-eased) progress in 0.0..=1.0.
    #[must_use]
    pub fn raw_progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f64 {
        if self.is_complete() {
            1.0
        } else {
            self.easing.apply(self.raw_progress())
        }
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    #[test]
    fn easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::EaseOutCubic,
        ] {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12, "{easing:?} at 1");
        }
    }

    #[test]
    fn ease_out_decelerates() {
        assert!(Easing::EaseOut.apply(0.5) > Easing::Linear.apply(0.5));
        assert!(Easing::EaseIn.apply(0.5) < Easing::Linear.apply(0.5));
    }

    #[test]
    fn easing_clamps_input() {
        assert_eq!(Easing::EaseOut.apply(-1.0), 0.0);
        assert_eq!(Easing::EaseOut.apply(2.0), 1.0);
        assert_eq!(Easing::EaseOut.apply(f64::NAN), 0.0);
    }

    #[test]
    fn tween_completes_after_duration() {
        let mut tween = Tween::new(Duration::from_millis(100));
        assert_eq!(tween.value(), 0.0);
        for _ in 0..6 {
            tween.tick(MS_16);
        }
        assert!(!tween.is_complete());
        tween.tick(MS_16);
        assert!(tween.is_complete());
        assert_eq!(tween.value(), 1.0);
    }

    #[test]
    fn tween_zero_duration_is_complete() {
        let tween = Tween::new(Duration::ZERO);
        assert!(tween.is_complete());
        assert_eq!(tween.value(), 1.0);
    }

    #[test]
    fn tween_reset_restarts() {
        let mut tween = Tween::new(Duration::from_millis(50)).easing(Easing::Linear);
        tween.tick(Duration::from_millis(25));
        assert!((tween.value() - 0.5).abs() < 1e-9);
        tween.reset();
        assert_eq!(tween.value(), 0.0);
        assert!(!tween.is_complete());
    }
}

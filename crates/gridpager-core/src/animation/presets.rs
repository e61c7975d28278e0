#![forbid(unsafe_code)]

//! Fixed settle curves.
//!
//! | Preset | Curve | Used for |
//! |--------|-------|----------|
//! | [`SettleCurve::default`] | ease-out, 220ms | committing to the neighbor page |
//! | [`SettleCurve::smooth`] | critically damped spring | alternative commit curve |
//! | [`SettleCurve::bouncy`] | underdamped spring | cancelling back to rest |
//!
//! [`SettleCurve`] is the plain-data description stored in configuration;
//! [`SettleCurve::build`] turns it into a running [`Animation`].

use std::time::Duration;

use super::{Animation, Easing, Spring, Tween};

/// Default duration of the commit transition.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(220);

/// Response (seconds) of the bouncy cancel spring.
pub const BOUNCY_RESPONSE: f64 = 0.5;

/// Damping fraction of the bouncy cancel spring.
pub const BOUNCY_DAMPING_FRACTION: f64 = 0.7;

/// Description of a settle curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SettleCurve {
    /// Fixed-duration eased curve.
    Timed {
        /// Total duration.
        duration: Duration,
        /// Easing shape.
        easing: Easing,
    },
    /// Spring described by response and damping fraction.
    Spring {
        /// Seconds per undamped oscillation.
        response: f64,
        /// 1.0 is critically damped; lower values bounce.
        damping_fraction: f64,
    },
    /// Jump to the target on the first tick.
    Immediate,
}

impl Default for SettleCurve {
    fn default() -> Self {
        Self::ease_out(TRANSITION_DURATION)
    }
}

impl SettleCurve {
    /// Ease-out over `duration`.
    #[must_use]
    pub const fn ease_out(duration: Duration) -> Self {
        Self::Timed {
            duration,
            easing: Easing::EaseOut,
        }
    }

    /// Critically damped spring with the given response.
    #[must_use]
    pub fn smooth(duration: Duration) -> Self {
        Self::Spring {
            response: duration.as_secs_f64(),
            damping_fraction: 1.0,
        }
    }

    /// The underdamped cancel curve.
    #[must_use]
    pub const fn bouncy() -> Self {
        Self::Spring {
            response: BOUNCY_RESPONSE,
            damping_fraction: BOUNCY_DAMPING_FRACTION,
        }
    }

    /// Start a fresh animation for this curve.
    #[must_use]
    pub fn build(&self) -> Box<dyn Animation> {
        match *self {
            Self::Timed { duration, easing } => Box::new(Tween::new(duration).easing(easing)),
            Self::Spring {
                response,
                damping_fraction,
            } => Box::new(Spring::from_response(response, damping_fraction)),
            Self::Immediate => Box::new(Tween::new(Duration::ZERO)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    fn run_to_completion(anim: &mut dyn Animation, max_frames: usize) -> (usize, f64) {
        let mut peak = anim.value();
        for frame in 0..max_frames {
            if anim.is_complete() {
                return (frame, peak);
            }
            anim.tick(MS_16);
            peak = peak.max(anim.value());
        }
        (max_frames, peak)
    }

    #[test]
    fn default_curve_is_ease_out_transition() {
        assert_eq!(
            SettleCurve::default(),
            SettleCurve::Timed {
                duration: TRANSITION_DURATION,
                easing: Easing::EaseOut
            }
        );
    }

    #[test]
    fn transition_finishes_in_fourteen_frames() {
        let mut anim = SettleCurve::default().build();
        let (frames, peak) = run_to_completion(anim.as_mut(), 100);
        assert_eq!(frames, 14);
        assert_eq!(peak, 1.0);
    }

    #[test]
    fn bouncy_overshoots_but_completes() {
        let mut anim = SettleCurve::bouncy().build();
        let (frames, peak) = run_to_completion(anim.as_mut(), 1000);
        assert!(frames < 1000, "bouncy spring never settled");
        assert!(peak > 1.0);
        assert_eq!(anim.value(), 1.0);
    }

    #[test]
    fn smooth_does_not_overshoot_noticeably() {
        let mut anim = SettleCurve::smooth(Duration::from_millis(300)).build();
        let (_, peak) = run_to_completion(anim.as_mut(), 1000);
        assert!(peak < 1.01);
    }

    #[test]
    fn immediate_completes_on_build() {
        let anim = SettleCurve::Immediate.build();
        assert!(anim.is_complete());
        assert_eq!(anim.value(), 1.0);
    }

    #[test]
    fn build_matches_spring_parameters() {
        let mut built = SettleCurve::bouncy().build();
        let mut direct = Spring::from_response(BOUNCY_RESPONSE, BOUNCY_DAMPING_FRACTION);
        for _ in 0..10 {
            built.tick(MS_16);
            direct.tick(MS_16);
        }
        assert_eq!(built.value(), direct.value());
    }
}

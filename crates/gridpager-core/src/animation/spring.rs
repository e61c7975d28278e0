#![forbid(unsafe_code)]

//! Damped harmonic oscillator (spring) animation.
//!
//! Used for settle curves that should feel elastic, most notably the
//! cancel-path bounce back to the resting offset. Based on the classical
//! damped spring equation:
//!
//!   F = -stiffness × (position - target) - damping × velocity
//!
//! # Parameters
//!
//! - **stiffness** (k): Restoring force strength. Higher = faster response.
//! - **damping** (c): Velocity drag. Higher = less oscillation.
//!   - Underdamped (c < 2√k): oscillates past target before settling
//!   - Critically damped (c ≈ 2√k): fastest convergence without overshoot
//! - A spring can also be described by **response** (seconds per
//!   undamped oscillation) and **damping fraction** (c / 2√k), which map to
//!   `k = (2π / response)²` and `c = 4π × fraction / response`.
//!
//! # Integration
//!
//! Semi-implicit Euler, subdivided into steps of at most 4ms.
//!
//! # Invariants
//!
//! 1. `position()` is unclamped; for a normalized spring, `value()` equals
//!    `position()` and may exceed 1.0 while bouncing.
//! 2. A spring at rest will not resume unless `reset()` is called.
//! 3. Stiffness is at least 0.1 and damping at least 0.0.
//!
//! # Failure Modes
//!
//! - Zero damping: oscillates forever; `is_complete()` may never be true.
//!   Settle curves always use positive damping.

use std::f64::consts::PI;
use std::time::Duration;

use super::Animation;

/// Maximum dt per integration step (4ms).
const MAX_STEP_SECS: f64 = 0.004;

/// Position delta below which, with the velocity threshold, the spring is
/// at rest.
const REST_THRESHOLD: f64 = 0.001;

/// Velocity (units/sec) below which, with the position threshold, the spring
/// is considered at rest.
const VELOCITY_THRESHOLD: f64 = 0.01;

/// Minimum stiffness to prevent degenerate springs.
const MIN_STIFFNESS: f64 = 0.1;

/// Shortest response accepted by [`Spring::from_response`].
const MIN_RESPONSE_SECS: f64 = 0.01;

/// A damped harmonic oscillator producing physically-based motion.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    stiffness: f64,
    damping: f64,
    at_rest: bool,
}

impl Spring {
    /// Create a spring starting at `initial` and targeting `target`.
    ///
    /// Default parameters: stiffness = 170.0, damping = 26.0.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            initial,
            stiffness: 170.0,
            damping: 26.0,
            at_rest: false,
        }
    }

    /// Create a spring animating from 0.0 to 1.0 (normalized).
    #[must_use]
    pub fn normalized() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Normalized spring described by response and damping fraction.
    #[must_use]
    pub fn from_response(response: f64, damping_fraction: f64) -> Self {
        let response = if response.is_finite() {
            response.max(MIN_RESPONSE_SECS)
        } else {
            MIN_RESPONSE_SECS
        };
        let omega = 2.0 * PI / response;
        Self::normalized()
            .with_stiffness(omega * omega)
            .with_damping(4.0 * PI * damping_fraction / response)
    }

    /// Set stiffness (builder pattern). Clamped to minimum 0.1.
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    /// Set damping (builder pattern). Clamped to minimum 0.0.
    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    /// Current position (unclamped).
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Stiffness parameter.
    #[inline]
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// Damping parameter.
    #[inline]
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Whether the spring has settled at the target.
    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Critical damping coefficient for the current stiffness.
    #[must_use]
    pub fn critical_damping(&self) -> f64 {
        2.0 * self.stiffness.sqrt()
    }

    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance the spring by `dt`, subdividing for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        let pos_delta = (self.position - self.target).abs();
        if pos_delta < REST_THRESHOLD && self.velocity.abs() < VELOCITY_THRESHOLD {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    fn value(&self) -> f64 {
        self.position
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = 0.0;
        self.at_rest = false;
    }
}

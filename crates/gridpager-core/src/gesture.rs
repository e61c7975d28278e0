#![forbid(unsafe_code)]

//! Drag recognition: transforms raw pointer samples into drag events.
//!
//! Platform gesture systems differ in what they report. Some hand over a
//! cumulative translation together with a predicted end point, others only
//! deliver raw pointer positions. [`DragAdapter`] is the single seam the pager
//! consumes; [`DragRecognizer`] is a portable implementation source that
//! derives translation and momentum projection from raw samples.
//!
//! # State Machine
//!
//! ```text
//! Idle ──Down──▶ Pressed ──Move (≥ min_distance)──▶ Dragging
//!   ▲               │                                   │
//!   └────Up/Lost────┘◀─────────Up (Ended) / Lost (ExternallyCancelled)
//! ```
//!
//! # Invariants
//!
//! 1. Every drag sequence is well-formed: one or more `Changed` followed by
//!    exactly one `Ended` or `ExternallyCancelled`.
//! 2. A press that never crosses `min_distance` produces no events at all.
//! 3. After `reset()`, the recognizer is idle and emits nothing for the
//!    remainder of the interrupted press.
//!
//! # Failure Modes
//!
//! - Timestamps that go backwards are treated as simultaneous (zero elapsed),
//!   which yields zero velocity rather than a negative one.
//! - A pause before release ages every sample out of the velocity window, so
//!   the predicted end translation collapses onto the raw translation.

use std::collections::VecDeque;
use std::time::Duration;

use web_time::Instant;

use crate::event::DragEvent;
use crate::geometry::Vec2;

// ---------------------------------------------------------------------------
// Adapter seam
// ---------------------------------------------------------------------------

/// Host-facing drag callbacks.
///
/// Per-platform shims implement this directly from their native recognizer;
/// the pager implements it to receive them.
pub trait DragAdapter {
    /// The pointer moved while dragging.
    fn on_changed(&mut self, translation: Vec2, predicted_end_translation: Vec2);

    /// The pointer was released.
    fn on_ended(&mut self, translation: Vec2, predicted_end_translation: Vec2);

    /// The host took the gesture away without a normal end.
    fn on_externally_cancelled(&mut self);

    /// Route a [`DragEvent`] to the matching callback.
    fn dispatch(&mut self, event: DragEvent) {
        match event {
            DragEvent::Changed {
                translation,
                predicted_end_translation,
            } => self.on_changed(translation, predicted_end_translation),
            DragEvent::Ended {
                translation,
                predicted_end_translation,
            } => self.on_ended(translation, predicted_end_translation),
            DragEvent::ExternallyCancelled => self.on_externally_cancelled(),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for drag recognition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DragRecognizerConfig {
    /// Minimum euclidean distance (px) before a drag starts (default: 0.0,
    /// meaning any non-zero movement starts it).
    pub min_distance: f64,
    /// How far back samples contribute to the release velocity (default: 100ms).
    pub velocity_window: Duration,
    /// Per-millisecond velocity retention used for the momentum projection
    /// (default: 0.998). Must be in `[0, 1)`.
    pub deceleration_rate: f64,
}

impl Default for DragRecognizerConfig {
    fn default() -> Self {
        Self {
            min_distance: 0.0,
            velocity_window: Duration::from_millis(100),
            deceleration_rate: 0.998,
        }
    }
}

/// Upper bound for the deceleration rate; 1.0 would project to infinity.
const MAX_DECELERATION_RATE: f64 = 0.9999;

/// Project where a release with `velocity` (px/ms) comes to rest.
///
/// Geometric decay at `rate` per millisecond travels
/// `velocity * rate / (1 - rate)` before stopping.
#[must_use]
pub fn project_translation(translation: Vec2, velocity: Vec2, rate: f64) -> Vec2 {
    let rate = if rate.is_finite() {
        rate.clamp(0.0, MAX_DECELERATION_RATE)
    } else {
        0.0
    };
    translation + velocity.scale(rate / (1.0 - rate))
}

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// A raw pointer sample in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerSample {
    /// Primary pointer pressed.
    Down(Vec2),
    /// Pointer moved with the primary button held.
    Move(Vec2),
    /// Primary pointer released.
    Up(Vec2),
    /// The platform stopped delivering this pointer (capture lost, system
    /// gesture took over, window lost focus).
    Lost,
}

/// Tracks an ongoing or potential drag.
#[derive(Debug, Clone)]
struct PressTracker {
    origin: Vec2,
    started: bool,
    history: VecDeque<(Instant, Vec2)>,
}

impl PressTracker {
    fn new(origin: Vec2, now: Instant) -> Self {
        let mut history = VecDeque::with_capacity(8);
        history.push_back((now, origin));
        Self {
            origin,
            started: false,
            history,
        }
    }

    fn record(&mut self, pos: Vec2, now: Instant, window: Duration) {
        self.history.push_back((now, pos));
        while let Some(&(t, _)) = self.history.front() {
            if now.saturating_duration_since(t) > window && self.history.len() > 1 {
                self.history.pop_front();
            } else {
                break;
            }
        }
    }

    /// Velocity in px/ms across the retained window.
    fn velocity(&self) -> Vec2 {
        let (Some(&(t0, p0)), Some(&(t1, p1))) = (self.history.front(), self.history.back())
        else {
            return Vec2::ZERO;
        };
        let elapsed_ms = t1.saturating_duration_since(t0).as_secs_f64() * 1000.0;
        if elapsed_ms <= f64::EPSILON {
            return Vec2::ZERO;
        }
        (p1 - p0).scale(1.0 / elapsed_ms)
    }
}

// ---------------------------------------------------------------------------
// DragRecognizer
// ---------------------------------------------------------------------------

/// Stateful recognizer that transforms pointer samples into [`DragEvent`]s.
///
/// Call [`process`](DragRecognizer::process) for each incoming sample, or
/// [`process_into`](DragRecognizer::process_into) to forward straight to a
/// [`DragAdapter`].
pub struct DragRecognizer {
    config: DragRecognizerConfig,
    press: Option<PressTracker>,
}

impl std::fmt::Debug for DragRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragRecognizer")
            .field("pressed", &self.press.is_some())
            .field("dragging", &self.is_dragging())
            .finish()
    }
}

impl Default for DragRecognizer {
    fn default() -> Self {
        Self::new(DragRecognizerConfig::default())
    }
}

impl DragRecognizer {
    /// Create a recognizer with the given configuration.
    #[must_use]
    pub fn new(config: DragRecognizerConfig) -> Self {
        Self {
            config,
            press: None,
        }
    }

    /// Process one pointer sample, returning the drag event it produces.
    pub fn process(&mut self, sample: PointerSample, now: Instant) -> Option<DragEvent> {
        match sample {
            PointerSample::Down(pos) => {
                self.press = Some(PressTracker::new(pos, now));
                None
            }
            PointerSample::Move(pos) => self.on_move(pos, now),
            PointerSample::Up(pos) => self.on_up(pos, now),
            PointerSample::Lost => {
                let press = self.press.take()?;
                press.started.then_some(DragEvent::ExternallyCancelled)
            }
        }
    }

    /// Process a sample and forward any resulting event to `adapter`.
    pub fn process_into<A: DragAdapter + ?Sized>(
        &mut self,
        sample: PointerSample,
        now: Instant,
        adapter: &mut A,
    ) {
        if let Some(event) = self.process(sample, now) {
            adapter.dispatch(event);
        }
    }

    /// Whether a drag is currently in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.press.as_ref().is_some_and(|p| p.started)
    }

    /// Drop any in-flight press without emitting anything.
    pub fn reset(&mut self) {
        self.press = None;
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &DragRecognizerConfig {
        &self.config
    }

    fn on_move(&mut self, pos: Vec2, now: Instant) -> Option<DragEvent> {
        let window = self.config.velocity_window;
        let min_distance = self.config.min_distance;
        let rate = self.config.deceleration_rate;

        let Some(press) = self.press.as_mut() else {
            // Move without a prior press: start tracking from here.
            self.press = Some(PressTracker::new(pos, now));
            return None;
        };

        press.record(pos, now, window);
        let translation = pos - press.origin;

        if !press.started {
            let distance = translation.x.hypot(translation.y);
            if distance > 0.0 && distance >= min_distance {
                press.started = true;
            } else {
                return None;
            }
        }

        Some(DragEvent::Changed {
            translation,
            predicted_end_translation: project_translation(translation, press.velocity(), rate),
        })
    }

    fn on_up(&mut self, pos: Vec2, now: Instant) -> Option<DragEvent> {
        let mut press = self.press.take()?;
        if !press.started {
            return None;
        }
        press.record(pos, now, self.config.velocity_window);
        let translation = pos - press.origin;
        Some(DragEvent::Ended {
            translation,
            predicted_end_translation: project_translation(
                translation,
                press.velocity(),
                self.config.deceleration_rate,
            ),
        })
    }
}

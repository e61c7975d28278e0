#![forbid(unsafe_code)]

//! Drag-to-page state machine.
//!
//! Turns a stream of drag callbacks into a bounded visual offset, decides at
//! release whether to commit to the neighbor page or bounce back, and
//! drives the settle animation.
//!
//! ```text
//! Idle ──changed──▶ Dragging ──ended / cancelled──▶ Settling ──complete──▶ Idle
//!                                                   (commit | cancel)
//! ```
//!
//! # Commit rule
//!
//! At release the *predicted* end translation on the locked axis is run
//! through [`resolve_offset`]. The pager commits when the bounded value
//! exceeds `page_size × ratio` for that axis and the move would not step
//! off a finite axis. Otherwise it cancels.
//!
//! # Invariants
//!
//! 1. The offset is zero on the axis that is not locked.
//! 2. The axis lock is decided once per session and never changes.
//! 3. The index changes only when a commit settle completes, never at
//!    release time.
//! 4. A completed settle leaves the offset at exactly zero.
//! 5. Every settle carries a fresh [`SettleTicket`]; completion with any
//!    other ticket is ignored.
//! 6. At most one settle is started per session. A second terminal event
//!    (platform cancellation racing a normal release) is ignored.
//!
//! # Failure Modes
//!
//! - Zero or non-finite release translation: cancel path.
//! - Page with no size on the locked axis: cancel path.
//! - Changed samples while settling: ignored; the new session stays inert
//!   until the settle completes.

use std::time::Duration;

use gridpager_core::animation::{Animation, SettleCurve};
use gridpager_core::event::{DragEvent, ScenePhase};
use gridpager_core::geometry::{Axis, Size, Vec2};
use gridpager_core::{debug, info, trace};

use crate::bound::resolve_offset;
use crate::boundary::is_at_boundary;
use crate::extent::GridExtent;
use crate::index::{Direction, PageIndex};
use crate::visibility::VisibilityInfo;

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Default commit ratio on the horizontal axis.
pub const DEFAULT_HORIZONTAL_RATIO: f64 = 0.33;

/// Default commit ratio on the vertical axis.
pub const DEFAULT_VERTICAL_RATIO: f64 = 0.25;

/// Fraction of the page size the bounded release translation must exceed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdRatios {
    pub horizontal: f64,
    pub vertical: f64,
}

impl ThresholdRatios {
    /// Ratio for `axis`.
    #[inline]
    #[must_use]
    pub const fn get(self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }
}

impl Default for ThresholdRatios {
    fn default() -> Self {
        Self {
            horizontal: DEFAULT_HORIZONTAL_RATIO,
            vertical: DEFAULT_VERTICAL_RATIO,
        }
    }
}

// ---------------------------------------------------------------------------
// Phase and settle types
// ---------------------------------------------------------------------------

/// Handle identifying one settle animation.
///
/// Tickets are issued from a per-machine counter, so a completion signal
/// that arrives after a newer settle began can be recognized and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SettleTicket(u64);

impl SettleTicket {
    /// Raw generation number.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

/// The transient state of an active drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragSession {
    /// Axis all movement is attributed to. `None` until the first sample
    /// with a non-zero translation arrives.
    pub locked_axis: Option<Axis>,
}

/// What a settle animation ends in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleKind {
    /// Slide to the neighbor page, then advance the index.
    Commit { axis: Axis, direction: Direction },
    /// Bounce back to the current page.
    Cancel { axis: Option<Axis> },
}

impl SettleKind {
    /// Axis the settle moves along.
    #[inline]
    #[must_use]
    pub const fn axis(self) -> Option<Axis> {
        match self {
            Self::Commit { axis, .. } => Some(axis),
            Self::Cancel { axis } => axis,
        }
    }

    /// Whether the settle ends on a new page.
    #[inline]
    #[must_use]
    pub const fn is_commit(self) -> bool {
        matches!(self, Self::Commit { .. })
    }
}

/// State machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// At rest on the current page.
    #[default]
    Idle,
    /// Following the pointer.
    Dragging(DragSession),
    /// Animating toward the outcome decided at release.
    Settling {
        ticket: SettleTicket,
        kind: SettleKind,
    },
}

impl DragPhase {
    /// Whether this is the idle phase.
    #[inline]
    #[must_use]
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Everything a host needs to run a settle with its own animation system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleRequest {
    /// Pass back to [`DragStateMachine::complete_settle`] when done.
    pub ticket: SettleTicket,
    pub kind: SettleKind,
    /// Offset at release.
    pub from: Vec2,
    /// Offset the animation ends at.
    pub to: Vec2,
    /// Curve to animate with.
    pub curve: SettleCurve,
}

/// Result of a completed settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// The index on `axis` is now `page`.
    Committed { axis: Axis, page: i64 },
    /// The pager returned to the page it started on.
    Cancelled,
}

/// A settle in flight, driven by [`DragStateMachine::tick`].
struct SettleMotion {
    request: SettleRequest,
    animation: Box<dyn Animation>,
}

impl std::fmt::Debug for SettleMotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettleMotion")
            .field("request", &self.request)
            .field("animation", &self.animation)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// DragStateMachine
// ---------------------------------------------------------------------------

/// Gesture-to-offset state machine for one pager.
#[derive(Debug)]
pub struct DragStateMachine {
    index: PageIndex,
    extents: GridExtent,
    page_size: Size,
    thresholds: ThresholdRatios,
    transition: SettleCurve,
    cancel_curve: SettleCurve,
    phase: DragPhase,
    offset: Vec2,
    motion: Option<SettleMotion>,
    next_ticket: u64,
}

impl DragStateMachine {
    /// Create an idle machine on page `(0, 0)` with default curves.
    #[must_use]
    pub fn new(extents: GridExtent) -> Self {
        Self {
            index: PageIndex::default(),
            extents,
            page_size: Size::ZERO,
            thresholds: ThresholdRatios::default(),
            transition: SettleCurve::default(),
            cancel_curve: SettleCurve::bouncy(),
            phase: DragPhase::Idle,
            offset: Vec2::ZERO,
            motion: None,
            next_ticket: 0,
        }
    }

    /// Start on `index` (builder pattern).
    ///
    /// Each component must lie inside its axis extent; checked in debug
    /// builds only.
    #[must_use]
    pub fn with_index(mut self, index: PageIndex) -> Self {
        for axis in [Axis::Horizontal, Axis::Vertical] {
            self.index.reset(axis, index.get(axis), self.extents.get(axis));
        }
        self
    }

    /// Set the page size (builder pattern).
    #[must_use]
    pub fn with_page_size(mut self, page_size: Size) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the commit ratios (builder pattern).
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: ThresholdRatios) -> Self {
        debug_assert!(
            thresholds.horizontal > 0.0 && thresholds.vertical > 0.0,
            "threshold ratios must be positive: {thresholds:?}"
        );
        self.thresholds = thresholds;
        self
    }

    /// Set the commit curve (builder pattern).
    #[must_use]
    pub fn with_transition(mut self, curve: SettleCurve) -> Self {
        self.transition = curve;
        self
    }

    /// Set the cancel curve (builder pattern).
    #[must_use]
    pub fn with_cancel_curve(mut self, curve: SettleCurve) -> Self {
        self.cancel_curve = curve;
        self
    }

    // --- accessors ---------------------------------------------------------

    /// Committed page pair.
    #[inline]
    #[must_use]
    pub fn index(&self) -> PageIndex {
        self.index
    }

    /// Page ranges.
    #[inline]
    #[must_use]
    pub fn extents(&self) -> GridExtent {
        self.extents
    }

    /// Size of one page.
    #[inline]
    #[must_use]
    pub fn page_size(&self) -> Size {
        self.page_size
    }

    /// Commit ratios.
    #[inline]
    #[must_use]
    pub fn thresholds(&self) -> ThresholdRatios {
        self.thresholds
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Visual offset of the content.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Whether a drag session is following the pointer.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    /// Whether a settle animation is in flight.
    #[inline]
    #[must_use]
    pub fn is_settling(&self) -> bool {
        matches!(self.phase, DragPhase::Settling { .. })
    }

    /// Axis locked by the current drag session.
    #[must_use]
    pub fn locked_axis(&self) -> Option<Axis> {
        match self.phase {
            DragPhase::Dragging(session) => session.locked_axis,
            _ => None,
        }
    }

    /// Axis the offset currently moves along, dragging or settling.
    #[must_use]
    pub fn active_axis(&self) -> Option<Axis> {
        match self.phase {
            DragPhase::Idle => None,
            DragPhase::Dragging(session) => session.locked_axis,
            DragPhase::Settling { kind, .. } => kind.axis(),
        }
    }

    /// The settle in flight, if any.
    #[must_use]
    pub fn pending_settle(&self) -> Option<SettleRequest> {
        self.motion.as_ref().map(|m| m.request)
    }

    /// Offset fraction along the active axis.
    #[must_use]
    pub fn visibility_info(&self) -> VisibilityInfo {
        let axis = self.active_axis();
        let page = axis.map_or(0.0, |a| self.page_size.along(a));
        VisibilityInfo::measure(self.offset, page, axis)
    }

    // --- input -------------------------------------------------------------

    /// Feed one drag callback. Returns the settle started, if any.
    pub fn handle_drag(&mut self, event: DragEvent) -> Option<SettleRequest> {
        match event {
            DragEvent::Changed { translation, .. } => {
                self.on_changed(translation);
                None
            }
            DragEvent::Ended {
                predicted_end_translation,
                ..
            } => self.on_ended(predicted_end_translation),
            DragEvent::ExternallyCancelled => self.on_externally_cancelled(),
        }
    }

    /// The pointer moved to cumulative `translation`.
    pub fn on_changed(&mut self, translation: Vec2) {
        let mut session = match self.phase {
            DragPhase::Idle => {
                trace!(target: "gridpager.drag", "drag session started");
                DragSession::default()
            }
            DragPhase::Dragging(session) => session,
            DragPhase::Settling { .. } => {
                trace!(target: "gridpager.drag", "sample ignored while settling");
                return;
            }
        };

        if session.locked_axis.is_none() {
            session.locked_axis = lock_axis(translation);
            if session.locked_axis.is_some() {
                debug!(target: "gridpager.drag", axis = ?session.locked_axis, "axis locked");
            }
        }
        self.phase = DragPhase::Dragging(session);

        self.offset = match session.locked_axis {
            Some(axis) => Vec2::along(axis, self.bounded(axis, translation.component(axis))),
            None => Vec2::ZERO,
        };
    }

    /// The pointer was released; `predicted` is the projected resting
    /// translation.
    pub fn on_ended(&mut self, predicted: Vec2) -> Option<SettleRequest> {
        let DragPhase::Dragging(session) = self.phase else {
            trace!(target: "gridpager.drag", phase = ?self.phase, "duplicate terminal event ignored");
            return None;
        };
        let kind = self.decide(session.locked_axis, predicted);
        Some(self.begin_settle(kind))
    }

    /// The host took the gesture away; bounce back.
    pub fn on_externally_cancelled(&mut self) -> Option<SettleRequest> {
        let DragPhase::Dragging(session) = self.phase else {
            trace!(target: "gridpager.drag", phase = ?self.phase, "duplicate terminal event ignored");
            return None;
        };
        debug!(target: "gridpager.drag", "drag cancelled by host");
        Some(self.begin_settle(SettleKind::Cancel {
            axis: session.locked_axis,
        }))
    }

    /// Update the page size. A commit in flight retargets to the new size.
    pub fn set_page_size(&mut self, page_size: Size) {
        self.page_size = page_size;
        if let Some(motion) = self.motion.as_mut() {
            if let SettleKind::Commit { axis, direction } = motion.request.kind {
                motion.request.to = commit_target(axis, direction, page_size);
            }
        }
    }

    // --- settle ------------------------------------------------------------

    /// Advance the settle animation by `dt`.
    ///
    /// Returns the outcome on the tick the animation completes.
    pub fn tick(&mut self, dt: Duration) -> Option<SettleOutcome> {
        let motion = self.motion.as_mut()?;
        motion.animation.tick(dt);
        let t = motion.animation.value();
        self.offset = motion.request.from.lerp(motion.request.to, t);
        if motion.animation.is_complete() {
            let ticket = motion.request.ticket;
            return self.complete_settle(ticket);
        }
        None
    }

    /// Finish the settle identified by `ticket`.
    ///
    /// Returns `None` without touching any state when `ticket` does not
    /// belong to the settle in flight.
    pub fn complete_settle(&mut self, ticket: SettleTicket) -> Option<SettleOutcome> {
        match self.phase {
            DragPhase::Settling {
                ticket: current,
                kind,
            } if current == ticket => Some(self.finish(kind)),
            _ => {
                trace!(
                    target: "gridpager.settle",
                    ticket = ticket.generation(),
                    "stale settle completion ignored"
                );
                None
            }
        }
    }

    /// React to a lifecycle change.
    ///
    /// `Background` and `Active` snap the offset to zero without animation.
    /// A drag in progress is dropped with the index unchanged; a settle
    /// finishes on the spot (a commit still advances the index).
    pub fn handle_scene_phase(&mut self, phase: ScenePhase) -> Option<SettleOutcome> {
        if phase == ScenePhase::Inactive {
            return None;
        }
        match self.phase {
            DragPhase::Idle => {
                self.offset = Vec2::ZERO;
                None
            }
            DragPhase::Dragging(_) => {
                debug!(target: "gridpager.lifecycle", ?phase, "drag dropped on scene change");
                self.phase = DragPhase::Idle;
                self.offset = Vec2::ZERO;
                None
            }
            DragPhase::Settling { kind, .. } => {
                debug!(target: "gridpager.lifecycle", ?phase, ?kind, "settle forced on scene change");
                Some(self.finish(kind))
            }
        }
    }

    // --- internals ---------------------------------------------------------

    fn bounded(&self, axis: Axis, raw: f64) -> f64 {
        resolve_offset(
            raw,
            self.page_size.along(axis),
            self.index.get(axis),
            self.extents.get(axis),
        )
    }

    fn decide(&self, locked_axis: Option<Axis>, predicted: Vec2) -> SettleKind {
        let Some(axis) = locked_axis else {
            debug!(target: "gridpager.drag", "released without axis lock, cancelling");
            return SettleKind::Cancel { axis: None };
        };
        let cancel = SettleKind::Cancel { axis: Some(axis) };

        let page = self.page_size.along(axis);
        let raw = predicted.component(axis);
        let Some(direction) = Direction::from_translation(raw) else {
            debug!(target: "gridpager.drag", raw, "degenerate release, cancelling");
            return cancel;
        };
        if !(page > 0.0) {
            debug!(target: "gridpager.drag", page, "page has no size, cancelling");
            return cancel;
        }

        let bounded = self.bounded(axis, raw);
        let threshold = page * self.thresholds.get(axis);
        let at_boundary = is_at_boundary(Some(axis), self.index, self.extents, direction);
        let commit = bounded.abs() > threshold && !at_boundary;
        debug!(
            target: "gridpager.drag",
            ?axis,
            ?direction,
            bounded,
            threshold,
            at_boundary,
            commit,
            "release decided"
        );

        if commit {
            SettleKind::Commit { axis, direction }
        } else {
            cancel
        }
    }

    fn begin_settle(&mut self, kind: SettleKind) -> SettleRequest {
        self.next_ticket = self.next_ticket.wrapping_add(1);
        let ticket = SettleTicket(self.next_ticket);
        let (to, curve) = match kind {
            SettleKind::Commit { axis, direction } => (
                commit_target(axis, direction, self.page_size),
                self.transition,
            ),
            SettleKind::Cancel { .. } => (Vec2::ZERO, self.cancel_curve),
        };
        let request = SettleRequest {
            ticket,
            kind,
            from: self.offset,
            to,
            curve,
        };
        self.phase = DragPhase::Settling { ticket, kind };
        self.motion = Some(SettleMotion {
            request,
            animation: curve.build(),
        });
        request
    }

    fn finish(&mut self, kind: SettleKind) -> SettleOutcome {
        let outcome = match kind {
            SettleKind::Commit { axis, direction } => {
                self.index.advance(axis, direction, self.extents.get(axis));
                let page = self.index.get(axis);
                info!(target: "gridpager.settle", ?axis, ?direction, page, "page committed");
                SettleOutcome::Committed { axis, page }
            }
            SettleKind::Cancel { .. } => SettleOutcome::Cancelled,
        };
        // Offset and index change together.
        self.offset = Vec2::ZERO;
        self.phase = DragPhase::Idle;
        self.motion = None;
        outcome
    }
}

/// Dominant axis of `translation`; horizontal wins a tie.
fn lock_axis(translation: Vec2) -> Option<Axis> {
    if !translation.is_finite() || translation.is_zero() {
        return None;
    }
    if translation.x.abs() >= translation.y.abs() {
        Some(Axis::Horizontal)
    } else {
        Some(Axis::Vertical)
    }
}

/// Offset at which the neighbor in `direction` fills the viewport.
fn commit_target(axis: Axis, direction: Direction, page_size: Size) -> Vec2 {
    Vec2::along(axis, -(direction.step() as f64) * page_size.along(axis))
}

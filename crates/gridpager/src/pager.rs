#![forbid(unsafe_code)]

//! The assembled pager: state machine, context, and neighbor window.
//!
//! ```ignore
//! let mut pager = Pager::new(PagerConfig::new().total_horizontal_pages(Some(5)), |h, v| {
//!     format!("page {h},{v}")
//! });
//! pager.resize(Size::new(390.0, 844.0));
//!
//! // Host gesture callbacks:
//! pager.on_changed(Vec2::new(-120.0, 4.0), Vec2::new(-180.0, 4.0));
//! pager.on_ended(Vec2::new(-140.0, 4.0), Vec2::new(-210.0, 4.0));
//!
//! // Every frame:
//! if let Some(outcome) = pager.tick(frame_dt) { /* page changed or bounced back */ }
//! pager.compose_into(&mut renderer);
//! ```
//!
//! After every input the context snapshot is republished, so subscribers
//! hear about page, drag, and visibility changes in the same call that
//! caused them.

use std::fmt;
use std::time::Duration;

use web_time::Instant;

use gridpager_core::debug;
use gridpager_core::event::{DragEvent, PagerEvent, ScenePhase};
use gridpager_core::geometry::{Size, Vec2};
use gridpager_core::gesture::{DragAdapter, DragRecognizer, PointerSample};

use crate::config::{ConfigError, PagerConfig};
use crate::context::{PagerContext, PagerSnapshot, SubscriptionId};
use crate::drag::{DragPhase, DragStateMachine, SettleOutcome, SettleRequest, SettleTicket};
use crate::grid::{CellProvider, GridComposer, NeighborGrid, PagerFrame};
use crate::index::PageIndex;

/// A two-axis drag pager over content from `P`.
pub struct Pager<P: CellProvider> {
    config: PagerConfig,
    machine: DragStateMachine,
    context: PagerContext,
    recognizer: DragRecognizer,
    provider: P,
    last_frame: Option<(SettleTicket, Instant)>,
}

impl<P: CellProvider> fmt::Debug for Pager<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pager")
            .field("config", &self.config)
            .field("machine", &self.machine)
            .field("context", &self.context)
            .field("recognizer", &self.recognizer)
            .finish_non_exhaustive()
    }
}

impl<P: CellProvider> Pager<P> {
    /// Build a pager. Preconditions on `config` are checked in debug builds
    /// only; use [`Pager::try_new`] to reject bad input instead.
    #[must_use]
    pub fn new(config: PagerConfig, provider: P) -> Self {
        let machine = DragStateMachine::new(config.extents())
            .with_index(config.initial_index())
            .with_thresholds(config.thresholds())
            .with_transition(config.transition)
            .with_cancel_curve(config.cancel_curve);
        let recognizer = DragRecognizer::new(config.recognizer.clone());
        let mut pager = Self {
            config,
            machine,
            context: PagerContext::default(),
            recognizer,
            provider,
            last_frame: None,
        };
        let snapshot = pager.snapshot();
        pager.context = PagerContext::new(snapshot);
        pager
    }

    /// Validate `config`, then build.
    pub fn try_new(config: PagerConfig, provider: P) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, provider))
    }

    // --- accessors ---------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Committed page pair.
    #[inline]
    #[must_use]
    pub fn index(&self) -> PageIndex {
        self.machine.index()
    }

    /// Current visual offset.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.machine.offset()
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.machine.phase()
    }

    /// Viewport size, which is also the page size.
    #[inline]
    #[must_use]
    pub fn page_size(&self) -> Size {
        self.machine.page_size()
    }

    /// The underlying state machine.
    #[inline]
    #[must_use]
    pub fn machine(&self) -> &DragStateMachine {
        &self.machine
    }

    /// Context handed to cell content.
    #[inline]
    #[must_use]
    pub fn context(&self) -> &PagerContext {
        &self.context
    }

    /// The settle in flight, for hosts that animate it themselves.
    #[must_use]
    pub fn pending_settle(&self) -> Option<SettleRequest> {
        self.machine.pending_settle()
    }

    /// Register a context observer.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&PagerSnapshot) + 'static,
    {
        self.context.subscribe(callback)
    }

    /// Remove a context observer.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.context.unsubscribe(id)
    }

    // --- input -------------------------------------------------------------

    /// Feed any pager event. Returns a settle outcome when the event forced
    /// one (scene phase changes).
    pub fn handle(&mut self, event: PagerEvent) -> Option<SettleOutcome> {
        match event {
            PagerEvent::Drag(drag) => {
                self.dispatch(drag);
                None
            }
            PagerEvent::ScenePhase(phase) => self.handle_scene_phase(phase),
            PagerEvent::Resize(size) => {
                self.resize(size);
                None
            }
        }
    }

    /// Feed a raw pointer sample through the built-in recognizer.
    pub fn handle_pointer(&mut self, sample: PointerSample, now: Instant) {
        if let Some(event) = self.recognizer.process(sample, now) {
            self.dispatch(event);
        }
    }

    /// React to a lifecycle change.
    pub fn handle_scene_phase(&mut self, phase: ScenePhase) -> Option<SettleOutcome> {
        if phase == ScenePhase::Background {
            self.recognizer.reset();
        }
        let outcome = self.machine.handle_scene_phase(phase);
        self.publish();
        outcome
    }

    /// Set the viewport size.
    pub fn resize(&mut self, size: Size) {
        debug!(target: "gridpager.lifecycle", width = size.width, height = size.height, "resized");
        self.machine.set_page_size(size);
        self.publish();
    }

    // --- animation ---------------------------------------------------------

    /// Advance the settle animation by `dt`.
    pub fn tick(&mut self, dt: Duration) -> Option<SettleOutcome> {
        let outcome = self.machine.tick(dt);
        self.publish();
        outcome
    }

    /// Advance the settle animation to the frame time `now`.
    ///
    /// Without an earlier frame time, or outside a settle, this advances by
    /// zero.
    pub fn tick_at(&mut self, now: Instant) -> Option<SettleOutcome> {
        let ticket = self.machine.pending_settle().map(|r| r.ticket);
        let dt = match (self.last_frame, ticket) {
            (Some((last_ticket, last)), Some(current)) if last_ticket == current => {
                now.saturating_duration_since(last)
            }
            _ => Duration::ZERO,
        };
        let outcome = self.tick(dt);
        // The clock restarts with every settle.
        self.last_frame = self
            .machine
            .pending_settle()
            .map(|r| (r.ticket, now));
        outcome
    }

    /// Finish a settle the host animated itself. Stale tickets are ignored.
    pub fn complete_settle(&mut self, ticket: SettleTicket) -> Option<SettleOutcome> {
        let outcome = self.machine.complete_settle(ticket);
        self.publish();
        outcome
    }

    // --- output ------------------------------------------------------------

    /// What the context currently reports.
    #[must_use]
    pub fn snapshot(&self) -> PagerSnapshot {
        PagerSnapshot {
            page: self.machine.index(),
            is_dragging: self.machine.is_dragging(),
            visibility: self
                .config
                .enable_page_visibility
                .then(|| self.machine.visibility_info()),
        }
    }

    /// Cells and placement for the current frame.
    #[must_use]
    pub fn frame(&self) -> PagerFrame<P::Cell> {
        let slots = NeighborGrid::compose(
            self.machine.index(),
            self.machine.extents(),
            self.config.bounce,
        );
        PagerFrame::build(
            &self.provider,
            &slots,
            self.machine.offset(),
            self.machine.page_size(),
            self.config.enable_clipping,
            self.context.snapshot(),
        )
    }

    /// Hand the current frame to `composer`.
    pub fn compose_into<C>(&self, composer: &mut C)
    where
        C: GridComposer<P::Cell> + ?Sized,
    {
        composer.compose(&self.frame());
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        self.context.publish(snapshot);
    }
}

impl<P: CellProvider> DragAdapter for Pager<P> {
    fn on_changed(&mut self, translation: Vec2, _predicted_end_translation: Vec2) {
        self.machine.on_changed(translation);
        self.publish();
    }

    fn on_ended(&mut self, _translation: Vec2, predicted_end_translation: Vec2) {
        self.machine.on_ended(predicted_end_translation);
        self.publish();
    }

    fn on_externally_cancelled(&mut self) {
        self.machine.on_externally_cancelled();
        self.publish();
    }

    fn dispatch(&mut self, event: DragEvent) {
        self.machine.handle_drag(event);
        self.publish();
    }
}

#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! This module defines the events a pager consumes. Hosts translate their
//! native gesture and lifecycle callbacks into these values, either directly
//! or through [`DragRecognizer`](crate::gesture::DragRecognizer).
//!
//! # Design Notes
//!
//! - Translations are cumulative from the point where the drag began, not
//!   per-sample deltas.
//! - `predicted_end_translation` is where the drag would come to rest if the
//!   finger lifted now and momentum carried on; hosts without a native
//!   prediction may pass the raw translation.
//! - Within one drag session, every `Changed` precedes the single terminal
//!   `Ended` or `ExternallyCancelled`.

use crate::geometry::{Size, Vec2};

/// A single drag gesture callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// The pointer moved while the drag is active.
    Changed {
        /// Cumulative translation since the drag began.
        translation: Vec2,
        /// Projected resting translation given current velocity.
        predicted_end_translation: Vec2,
    },

    /// The pointer was released normally.
    Ended {
        /// Cumulative translation at release.
        translation: Vec2,
        /// Projected resting translation at release.
        predicted_end_translation: Vec2,
    },

    /// The host intercepted the gesture (for example an edge-swipe
    /// navigation) and no `Ended` will follow.
    ExternallyCancelled,
}

impl DragEvent {
    /// Convenience constructor for a `Changed` sample without momentum.
    #[must_use]
    pub const fn changed(translation: Vec2) -> Self {
        Self::Changed {
            translation,
            predicted_end_translation: translation,
        }
    }

    /// Convenience constructor for an `Ended` event.
    #[must_use]
    pub const fn ended(translation: Vec2, predicted_end_translation: Vec2) -> Self {
        Self::Ended {
            translation,
            predicted_end_translation,
        }
    }

    /// Whether this event terminates the drag session.
    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Ended { .. } | Self::ExternallyCancelled)
    }
}

/// Application lifecycle phase reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScenePhase {
    /// In the foreground and receiving input.
    #[default]
    Active,
    /// Visible but not receiving input (e.g. an overlay is shown).
    Inactive,
    /// Not visible.
    Background,
}

/// Everything a pager can be fed, in one stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PagerEvent {
    /// A drag gesture callback.
    Drag(DragEvent),

    /// The lifecycle phase changed.
    ScenePhase(ScenePhase),

    /// The viewport (and therefore the page size) changed.
    Resize(Size),
}

impl From<DragEvent> for PagerEvent {
    fn from(event: DragEvent) -> Self {
        Self::Drag(event)
    }
}

impl From<ScenePhase> for PagerEvent {
    fn from(phase: ScenePhase) -> Self {
        Self::ScenePhase(phase)
    }
}

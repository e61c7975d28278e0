#![forbid(unsafe_code)]

//! Core: geometry, drag gestures, lifecycle events, and settle animations.
//!
//! # Role in gridpager
//! `gridpager-core` is the input layer. It owns the normalized drag and
//! lifecycle event types, the cross-platform drag adapter that turns raw
//! pointer samples into translations, and the animation primitives used to
//! settle the pager after a release.
//!
//! # Primary responsibilities
//! - **Geometry**: axes, 2-D offsets, and page sizes.
//! - **Event**: canonical drag events and scene-phase changes.
//! - **Gesture**: pointer samples in, `DragEvent`s out, with predicted end
//!   translation.
//! - **Animation**: easing curves, tweens, springs, and fixed presets.
//!
//! # How it fits in the system
//! The pager crate (`gridpager`) consumes `DragEvent` and `ScenePhase`
//! values and drives its state machine with them. Nothing here knows about
//! pages or indices, so the primitives can be reused by any host adapter.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};

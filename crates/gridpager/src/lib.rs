#![forbid(unsafe_code)]

//! Two-axis drag pager.
//!
//! # Role in gridpager
//! This crate turns drag gestures into page changes over a grid of cells
//! that may be finite (wrapping on commit) or unbounded on either axis.
//!
//! # Primary responsibilities
//! - **Bound**: rubber-band damping near the first and last page.
//! - **Boundary**: whether a release may commit in its direction.
//! - **Drag**: the idle / dragging / settling state machine.
//! - **Index**: wrap-around and unbounded page arithmetic.
//! - **Visibility**: per-cell visibility derived from the offset.
//! - **Grid**: the neighbor window and cell placement.
//! - **Context**: the values exposed to hosted content.
//!
//! # How it fits in the system
//! Hosts feed [`gridpager_core`] drag and lifecycle events (or raw pointer
//! samples) into a [`Pager`], tick it once per frame, and draw the
//! [`PagerFrame`] it produces with their own [`GridComposer`].

pub mod bound;
pub mod boundary;
pub mod config;
pub mod context;
pub mod drag;
pub mod extent;
pub mod grid;
pub mod index;
pub mod pager;
pub mod visibility;

pub use config::{ConfigError, PagerConfig};
pub use context::{CurrentPage, PagerContext, PagerSnapshot, SubscriptionId};
pub use drag::{
    DragPhase, DragSession, DragStateMachine, SettleKind, SettleOutcome, SettleRequest,
    SettleTicket, ThresholdRatios,
};
pub use extent::{AxisExtent, GridExtent};
pub use grid::{CellProvider, GridComposer, NeighborGrid, NeighborSlot, PagerFrame, PlacedCell};
pub use index::{Direction, PageIndex};
pub use pager::Pager;
pub use visibility::{NeighborRole, VisibilityInfo};

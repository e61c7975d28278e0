#![forbid(unsafe_code)]

//! Values the pager exposes to the content it hosts.
//!
//! The pager is the only writer. Consumers either read the latest
//! [`PagerSnapshot`] through the pull accessors or register a callback that
//! fires whenever the snapshot changes. Publishing an unchanged snapshot is a
//! no-op, so subscribers never see the same value twice in a row.

use std::fmt;

use crate::index::PageIndex;
use crate::visibility::{NeighborRole, VisibilityInfo};

/// The committed page pair as seen by consumers.
pub type CurrentPage = PageIndex;

/// One observation of the pager's exposed state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagerSnapshot {
    /// Committed page pair.
    pub page: CurrentPage,
    /// Whether a drag session is following the pointer.
    pub is_dragging: bool,
    /// Offset fraction and axis. `None` when page visibility is disabled.
    pub visibility: Option<VisibilityInfo>,
}

impl PagerSnapshot {
    /// Visibility of the cell in `role`, or `None` when not applicable.
    #[must_use]
    pub fn visibility(&self, role: NeighborRole) -> Option<f64> {
        self.visibility.and_then(|info| info.visibility(role))
    }
}

/// Handle returned by [`PagerContext::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&PagerSnapshot)>;

/// Context object handed to cell content.
pub struct PagerContext {
    snapshot: PagerSnapshot,
    subscribers: Vec<(SubscriptionId, Callback)>,
    next_id: u64,
}

impl fmt::Debug for PagerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagerContext")
            .field("snapshot", &self.snapshot)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Default for PagerContext {
    fn default() -> Self {
        Self::new(PagerSnapshot::default())
    }
}

impl PagerContext {
    /// Create a context holding `initial`.
    #[must_use]
    pub fn new(initial: PagerSnapshot) -> Self {
        Self {
            snapshot: initial,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Latest snapshot.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> PagerSnapshot {
        self.snapshot
    }

    /// Committed page pair.
    #[inline]
    #[must_use]
    pub fn current_page(&self) -> CurrentPage {
        self.snapshot.page
    }

    /// Whether a drag is in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.snapshot.is_dragging
    }

    /// Offset fraction and axis, when page visibility is enabled.
    #[inline]
    #[must_use]
    pub fn offset_info(&self) -> Option<VisibilityInfo> {
        self.snapshot.visibility
    }

    /// Visibility of the cell in `role`.
    #[must_use]
    pub fn visibility(&self, role: NeighborRole) -> Option<f64> {
        self.snapshot.visibility(role)
    }

    /// Call `callback` with every future change.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&PagerSnapshot) + 'static,
    {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Store `snapshot` and notify subscribers if it differs from the last
    /// one. Returns whether anything changed.
    pub fn publish(&mut self, snapshot: PagerSnapshot) -> bool {
        if snapshot == self.snapshot {
            return false;
        }
        self.snapshot = snapshot;
        for (_, callback) in &mut self.subscribers {
            callback(&self.snapshot);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gridpager_core::geometry::Axis;

    use super::*;

    fn dragging(percent: f64) -> PagerSnapshot {
        PagerSnapshot {
            page: PageIndex::new(1, 0),
            is_dragging: true,
            visibility: Some(VisibilityInfo {
                percent,
                axis: Some(Axis::Horizontal),
            }),
        }
    }

    #[test]
    fn pull_accessors_reflect_latest_publish() {
        let mut ctx = PagerContext::default();
        assert!(!ctx.is_dragging());
        assert_eq!(ctx.offset_info(), None);
        ctx.publish(dragging(0.25));
        assert!(ctx.is_dragging());
        assert_eq!(ctx.current_page(), PageIndex::new(1, 0));
        assert_eq!(ctx.visibility(NeighborRole::Leading), Some(0.25));
        assert_eq!(ctx.visibility(NeighborRole::Top), None);
    }

    #[test]
    fn disabled_visibility_hides_every_role() {
        let ctx = PagerContext::default();
        for role in NeighborRole::ALL {
            assert_eq!(ctx.visibility(role), None);
        }
    }

    #[test]
    fn subscribers_see_changes_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut ctx = PagerContext::default();
        let sink = Rc::clone(&seen);
        ctx.subscribe(move |s: &PagerSnapshot| sink.borrow_mut().push(*s));

        assert!(ctx.publish(dragging(0.1)));
        assert!(!ctx.publish(dragging(0.1)));
        assert!(ctx.publish(dragging(0.2)));
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let count = Rc::new(RefCell::new(0_u32));
        let mut ctx = PagerContext::default();
        let sink = Rc::clone(&count);
        let id = ctx.subscribe(move |_: &PagerSnapshot| *sink.borrow_mut() += 1);
        ctx.publish(dragging(0.1));
        assert!(ctx.unsubscribe(id));
        assert!(!ctx.unsubscribe(id));
        ctx.publish(dragging(0.3));
        assert_eq!(*count.borrow(), 1);
        assert_eq!(ctx.subscriber_count(), 0);
    }

    #[test]
    fn debug_omits_callbacks() {
        let mut ctx = PagerContext::default();
        ctx.subscribe(|_: &PagerSnapshot| {});
        let dbg = format!("{ctx:?}");
        assert!(dbg.contains("subscribers: 1"));
    }
}

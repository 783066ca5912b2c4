// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus capture, auto-focus and restoration across one open/close cycle.

use crate::{FocusSpace, FocusTrap};

/// The host's view of platform focus.
///
/// Implemented by whatever owns real focus (a DOM bridge, a retained widget
/// tree, a test double).
pub trait FocusHost<K> {
    /// The node that currently holds focus, if any.
    fn focused(&self) -> Option<K>;

    /// Moves focus to `node`. Returns `false` if the host refused.
    fn focus(&mut self, node: K) -> bool;

    /// Whether `node` still exists and can take focus right now.
    fn can_focus(&self, node: K) -> bool;
}

/// Owns the focus snapshot for one panel instance.
///
/// The lifecycle for one open/close cycle is:
///
/// 1. [`capture`](Self::capture) when an open request is accepted.
/// 2. [`trap`](Self::trap) and [`auto_focus_first`](Self::auto_focus_first)
///    once the panel is open.
/// 3. [`restore`](Self::restore) (or [`release`](Self::release)) on close.
///
/// Every step tolerates being called out of order: restoring without a
/// snapshot, or twice, does nothing.
#[derive(Clone, Debug)]
pub struct FocusManager<K> {
    snapshot: Option<K>,
}

impl<K> Default for FocusManager<K> {
    fn default() -> Self {
        Self { snapshot: None }
    }
}

impl<K: Copy + Eq> FocusManager<K> {
    /// Creates a manager with no snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the node that holds focus right now as the restore target.
    pub fn capture<H: FocusHost<K> + ?Sized>(&mut self, host: &H) {
        self.snapshot = host.focused();
    }

    /// The captured restore target, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<K> {
        self.snapshot
    }

    /// Builds a trap over the panel content.
    #[must_use]
    pub fn trap(&self, space: &FocusSpace<'_, K>) -> FocusTrap<K> {
        FocusTrap::new(space)
    }

    /// Focuses the panel's initial target.
    ///
    /// An explicit `initial` target wins when the host can focus it; otherwise
    /// the first tabbable entry of `space` is used. Returns the node that
    /// received focus, or `None` if the panel has nothing focusable.
    pub fn auto_focus_first<H: FocusHost<K> + ?Sized>(
        &self,
        space: &FocusSpace<'_, K>,
        initial: Option<K>,
        host: &mut H,
    ) -> Option<K> {
        if let Some(node) = initial.filter(|&n| host.can_focus(n))
            && host.focus(node)
        {
            return Some(node);
        }
        let first = space.tab_order().into_iter().find(|&n| host.can_focus(n))?;
        host.focus(first).then_some(first)
    }

    /// Returns focus to the captured node and clears the snapshot.
    ///
    /// If the node no longer exists or cannot take focus, focus is left where
    /// the host puts it by default. Returns whether focus was moved.
    pub fn restore<H: FocusHost<K> + ?Sized>(&mut self, host: &mut H) -> bool {
        let Some(node) = self.snapshot.take() else {
            return false;
        };
        if !host.can_focus(node) {
            #[cfg(feature = "tracing")]
            tracing::debug!("focus snapshot is gone; not restoring");
            return false;
        }
        host.focus(node)
    }

    /// Clears the snapshot without moving focus.
    pub fn release(&mut self) {
        self.snapshot = None;
    }
}

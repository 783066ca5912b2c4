// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cyclic Tab/Shift+Tab containment inside one panel.

use alloc::vec::Vec;

use crate::{DefaultPolicy, FocusPolicy, FocusSpace, Navigation, WrapMode};

/// Keeps Tab traversal inside a panel while it is open.
///
/// A trap is built from a [`FocusSpace`] snapshot of the panel content. The
/// host forwards Tab (as [`Navigation::Next`]) and Shift+Tab (as
/// [`Navigation::Prev`]) to [`FocusTrap::next`], focuses the returned node and
/// suppresses the platform's default traversal.
///
/// Dropping the trap (or calling [`FocusTrap::release`]) releases it. A trap
/// over a panel with no tabbable content is inert: every query returns `None`.
#[derive(Clone, Debug)]
pub struct FocusTrap<K> {
    order: Vec<K>,
    policy: DefaultPolicy,
}

impl<K: Copy + Eq> FocusTrap<K> {
    /// Builds a trap over the tabbable entries of `space`.
    #[must_use]
    pub fn new(space: &FocusSpace<'_, K>) -> Self {
        let order = space.tab_order();
        #[cfg(feature = "tracing")]
        tracing::debug!(targets = order.len(), "focus trap installed");
        Self {
            order,
            policy: DefaultPolicy {
                wrap: WrapMode::Cycle,
            },
        }
    }

    /// Rebuilds the traversal order after the panel content changed.
    pub fn refresh(&mut self, space: &FocusSpace<'_, K>) {
        self.order = space.tab_order();
    }

    /// Where focus should go for `direction`, given the currently focused node.
    ///
    /// `current` may lie outside the panel (or be `None`); focus is then pulled
    /// back in at the first or last target.
    #[must_use]
    pub fn next(&self, current: Option<K>, direction: Navigation) -> Option<K> {
        self.policy.next(current, direction, &self.order)
    }

    /// Whether the trap has any target to cycle through.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether `node` is one of the trapped targets.
    #[must_use]
    pub fn contains(&self, node: K) -> bool {
        self.order.contains(&node)
    }

    /// The trapped targets in traversal order.
    #[must_use]
    pub fn targets(&self) -> &[K] {
        &self.order
    }

    /// Releases the trap.
    pub fn release(self) {
        #[cfg(feature = "tracing")]
        tracing::debug!("focus trap released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FocusEntry;
    use alloc::vec;
    use kurbo::Rect;

    fn row(ids: &[u32]) -> Vec<FocusEntry<u32>> {
        ids.iter()
            .enumerate()
            .map(|(i, &id)| {
                let x = 20.0 * i as f64;
                FocusEntry::new(id, Rect::new(x, 0.0, x + 10.0, 10.0))
            })
            .collect()
    }

    #[test]
    fn tab_wraps_both_ways() {
        let entries = row(&[1, 2, 3]);
        let trap = FocusTrap::new(&FocusSpace { nodes: &entries });
        assert_eq!(trap.next(Some(3), Navigation::Next), Some(1));
        assert_eq!(trap.next(Some(1), Navigation::Prev), Some(3));
        assert_eq!(trap.next(Some(2), Navigation::Next), Some(3));
    }

    #[test]
    fn escaped_focus_is_pulled_back() {
        let entries = row(&[1, 2, 3]);
        let trap = FocusTrap::new(&FocusSpace { nodes: &entries });
        assert_eq!(trap.next(Some(42), Navigation::Next), Some(1));
        assert_eq!(trap.next(None, Navigation::Prev), Some(3));
    }

    #[test]
    fn empty_panel_trap_is_inert() {
        let entries: Vec<FocusEntry<u32>> = vec![
            FocusEntry::new(1, Rect::new(0.0, 0.0, 10.0, 10.0)).with_enabled(false),
        ];
        let trap = FocusTrap::new(&FocusSpace { nodes: &entries });
        assert!(trap.is_inert());
        assert_eq!(trap.next(Some(1), Navigation::Next), None);
        trap.release();
    }

    #[test]
    fn refresh_picks_up_new_content() {
        let entries = row(&[1, 2]);
        let mut trap = FocusTrap::new(&FocusSpace { nodes: &entries });
        let grown = row(&[1, 2, 7]);
        trap.refresh(&FocusSpace { nodes: &grown });
        assert!(trap.contains(7));
        assert_eq!(trap.next(Some(2), Navigation::Next), Some(7));
    }
}

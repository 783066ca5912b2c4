// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Focus: focus containment and restoration for floating panels.
//!
//! Modal-like panels (date pickers, menus, dialogs) keep keyboard focus inside
//! themselves while open and hand it back to whatever held it before they
//! opened. This crate models that as:
//!
//! - A **capability interface** ([`FocusTarget`]) answering whether a node is
//!   focusable, visible and disabled. Only nodes that are focusable, visible
//!   (non-zero measured size) and not disabled are *tabbable*.
//! - A **snapshot of candidates** ([`FocusEntry`] / [`FocusSpace`]) describing
//!   the tabbable content of one panel root, with optional explicit ordering.
//! - A **traversal policy** ([`FocusPolicy`], [`DefaultPolicy`]) that orders
//!   candidates and picks the next one for a [`Navigation`] intent.
//! - A **trap** ([`FocusTrap`]) that makes Tab and Shift+Tab cycle within the
//!   panel: past the last target wraps to the first and vice versa.
//! - A **manager** ([`FocusManager`]) that captures the previously focused node
//!   when a panel opens, auto-focuses the panel content, and restores focus on
//!   close through a host-provided [`FocusHost`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use perch_focus::{FocusEntry, FocusSpace, FocusTrap, Navigation};
//!
//! let entries = vec![
//!     FocusEntry::new(1_u32, Rect::new(0.0, 0.0, 10.0, 10.0)),
//!     FocusEntry::new(2_u32, Rect::new(20.0, 0.0, 30.0, 10.0)),
//! ];
//! let space = FocusSpace { nodes: &entries };
//! let trap = FocusTrap::new(&space);
//!
//! // Tab moves from the first button to the second…
//! assert_eq!(trap.next(Some(1), Navigation::Next), Some(2));
//! // …and wraps back to the first.
//! assert_eq!(trap.next(Some(2), Navigation::Next), Some(1));
//! // Shift+Tab before the first wraps to the last.
//! assert_eq!(trap.next(Some(1), Navigation::Prev), Some(2));
//! ```
//!
//! The core types are generic over the node identifier `K`, so callers can use
//! any small, copyable handle. Geometry is expressed in terms of
//! [`kurbo::Rect`]; a [`FocusSpace`] should use one coordinate space for all of
//! its entries so reading order is meaningful.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//! - `tracing`: log trap installation, auto-focus and restoration.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod manager;
mod trap;

use alloc::vec::Vec;
use core::cmp::Ordering;

use kurbo::Rect;

pub use manager::{FocusHost, FocusManager};
pub use trap::FocusTrap;

/// Direction of focus traversal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Move to the next candidate in tab order (Tab).
    Next,
    /// Move to the previous candidate in tab order (Shift+Tab).
    Prev,
    /// Jump to the first candidate.
    First,
    /// Jump to the last candidate.
    Last,
}

/// Capability interface for anything that can receive focus.
///
/// Hosts implement this for their UI node type (or use [`FocusEntry`]) so the
/// focus machinery never inspects a concrete tree representation.
pub trait FocusTarget {
    /// Whether the node is interactive at all (a button, a link, a field, an
    /// element with an explicit tab stop).
    fn is_focusable(&self) -> bool;

    /// Whether the node has a non-zero measured size.
    fn is_visible(&self) -> bool;

    /// Whether the node is currently disabled.
    fn is_disabled(&self) -> bool;

    /// Whether keyboard traversal may land on this node.
    fn is_tabbable(&self) -> bool {
        self.is_focusable() && self.is_visible() && !self.is_disabled()
    }
}

/// A single focus candidate within a [`FocusSpace`].
#[derive(Clone, Debug)]
pub struct FocusEntry<K> {
    /// Identifier for this node.
    pub id: K,
    /// Measured bounds in the coordinate space of the surrounding [`FocusSpace`].
    ///
    /// A zero-width or zero-height rect marks the node as not visible.
    pub rect: Rect,
    /// Optional explicit ordering key, similar to a positive tab index.
    ///
    /// Entries with an order come before entries without one.
    pub order: Option<i32>,
    /// Whether the node is interactive.
    pub focusable: bool,
    /// Whether the node is enabled.
    pub enabled: bool,
}

impl<K> FocusEntry<K> {
    /// Creates an enabled, focusable entry without an explicit order.
    pub const fn new(id: K, rect: Rect) -> Self {
        Self {
            id,
            rect,
            order: None,
            focusable: true,
            enabled: true,
        }
    }

    /// Returns this entry with an explicit ordering key.
    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// Returns this entry enabled or disabled.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Returns this entry marked focusable or not.
    #[must_use]
    pub fn with_focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }
}

impl<K> FocusTarget for FocusEntry<K> {
    fn is_focusable(&self) -> bool {
        self.focusable
    }

    fn is_visible(&self) -> bool {
        self.rect.width() > 0.0 && self.rect.height() > 0.0
    }

    fn is_disabled(&self) -> bool {
        !self.enabled
    }
}

/// A read-only snapshot of the candidates inside one panel root.
///
/// Rebuild it whenever the panel content changes. Policies treat it as
/// immutable.
#[derive(Clone, Debug)]
pub struct FocusSpace<'a, K> {
    /// Candidates inside the panel, in document order.
    pub nodes: &'a [FocusEntry<K>],
}

impl<K: Copy> FocusSpace<'_, K> {
    /// Tabbable candidates sorted into traversal order.
    ///
    /// Explicit [`FocusEntry::order`] keys come first, then reading order
    /// (top to bottom, then left to right).
    #[must_use]
    pub fn tab_order(&self) -> Vec<K> {
        let mut tabbable: Vec<&FocusEntry<K>> =
            self.nodes.iter().filter(|e| e.is_tabbable()).collect();
        tabbable.sort_by(|a, b| compare_linear(a, b));
        tabbable.into_iter().map(|e| e.id).collect()
    }

    /// Whether the space has no tabbable candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.nodes.iter().any(FocusTarget::is_tabbable)
    }
}

/// Wrap behavior at the ends of the traversal order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Reaching the end yields no next candidate.
    Never,
    /// Wrap around within the space.
    #[default]
    Cycle,
}

/// Trait for focus traversal policies.
///
/// A policy receives a navigation intent, the current origin (if focus is in
/// the space at all) and the ordered candidates, and returns the next focused
/// node if any.
pub trait FocusPolicy<K>
where
    K: Copy + Eq,
{
    /// Compute the next focus target.
    fn next(&self, origin: Option<K>, direction: Navigation, order: &[K]) -> Option<K>;
}

/// Linear traversal over the tab order with configurable wrapping.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultPolicy {
    /// Wrap behavior when traversing candidates.
    pub wrap: WrapMode,
}

impl<K> FocusPolicy<K> for DefaultPolicy
where
    K: Copy + Eq,
{
    fn next(&self, origin: Option<K>, direction: Navigation, order: &[K]) -> Option<K> {
        let (first, last) = (order.first().copied()?, order.last().copied()?);
        let position = origin.and_then(|o| order.iter().position(|&k| k == o));
        let wraps = matches!(self.wrap, WrapMode::Cycle);

        match direction {
            Navigation::First => Some(first),
            Navigation::Last => Some(last),
            // Focus outside the space re-enters at the matching end.
            Navigation::Next => match position {
                Some(pos) if pos + 1 < order.len() => Some(order[pos + 1]),
                Some(_) => wraps.then_some(first),
                None => Some(first),
            },
            Navigation::Prev => match position {
                Some(pos) if pos > 0 => Some(order[pos - 1]),
                Some(_) => wraps.then_some(last),
                None => Some(last),
            },
        }
    }
}

fn compare_linear<K>(a: &FocusEntry<K>, b: &FocusEntry<K>) -> Ordering {
    // First, honor explicit order when present.
    match (a.order, b.order) {
        (Some(ao), Some(bo)) => ao
            .cmp(&bo)
            .then_with(|| compare_rect_reading(&a.rect, &b.rect)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_rect_reading(&a.rect, &b.rect),
    }
}

fn compare_rect_reading(a: &Rect, b: &Rect) -> Ordering {
    const RELATIVE_EPS: f64 = 1e-6;
    let ay = a.y0;
    let by = b.y0;
    if (ay - by).abs() > f64::max(ay.abs(), by.abs()) * RELATIVE_EPS {
        return ay.partial_cmp(&by).unwrap_or(Ordering::Equal);
    }
    a.x0.partial_cmp(&b.x0).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn tab_order_is_reading_order() {
        let entries = vec![
            FocusEntry::new(3_u32, Rect::new(0.0, 20.0, 10.0, 30.0)),
            FocusEntry::new(2_u32, Rect::new(20.0, 0.0, 30.0, 10.0)),
            FocusEntry::new(1_u32, Rect::new(0.0, 0.0, 10.0, 10.0)),
        ];
        let space = FocusSpace { nodes: &entries };
        assert_eq!(space.tab_order(), vec![1, 2, 3]);
    }

    #[test]
    fn tab_order_respects_explicit_order() {
        let entries = vec![
            FocusEntry::new(1_u32, Rect::new(20.0, 0.0, 30.0, 10.0)).with_order(2),
            FocusEntry::new(2_u32, Rect::new(0.0, 0.0, 10.0, 10.0)).with_order(1),
            FocusEntry::new(3_u32, Rect::new(0.0, 0.0, 5.0, 5.0)),
        ];
        let space = FocusSpace { nodes: &entries };
        // Despite the reading-order geometry, explicit order should win.
        assert_eq!(space.tab_order(), vec![2, 1, 3]);
    }

    #[test]
    fn tab_order_skips_untabbable_entries() {
        let entries = vec![
            FocusEntry::new(1_u32, Rect::new(0.0, 0.0, 10.0, 10.0)),
            FocusEntry::new(2_u32, Rect::new(20.0, 0.0, 30.0, 10.0)).with_enabled(false),
            // Zero height: measured but not visible.
            FocusEntry::new(3_u32, Rect::new(40.0, 0.0, 50.0, 0.0)),
            FocusEntry::new(4_u32, Rect::new(60.0, 0.0, 70.0, 10.0)).with_focusable(false),
            FocusEntry::new(5_u32, Rect::new(80.0, 0.0, 90.0, 10.0)),
        ];
        let space = FocusSpace { nodes: &entries };
        assert_eq!(space.tab_order(), vec![1, 5]);
        assert!(!space.is_empty());
    }

    #[test]
    fn policy_without_wrap_stops_at_edges() {
        let policy = DefaultPolicy {
            wrap: WrapMode::Never,
        };
        let order = [1_u32, 2];
        assert_eq!(policy.next(Some(2), Navigation::Next, &order), None);
        assert_eq!(policy.next(Some(1), Navigation::Prev, &order), None);
        assert_eq!(policy.next(Some(1), Navigation::Next, &order), Some(2));
    }

    #[test]
    fn policy_reenters_from_outside() {
        let policy = DefaultPolicy::default();
        let order = [1_u32, 2, 3];
        assert_eq!(policy.next(None, Navigation::Next, &order), Some(1));
        assert_eq!(policy.next(Some(99), Navigation::Prev, &order), Some(3));
        assert_eq!(policy.next(Some(2), Navigation::Last, &order), Some(3));
        assert_eq!(policy.next(Some(2), Navigation::First, &order), Some(1));
    }

    #[test]
    fn policy_on_empty_order_is_none() {
        let policy = DefaultPolicy::default();
        let order: [u32; 0] = [];
        assert_eq!(policy.next(None, Navigation::Next, &order), None);
        assert_eq!(policy.next(Some(1), Navigation::First, &order), None);
    }
}

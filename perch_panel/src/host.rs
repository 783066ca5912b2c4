// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host abstraction: everything the engine asks of the UI runtime.

use alloc::vec::Vec;

use chrono::NaiveDateTime;
use kurbo::{Rect, Size};
use perch_focus::{FocusEntry, FocusHost};
use perch_gesture::Gesture;
use perch_placement::Placement;

use crate::{CloseReason, TimerToken};

/// Notifications delivered through [`Host::emit`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PanelEvent {
    /// The panel opened. `animate` is false when the host prefers reduced motion.
    Opened {
        /// Whether an entrance transition may play.
        animate: bool,
    },
    /// The panel closed.
    Closed(CloseReason),
    /// The panel was (re)positioned.
    Placed(Placement),
    /// A touch gesture was recognized over the panel.
    Gesture(Gesture),
    /// The roving index moved; the host should focus this item.
    Highlighted(usize),
    /// The item at this index was activated from the keyboard.
    Activated(usize),
    /// The date picker's value changed.
    Change(NaiveDateTime),
}

/// The UI runtime a [`PanelController`](crate::PanelController) drives.
///
/// Geometry is reported in one shared coordinate space. Timers are one-shot:
/// after `delay_ms` the host calls
/// [`PanelController::on_timer`](crate::PanelController::on_timer) with the
/// token, unless it was canceled first.
pub trait Host<K>: FocusHost<K> {
    /// Bounds of the anchor element.
    fn anchor_rect(&self) -> Rect;

    /// Measured size of the panel content.
    fn panel_size(&self) -> Size;

    /// Bounds of the visible viewport.
    fn viewport(&self) -> Rect;

    /// Current time in milliseconds on a monotonic clock.
    fn now_ms(&self) -> u64;

    /// Whether the user asked for reduced motion.
    fn reduced_motion(&self) -> bool {
        false
    }

    /// Whether the viewport is a compact (phone-sized) layout.
    fn is_compact(&self) -> bool {
        false
    }

    /// Focus candidates inside the panel, in document order.
    fn panel_targets(&self) -> Vec<FocusEntry<K>>;

    /// A node that should take focus when the panel opens, overriding the
    /// first tabbable target.
    fn initial_focus(&self) -> Option<K> {
        None
    }

    /// Starts a one-shot timer.
    fn schedule_timer(&mut self, token: TimerToken, delay_ms: u64);

    /// Cancels a timer started by [`schedule_timer`](Self::schedule_timer).
    fn cancel_timer(&mut self, token: TimerToken);

    /// Starts routing global pointer-down, touch-start and Escape events.
    fn attach_listeners(&mut self);

    /// Stops routing global events.
    fn detach_listeners(&mut self);

    /// Delivers a notification.
    fn emit(&mut self, event: PanelEvent);
}

// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropdown menus.
//!
//! A dropdown opens on activation of its trigger, lists items that arrow keys
//! rove over, and closes on Escape, on a click outside, on selection, or on an
//! upward swipe when the screen is compact.
//!
//! ```rust
//! use perch_panel::widgets::dropdown::{self, DropdownPosition};
//! use perch_panel::{TriggerMode, Side, Align};
//!
//! let config = dropdown::config(DropdownPosition::BottomRight);
//! assert_eq!(config.trigger.mode, TriggerMode::Explicit);
//! assert_eq!(config.side, Side::Bottom);
//! assert_eq!(config.placement.align, Align::End);
//! assert!(config.trigger.close_on_select);
//! ```

use perch_gesture::SwipeDirection;
use perch_placement::{Align, ResolveOptions, Side};

use crate::{PanelConfig, TriggerConfig};

/// Where the menu sits relative to its trigger.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DropdownPosition {
    /// Above, left edges aligned.
    TopLeft,
    /// Above, right edges aligned.
    TopRight,
    /// Below, left edges aligned.
    #[default]
    BottomLeft,
    /// Below, right edges aligned.
    BottomRight,
    /// To the left, top edges aligned.
    Left,
    /// To the right, top edges aligned.
    Right,
}

impl DropdownPosition {
    /// The preferred side and cross-axis alignment.
    #[must_use]
    pub const fn side_and_align(self) -> (Side, Align) {
        match self {
            Self::TopLeft => (Side::Top, Align::Start),
            Self::TopRight => (Side::Top, Align::End),
            Self::BottomLeft => (Side::Bottom, Align::Start),
            Self::BottomRight => (Side::Bottom, Align::End),
            Self::Left => (Side::Left, Align::Start),
            Self::Right => (Side::Right, Align::Start),
        }
    }
}

/// The dropdown preset at `position`.
#[must_use]
pub fn config(position: DropdownPosition) -> PanelConfig {
    let (side, align) = position.side_and_align();
    PanelConfig::default()
        .with_trigger(TriggerConfig::explicit())
        .with_side(side)
        .with_placement(ResolveOptions::default().with_align(align))
        .with_swipe_close(SwipeDirection::Up, true)
}

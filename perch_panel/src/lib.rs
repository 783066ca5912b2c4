// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Panel: a headless interaction engine for anchored floating panels.
//!
//! Date pickers, dropdown menus, tooltips and popovers share one set of
//! mechanics: they attach to an anchor, open and close on hover, activation or
//! focus (with delays), keep Tab focus inside while open and give it back
//! afterwards, rove over their items with arrow keys, and react to swipes on
//! touch screens. This crate wires those mechanics together without rendering
//! anything.
//!
//! - [`PanelMachine`]: the pure `Closed → Opening → Open → Closing` state
//!   machine. Inputs return [`Effect`]s instead of touching the world.
//! - [`Host`]: what the engine needs from the UI runtime (geometry, a clock,
//!   one-shot timers, global listeners, focus and an event sink).
//! - [`PanelController`]: owns a machine, a focus manager, a roving navigator
//!   and a touch tracker, and applies effects to a host.
//! - [`widgets`]: presets for dropdowns, tooltips and date pickers.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::vec::Vec;
//! use kurbo::{Rect, Size};
//! use perch_panel::{
//!     FocusEntry, FocusHost, Host, Key, Modifiers, PanelController, PanelEvent,
//!     TimerToken, widgets::dropdown,
//! };
//!
//! #[derive(Default)]
//! struct Page {
//!     focused: Option<u32>,
//!     events: Vec<PanelEvent>,
//! }
//!
//! impl FocusHost<u32> for Page {
//!     fn focused(&self) -> Option<u32> { self.focused }
//!     fn focus(&mut self, node: u32) -> bool { self.focused = Some(node); true }
//!     fn can_focus(&self, _: u32) -> bool { true }
//! }
//!
//! impl Host<u32> for Page {
//!     fn anchor_rect(&self) -> Rect { Rect::new(10.0, 10.0, 110.0, 40.0) }
//!     fn panel_size(&self) -> Size { Size::new(200.0, 120.0) }
//!     fn viewport(&self) -> Rect { Rect::new(0.0, 0.0, 800.0, 600.0) }
//!     fn now_ms(&self) -> u64 { 0 }
//!     fn panel_targets(&self) -> Vec<FocusEntry<u32>> {
//!         vec![FocusEntry::new(2, Rect::new(10.0, 50.0, 210.0, 70.0))]
//!     }
//!     fn schedule_timer(&mut self, _: TimerToken, _: u64) {}
//!     fn cancel_timer(&mut self, _: TimerToken) {}
//!     fn attach_listeners(&mut self) {}
//!     fn detach_listeners(&mut self) {}
//!     fn emit(&mut self, event: PanelEvent) { self.events.push(event); }
//! }
//!
//! let page = Page { focused: Some(1), ..Page::default() };
//! let mut menu = PanelController::new(page, dropdown::config(Default::default()));
//!
//! menu.on_activate();
//! assert!(menu.is_open());
//! assert_eq!(menu.host().focused, Some(2));
//!
//! menu.on_key(Key::Escape, Modifiers::empty());
//! assert!(!menu.is_open());
//! // Focus went back to the button that opened the menu.
//! assert_eq!(menu.host().focused, Some(1));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` builds that rely on `libm` for floating-point math.
//! - `tracing`: log state transitions, stale timers and refused input through
//!   `tracing`, in this crate and the Perch crates it builds on.
//! - `serde`: derives `Serialize`/`Deserialize` for the configuration types.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
mod host;
mod machine;
pub mod widgets;

pub use controller::{KeyResponse, PanelConfig, PanelController};
pub use host::{Host, PanelEvent};
pub use machine::{
    CloseReason, Effect, Effects, INTERACTIVE_GRACE_MS, PanelMachine, PanelState, TimerKind,
    TimerToken, Trigger, TriggerConfig, TriggerMode,
};

pub use perch_focus::{FocusEntry, FocusHost};
pub use perch_gesture::{Gesture, GestureConfig, PointerId, SwipeDirection};
pub use perch_placement::{Align, Placement, ResolveOptions, Side};
pub use perch_roving::{Key, Modifiers, Orientation};

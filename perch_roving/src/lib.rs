// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Roving: roving-index keyboard navigation.
//!
//! List and grid panels (menus, option lists, calendar grids) keep a single
//! "active" item that arrow keys move and Enter/Space activate. This crate
//! tracks that index and nothing else: it does not own the items, does not move
//! platform focus, and does not know about panels.
//!
//! - [`Navigator`] holds the active index (`-1` for none), the item count, a
//!   looping flag and an [`Orientation`].
//! - [`Navigator::handle_key`] maps a [`Key`] to an [`Outcome`] the host acts on:
//!   move focus, run the item's action, or let the key propagate.
//! - Escape and Tab are never handled here; they belong to the panel
//!   controller (closing and focus trapping).
//!
//! ```rust
//! use perch_roving::{Key, Navigator, Outcome};
//!
//! let mut nav = Navigator::new(3);
//! assert_eq!(nav.handle_key(Key::ArrowDown), Outcome::Moved { from: -1, to: 0 });
//! assert_eq!(nav.handle_key(Key::End), Outcome::Moved { from: 0, to: 2 });
//! // Looping is on by default, so the next step wraps around.
//! assert_eq!(nav.handle_key(Key::ArrowDown), Outcome::Moved { from: 2, to: 0 });
//! assert_eq!(nav.handle_key(Key::Enter), Outcome::Activate(0));
//! assert_eq!(nav.handle_key(Key::Escape), Outcome::Ignored);
//! ```
//!
//! Call [`Navigator::set_len`] whenever the panel content changes so the index
//! stays in range.
//!
//! ## Features
//!
//! - `tracing`: log index moves at `trace` level.
//! - `serde`: derives `Serialize`/`Deserialize` for [`Key`] and [`Orientation`].
//!
//! This crate is `no_std`.

#![no_std]

mod key;
mod navigator;

pub use key::{Key, Modifiers};
pub use navigator::{Navigator, Orientation, Outcome};

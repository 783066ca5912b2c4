// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Placement: viewport-aware positioning of floating panels.
//!
//! A floating panel (tooltip, dropdown, date picker popup) is attached to one
//! [`Side`] of an anchor rectangle. This crate picks the side so that the panel
//! stays inside the viewport:
//!
//! - The caller supplies the anchor box, the measured panel size, a preferred
//!   side and the viewport box, all in one coordinate space.
//! - [`resolve`] evaluates the fallback chain `[preferred, opposite, the two
//!   perpendicular sides]` and returns the first side whose hypothetical panel
//!   box is fully contained in the viewport.
//! - If no side fits, the preferred side is kept and [`Placement::fits`] is
//!   `false`; the host is expected to clip or scroll the panel.
//!
//! The resolver is a pure function and keeps no state. Hosts call it again
//! whenever the anchor moves, the panel content is re-measured, or the viewport
//! is resized.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use perch_placement::{ResolveOptions, Side, resolve};
//!
//! let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
//! // A button near the top edge: there is no room above it.
//! let anchor = Rect::from_origin_size((10.0, 10.0), (100.0, 30.0));
//! let panel = Size::new(200.0, 120.0);
//!
//! let placement = resolve(anchor, panel, Side::Top, viewport, ResolveOptions::default());
//! assert_eq!(placement.side, Side::Bottom);
//! assert!(placement.fits);
//!
//! // The panel box sits below the anchor, separated by the gap.
//! let rect = placement.panel_rect(anchor, panel);
//! assert_eq!(rect.y0, 40.0 + ResolveOptions::default().gap);
//! ```
//!
//! ## Alignment
//!
//! [`Align`] controls where the panel sits along the anchor's cross axis, so a
//! `bottom-right` dropdown is expressed as `Side::Bottom` plus `Align::End`.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` for the configuration types.
//!
//! This crate is `no_std`.

#![no_std]

mod resolve;
mod side;

pub use resolve::{Placement, ResolveOptions, candidate_rect, resolve};
pub use side::{Align, Side};

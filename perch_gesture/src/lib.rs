// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Gesture: touch-gesture classification for floating panels.
//!
//! Touch-driven panels close on a swipe, page a calendar on a horizontal swipe,
//! or react to taps and long presses. This crate turns a touch-start /
//! touch-end pair into at most one [`Gesture`]:
//!
//! - [`TouchTracker`] follows the first contact, reports whether page scrolling
//!   should be suppressed during moves, and classifies on release.
//! - [`classify`] holds the rules and is usable on its own when the host
//!   already has both endpoints.
//! - [`GestureConfig`] carries the thresholds (swipe distance 50, long press
//!   500 ms, tap slop 10, tap duration 300 ms, double-tap window 300 ms).
//!
//! Timestamps are milliseconds on any monotonic clock the host likes.
//!
//! ```rust
//! use kurbo::Point;
//! use perch_gesture::{Gesture, GestureConfig, SwipeDirection, classify};
//!
//! let gesture = classify(
//!     &GestureConfig::default(),
//!     Point::new(100.0, 100.0),
//!     Point::new(40.0, 105.0),
//!     120,
//! );
//! assert_eq!(
//!     gesture,
//!     Some(Gesture::Swipe { direction: SwipeDirection::Left, distance: 60.0, duration_ms: 120 })
//! );
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` builds that rely on `libm` for floating-point math.
//! - `tracing`: log classifications at `trace` level.
//! - `serde`: derives `Serialize`/`Deserialize` for [`GestureConfig`] and [`SwipeDirection`].
//!
//! This crate is `no_std`.

#![no_std]

mod gesture;
pub mod touch;

pub use gesture::{Gesture, GestureConfig, SwipeDirection, classify};
pub use touch::{Contact, PointerId, TouchTracker};

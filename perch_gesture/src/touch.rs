// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch contact tracking.
//!
//! [`TouchTracker`] follows one touch contact from start to end and hands the
//! pair of endpoints to [`classify`](crate::classify). It is the stateful half
//! of the recognizer; the classification rules live in [`crate::gesture`].
//!
//! ## Usage
//!
//! ```
//! use perch_gesture::{Gesture, SwipeDirection, TouchTracker};
//! use kurbo::Point;
//!
//! let mut tracker = TouchTracker::default();
//!
//! tracker.on_start(None, Point::new(100.0, 100.0), 0);
//! // While a contact is tracked, moves should not scroll the page.
//! assert!(tracker.on_move(None, Point::new(70.0, 102.0)));
//!
//! let gesture = tracker.on_end(None, Point::new(40.0, 105.0), 120);
//! assert!(matches!(
//!     gesture,
//!     Some(Gesture::Swipe { direction: SwipeDirection::Left, .. })
//! ));
//! ```
//!
//! ## Multi-touch
//!
//! Only the first contact is tracked. Starts, moves and ends from any other
//! pointer are ignored until the first contact ends or is canceled:
//!
//! ```
//! # use perch_gesture::{Gesture, TouchTracker};
//! # use core::num::NonZeroU64;
//! # use kurbo::Point;
//! let mut tracker = TouchTracker::default();
//! let first = NonZeroU64::new(1).unwrap();
//! let second = NonZeroU64::new(2).unwrap();
//!
//! assert!(tracker.on_start(Some(first), Point::new(10.0, 10.0), 0));
//! assert!(!tracker.on_start(Some(second), Point::new(50.0, 50.0), 10));
//! assert_eq!(tracker.on_end(Some(second), Point::new(50.0, 50.0), 20), None);
//! assert_eq!(tracker.on_end(Some(first), Point::new(11.0, 10.0), 100), Some(Gesture::Tap));
//! ```

use core::num::NonZeroU64;
use kurbo::Point;

use crate::{Gesture, GestureConfig, classify};

/// Pointer identifier for touch contacts.
pub type PointerId = NonZeroU64;

const DEFAULT_POINTER: PointerId = NonZeroU64::MIN;

/// State for the tracked contact.
#[derive(Clone, Debug)]
pub struct Contact {
    /// Pointer that owns this contact.
    pub pointer: PointerId,
    /// Position at touch-start.
    pub start_position: Point,
    /// Timestamp at touch-start, in milliseconds.
    pub start_time: u64,
    /// Most recent position seen by [`TouchTracker::on_move`].
    pub last_position: Point,
}

/// Follows a single touch contact and classifies it on release.
///
/// Exactly zero or one [`Gesture`] is produced per start/end pair.
#[derive(Clone, Debug, Default)]
pub struct TouchTracker {
    config: GestureConfig,
    contact: Option<Contact>,
    /// End time of the last plain tap, for double-tap pairing.
    last_tap: Option<u64>,
}

impl TouchTracker {
    /// Creates a tracker with custom thresholds.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            contact: None,
            last_tap: None,
        }
    }

    /// The active thresholds.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replaces the thresholds. Takes effect for the next classification.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// Records a touch-start.
    ///
    /// # Arguments
    /// * `pointer_id` - Contact identifier, defaults to 1 if None
    /// * `position` - Touch position
    /// * `timestamp` - Event timestamp in milliseconds
    ///
    /// # Returns
    /// `true` if this contact is now tracked, `false` if another contact was
    /// already being tracked.
    pub fn on_start(
        &mut self,
        pointer_id: Option<PointerId>,
        position: Point,
        timestamp: u64,
    ) -> bool {
        if self.contact.is_some() {
            return false;
        }
        let pointer = pointer_id.unwrap_or(DEFAULT_POINTER);
        self.contact = Some(Contact {
            pointer,
            start_position: position,
            start_time: timestamp,
            last_position: position,
        });
        true
    }

    /// Records a touch-move.
    ///
    /// # Returns
    /// `true` while this pointer's contact is tracked; the host should then
    /// suppress page scrolling for the move.
    pub fn on_move(&mut self, pointer_id: Option<PointerId>, position: Point) -> bool {
        let pointer = pointer_id.unwrap_or(DEFAULT_POINTER);
        match self.contact.as_mut() {
            Some(contact) if contact.pointer == pointer => {
                contact.last_position = position;
                true
            }
            _ => false,
        }
    }

    /// Records a touch-end and classifies the contact.
    ///
    /// # Returns
    /// The recognized gesture, or `None` if the movement matched nothing or the
    /// pointer was not tracked.
    pub fn on_end(
        &mut self,
        pointer_id: Option<PointerId>,
        position: Point,
        timestamp: u64,
    ) -> Option<Gesture> {
        let pointer = pointer_id.unwrap_or(DEFAULT_POINTER);
        if self.contact.as_ref()?.pointer != pointer {
            return None;
        }
        let contact = self.contact.take()?;
        let duration = timestamp.saturating_sub(contact.start_time);
        let gesture = classify(&self.config, contact.start_position, position, duration);

        let gesture = match gesture {
            Some(Gesture::Tap) => Some(self.pair_tap(timestamp)),
            other => {
                self.last_tap = None;
                other
            }
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(?gesture, duration, "touch classified");
        gesture
    }

    /// Drops the tracked contact without classifying it.
    ///
    /// # Returns
    /// `true` if a contact for this pointer was canceled.
    pub fn cancel(&mut self, pointer_id: Option<PointerId>) -> bool {
        let pointer = pointer_id.unwrap_or(DEFAULT_POINTER);
        if self.contact.as_ref().is_some_and(|c| c.pointer == pointer) {
            self.contact = None;
            true
        } else {
            false
        }
    }

    /// Forgets the tracked contact and any pending double-tap pairing.
    pub fn reset(&mut self) {
        self.contact = None;
        self.last_tap = None;
    }

    /// Whether a contact is being tracked.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.contact.is_some()
    }

    /// The tracked contact, if any.
    #[must_use]
    pub fn contact(&self) -> Option<&Contact> {
        self.contact.as_ref()
    }

    fn pair_tap(&mut self, timestamp: u64) -> Gesture {
        let paired = match (self.config.double_tap_ms, self.last_tap) {
            (Some(window), Some(previous)) => timestamp.saturating_sub(previous) < window,
            _ => false,
        };
        if paired {
            self.last_tap = None;
            Gesture::DoubleTap
        } else {
            self.last_tap = Some(timestamp);
            Gesture::Tap
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SwipeDirection;

    fn swipe(
        tracker: &mut TouchTracker,
        from: (f64, f64),
        to: (f64, f64),
        ms: u64,
    ) -> Option<Gesture> {
        tracker.on_start(None, Point::new(from.0, from.1), 1000);
        tracker.on_end(None, Point::new(to.0, to.1), 1000 + ms)
    }

    #[test]
    fn leftward_swipe() {
        let mut tracker = TouchTracker::default();
        let gesture = swipe(&mut tracker, (100.0, 100.0), (40.0, 105.0), 120);
        assert_eq!(
            gesture,
            Some(Gesture::Swipe {
                direction: SwipeDirection::Left,
                distance: 60.0,
                duration_ms: 120,
            })
        );
        assert!(!tracker.is_tracking());
    }

    #[test]
    fn vertical_swipes() {
        let mut tracker = TouchTracker::default();
        assert!(matches!(
            swipe(&mut tracker, (100.0, 200.0), (110.0, 100.0), 200),
            Some(Gesture::Swipe { direction: SwipeDirection::Up, .. })
        ));
        assert!(matches!(
            swipe(&mut tracker, (100.0, 100.0), (110.0, 200.0), 200),
            Some(Gesture::Swipe { direction: SwipeDirection::Down, .. })
        ));
    }

    #[test]
    fn double_tap_pairs_quick_taps() {
        let mut tracker = TouchTracker::default();
        tracker.on_start(None, Point::new(10.0, 10.0), 0);
        assert_eq!(tracker.on_end(None, Point::new(10.0, 10.0), 50), Some(Gesture::Tap));
        tracker.on_start(None, Point::new(12.0, 10.0), 150);
        assert_eq!(tracker.on_end(None, Point::new(12.0, 10.0), 200), Some(Gesture::DoubleTap));
        // The pair is consumed; a third tap starts over.
        tracker.on_start(None, Point::new(12.0, 10.0), 260);
        assert_eq!(tracker.on_end(None, Point::new(12.0, 10.0), 300), Some(Gesture::Tap));
    }

    #[test]
    fn slow_second_tap_is_a_plain_tap() {
        let mut tracker = TouchTracker::default();
        tracker.on_start(None, Point::new(10.0, 10.0), 0);
        assert_eq!(tracker.on_end(None, Point::new(10.0, 10.0), 50), Some(Gesture::Tap));
        tracker.on_start(None, Point::new(10.0, 10.0), 500);
        assert_eq!(tracker.on_end(None, Point::new(10.0, 10.0), 550), Some(Gesture::Tap));
    }

    #[test]
    fn double_tap_can_be_disabled() {
        let mut tracker = TouchTracker::new(GestureConfig::default().with_double_tap(None));
        tracker.on_start(None, Point::new(10.0, 10.0), 0);
        assert_eq!(tracker.on_end(None, Point::new(10.0, 10.0), 50), Some(Gesture::Tap));
        tracker.on_start(None, Point::new(10.0, 10.0), 100);
        assert_eq!(tracker.on_end(None, Point::new(10.0, 10.0), 150), Some(Gesture::Tap));
    }

    #[test]
    fn end_without_start_is_ignored() {
        let mut tracker = TouchTracker::default();
        assert_eq!(tracker.on_end(None, Point::new(10.0, 10.0), 50), None);
        assert!(!tracker.on_move(None, Point::new(10.0, 10.0)));
    }

    #[test]
    fn cancel_drops_the_contact() {
        let mut tracker = TouchTracker::default();
        tracker.on_start(None, Point::new(10.0, 10.0), 0);
        assert!(tracker.cancel(None));
        assert!(!tracker.cancel(None));
        assert_eq!(tracker.on_end(None, Point::new(10.0, 10.0), 50), None);
    }

    #[test]
    fn move_tracks_last_position() {
        let mut tracker = TouchTracker::default();
        tracker.on_start(None, Point::new(10.0, 10.0), 0);
        assert!(tracker.on_move(None, Point::new(30.0, 10.0)));
        let contact = tracker.contact().unwrap();
        assert_eq!(contact.last_position, Point::new(30.0, 10.0));
        assert_eq!(contact.start_position, Point::new(10.0, 10.0));
        // Moves from another pointer do not count.
        let other = NonZeroU64::new(7).unwrap();
        assert!(!tracker.on_move(Some(other), Point::new(90.0, 90.0)));
    }
}

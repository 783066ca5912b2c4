// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture types and classification rules.

use kurbo::Point;

/// Thresholds for gesture classification.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureConfig {
    /// Minimum travel along the dominant axis for a swipe (default: 50).
    pub threshold: f64,
    /// Minimum hold for a long press, in milliseconds (default: 500).
    pub long_press_ms: u64,
    /// Maximum travel on either axis for taps and long presses (default: 10).
    pub tap_slop: f64,
    /// Maximum duration of a tap, in milliseconds (default: 300).
    pub tap_max_ms: u64,
    /// Window after a tap in which a second tap becomes a double tap, in
    /// milliseconds (default: 300). `None` disables double taps.
    pub double_tap_ms: Option<u64>,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            threshold: 50.0,
            long_press_ms: 500,
            tap_slop: 10.0,
            tap_max_ms: 300,
            double_tap_ms: Some(300),
        }
    }
}

impl GestureConfig {
    /// Returns this config with a different swipe threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Returns this config with a different long-press delay.
    #[must_use]
    pub fn with_long_press(mut self, long_press_ms: u64) -> Self {
        self.long_press_ms = long_press_ms;
        self
    }

    /// Returns this config with a different double-tap window.
    #[must_use]
    pub fn with_double_tap(mut self, double_tap_ms: Option<u64>) -> Self {
        self.double_tap_ms = double_tap_ms;
        self
    }
}

/// Direction content was swiped toward.
///
/// A finger moving right-to-left swipes content toward [`SwipeDirection::Left`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwipeDirection {
    /// Finger moved right to left.
    Left,
    /// Finger moved left to right.
    Right,
    /// Finger moved bottom to top.
    Up,
    /// Finger moved top to bottom.
    Down,
}

/// A recognized touch gesture.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Gesture {
    /// A fast directional stroke.
    Swipe {
        /// Direction of travel.
        direction: SwipeDirection,
        /// Travel along the dominant axis.
        distance: f64,
        /// Time between touch-start and touch-end.
        duration_ms: u64,
    },
    /// A short touch that barely moved.
    Tap,
    /// A tap that closely followed another tap.
    DoubleTap,
    /// A long touch that barely moved.
    LongPress,
}

/// Classifies one touch from `start` to `end` lasting `duration_ms`.
///
/// With `dx`, `dy` taken as start minus end:
///
/// 1. Both deltas under `tap_slop` and duration under `tap_max_ms`: [`Gesture::Tap`].
/// 2. Both deltas under `tap_slop` and duration over `long_press_ms`: [`Gesture::LongPress`].
/// 3. `|dx| > |dy|` and `|dx| > threshold`: horizontal swipe, left when `dx > 0`.
/// 4. `|dy| > threshold`: vertical swipe, up when `dy > 0`.
/// 5. Anything else: no gesture.
///
/// Double taps are paired by [`TouchTracker`](crate::TouchTracker), which
/// remembers the previous tap.
#[must_use]
pub fn classify(
    config: &GestureConfig,
    start: Point,
    end: Point,
    duration_ms: u64,
) -> Option<Gesture> {
    let dx = start.x - end.x;
    let dy = start.y - end.y;
    let (adx, ady) = (dx.abs(), dy.abs());
    let stationary = adx.max(ady) < config.tap_slop;

    if stationary && duration_ms < config.tap_max_ms {
        return Some(Gesture::Tap);
    }
    if stationary && duration_ms > config.long_press_ms {
        return Some(Gesture::LongPress);
    }

    let (direction, distance) = if adx > ady && adx > config.threshold {
        let direction = if dx > 0.0 {
            SwipeDirection::Left
        } else {
            SwipeDirection::Right
        };
        (direction, adx)
    } else if ady > config.threshold {
        let direction = if dy > 0.0 {
            SwipeDirection::Up
        } else {
            SwipeDirection::Down
        };
        (direction, ady)
    } else {
        return None;
    };

    Some(Gesture::Swipe {
        direction,
        distance,
        duration_ms,
    })
}

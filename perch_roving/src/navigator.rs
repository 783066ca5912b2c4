// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The roving-index navigator.

use crate::Key;

/// Which arrow keys a [`Navigator`] honors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Up/Down only.
    Vertical,
    /// Left/Right only.
    Horizontal,
    /// All four arrows; Up/Left step back, Down/Right step forward.
    Both,
    /// Row-major grid: Left/Right step by one item, Up/Down by a whole row.
    Grid {
        /// Items per row. Zero is treated as one.
        columns: usize,
    },
}

/// What a key press did to the navigator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The active index changed; the host should move focus to `to`.
    Moved {
        /// Previous index, `-1` if nothing was active.
        from: isize,
        /// New active index.
        to: usize,
    },
    /// The key was consumed but the index stayed put (edge without looping).
    Unchanged,
    /// The item at this index should run its action.
    Activate(usize),
    /// The key is not handled here and should propagate (for example Escape
    /// or Tab, which belong to the panel controller).
    Ignored,
}

impl Outcome {
    /// Whether the key was consumed and the host should suppress its default action.
    #[must_use]
    pub const fn is_handled(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Roving-index navigation over an ordered list of `len` targets.
///
/// The active index is always in `[-1, len - 1]`, where `-1` means no item
/// is active yet. An empty list turns every movement key into a no-op.
#[derive(Clone, Debug)]
pub struct Navigator {
    index: isize,
    len: usize,
    looping: bool,
    orientation: Orientation,
    disabled: bool,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Navigator {
    /// Creates a vertical, looping navigator over `len` targets with nothing active.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self {
            index: -1,
            len,
            looping: true,
            orientation: Orientation::Vertical,
            disabled: false,
        }
    }

    /// Sets whether movement wraps around at the ends.
    #[must_use]
    pub const fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Sets which arrow keys are honored.
    #[must_use]
    pub const fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// The active index, `-1` when nothing is active.
    #[must_use]
    pub const fn index(&self) -> isize {
        self.index
    }

    /// The active index, if any.
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        usize::try_from(self.index).ok()
    }

    /// Number of targets.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no targets.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The configured orientation.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Whether all keys are currently ignored.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enables or disables key handling.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Updates the number of targets after the panel content changed.
    ///
    /// The active index is clamped so it stays in `[-1, len - 1]`.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.index = match len {
            0 => -1,
            _ => self.index.min(last_index(len)),
        };
    }

    /// Makes `index` active, for example when the pointer hovers an item or
    /// focus lands on it by other means. Out-of-range indices are ignored.
    pub fn set_active(&mut self, index: usize) -> bool {
        if index < self.len {
            self.index = as_isize(index);
            true
        } else {
            false
        }
    }

    /// Forgets the active index.
    pub fn reset(&mut self) {
        self.index = -1;
    }

    /// Handles a key press.
    ///
    /// Escape, Tab and unrelated keys return [`Outcome::Ignored`], as do arrow
    /// keys excluded by the orientation.
    pub fn handle_key(&mut self, key: Key) -> Outcome {
        if self.disabled {
            return Outcome::Ignored;
        }

        if key.is_activation() {
            return match self.active() {
                Some(index) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(index, "roving activate");
                    Outcome::Activate(index)
                }
                None => Outcome::Ignored,
            };
        }

        let Some(step) = self.step_for(key) else {
            return Outcome::Ignored;
        };
        if self.len == 0 {
            return Outcome::Unchanged;
        }

        let target = match step {
            Step::First => 0,
            Step::Last => last_index(self.len),
            Step::By(delta) => self.offset(delta),
        };
        self.move_to(target)
    }

    fn step_for(&self, key: Key) -> Option<Step> {
        match key {
            Key::Home => return Some(Step::First),
            Key::End => return Some(Step::Last),
            _ if !key.is_arrow() => return None,
            _ => {}
        }

        let unit = if matches!(key, Key::ArrowDown | Key::ArrowRight) {
            1
        } else {
            -1
        };
        if matches!(key, Key::ArrowLeft | Key::ArrowRight) {
            let horizontal = matches!(
                self.orientation,
                Orientation::Horizontal | Orientation::Both | Orientation::Grid { .. }
            );
            return horizontal.then_some(Step::By(unit));
        }
        match self.orientation {
            Orientation::Vertical | Orientation::Both => Some(Step::By(unit)),
            Orientation::Grid { columns } => Some(Step::By(unit * as_isize(columns.max(1)))),
            Orientation::Horizontal => None,
        }
    }

    fn offset(&self, delta: isize) -> isize {
        let len = as_isize(self.len);
        let last = len - 1;

        // Nothing active yet: forward keys enter at the start, backward keys
        // at the end when looping.
        if self.index < 0 {
            return if delta < 0 && self.looping { last } else { 0 };
        }

        let next = self.index + delta;
        if (0..len).contains(&next) {
            next
        } else if self.looping {
            next.rem_euclid(len)
        } else if delta.abs() > 1 {
            // Row steps that fall off the grid stay in place rather than
            // jumping to another column.
            self.index
        } else {
            next.clamp(0, last)
        }
    }

    fn move_to(&mut self, target: isize) -> Outcome {
        if target == self.index {
            return Outcome::Unchanged;
        }
        let from = self.index;
        self.index = target;
        #[cfg(feature = "tracing")]
        tracing::trace!(from, to = target, "roving move");
        Outcome::Moved {
            from,
            to: target.unsigned_abs(),
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum Step {
    First,
    Last,
    By(isize),
}

fn last_index(len: usize) -> isize {
    as_isize(len) - 1
}

fn as_isize(value: usize) -> isize {
    isize::try_from(value).unwrap_or(isize::MAX)
}

// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Six-week day grids and date constraints.

use alloc::boxed::Box;
use core::fmt;

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::YearMonth;

/// Days per grid row.
pub const WEEK_LEN: usize = 7;

/// Cells in every generated grid: six full weeks.
pub const GRID_CELLS: usize = 6 * WEEK_LEN;

/// Which dates may be selected.
///
/// The bounds are inclusive. Setters refuse to produce `min > max`; the
/// refused bound is simply not applied.
#[derive(Default)]
pub struct DateConstraint {
    min: Option<NaiveDate>,
    max: Option<NaiveDate>,
    disabled: Option<Box<dyn Fn(NaiveDate) -> bool>>,
}

impl fmt::Debug for DateConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateConstraint")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("disabled", &self.disabled.as_ref().map(|_| "<predicate>"))
            .finish()
    }
}

impl DateConstraint {
    /// A constraint that allows every date.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this constraint with a lower bound, unless it would exceed the upper bound.
    #[must_use]
    pub fn with_min(mut self, min: NaiveDate) -> Self {
        self.set_min(Some(min));
        self
    }

    /// Returns this constraint with an upper bound, unless it would precede the lower bound.
    #[must_use]
    pub fn with_max(mut self, max: NaiveDate) -> Self {
        self.set_max(Some(max));
        self
    }

    /// Returns this constraint with a predicate marking extra dates disabled.
    #[must_use]
    pub fn with_disabled(mut self, predicate: impl Fn(NaiveDate) -> bool + 'static) -> Self {
        self.disabled = Some(Box::new(predicate));
        self
    }

    /// Sets or clears the lower bound. Returns `false` if refused.
    pub fn set_min(&mut self, min: Option<NaiveDate>) -> bool {
        if let (Some(min), Some(max)) = (min, self.max)
            && min > max
        {
            #[cfg(feature = "tracing")]
            tracing::debug!(%min, %max, "refusing min date after max date");
            return false;
        }
        self.min = min;
        true
    }

    /// Sets or clears the upper bound. Returns `false` if refused.
    pub fn set_max(&mut self, max: Option<NaiveDate>) -> bool {
        if let (Some(min), Some(max)) = (self.min, max)
            && min > max
        {
            #[cfg(feature = "tracing")]
            tracing::debug!(%min, %max, "refusing max date before min date");
            return false;
        }
        self.max = max;
        true
    }

    /// The inclusive lower bound.
    #[must_use]
    pub fn min(&self) -> Option<NaiveDate> {
        self.min
    }

    /// The inclusive upper bound.
    #[must_use]
    pub fn max(&self) -> Option<NaiveDate> {
        self.max
    }

    /// Whether `date` lies within the bounds, ignoring the predicate.
    #[must_use]
    pub fn in_range(&self, date: NaiveDate) -> bool {
        self.min.is_none_or(|min| date >= min) && self.max.is_none_or(|max| date <= max)
    }

    /// Whether `date` may not be selected.
    #[must_use]
    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        !self.in_range(date) || self.disabled.as_ref().is_some_and(|p| p(date))
    }
}

/// One day in a [`Grid`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DateCell {
    /// The calendar day.
    pub date: NaiveDate,
    /// Whether the day belongs to the viewed month.
    pub in_current_month: bool,
    /// Whether the day is the host's "today".
    pub is_today: bool,
    /// Whether the day is a Saturday or Sunday.
    pub is_weekend: bool,
    /// Whether the constraint forbids selecting the day.
    pub is_disabled: bool,
    /// Whether the day is the selected day.
    pub is_selected: bool,
}

/// A six-week, Sunday-first grid of days around a viewed month.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    view: YearMonth,
    cells: [DateCell; GRID_CELLS],
}

impl Grid {
    /// The month the grid was generated for.
    #[must_use]
    pub fn view(&self) -> YearMonth {
        self.view
    }

    /// All 42 cells, row-major.
    #[must_use]
    pub fn cells(&self) -> &[DateCell; GRID_CELLS] {
        &self.cells
    }

    /// The grid as six rows of seven days.
    pub fn weeks(&self) -> impl Iterator<Item = &[DateCell]> {
        self.cells.chunks(WEEK_LEN)
    }

    /// The first (top-left) day, always a Sunday.
    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.cells[0].date
    }

    /// Index of the cell showing `date`, if the grid contains it.
    #[must_use]
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        let offset = date.signed_duration_since(self.start()).num_days();
        usize::try_from(offset).ok().filter(|&i| i < GRID_CELLS)
    }

    /// The cell at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DateCell> {
        self.cells.get(index)
    }

    /// Index of the selected cell, if it is visible.
    #[must_use]
    pub fn selected_position(&self) -> Option<usize> {
        self.cells.iter().position(|c| c.is_selected)
    }
}

/// Builds the day grid for `view`.
///
/// The grid starts on the Sunday on or before the 1st of the month and holds
/// 42 consecutive days. Flags are computed per cell: `in_current_month`
/// against `view`, `is_today` against the caller's `today`, `is_weekend` for
/// Saturday and Sunday, `is_disabled` from `constraint`, and `is_selected` by
/// calendar-day equality with `selected`.
#[must_use]
pub fn generate_grid(
    view: YearMonth,
    constraint: &DateConstraint,
    selected: Option<NaiveDate>,
    today: NaiveDate,
) -> Grid {
    let first = view.first_day();
    let lead = u64::from(first.weekday().num_days_from_sunday());
    let start = first
        .checked_sub_days(Days::new(lead))
        .expect("grid start stays within chrono's range");

    let cells = core::array::from_fn(|i| {
        let date = start
            .checked_add_days(Days::new(i as u64))
            .expect("grid end stays within chrono's range");
        DateCell {
            date,
            in_current_month: view.contains(date),
            is_today: date == today,
            is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
            is_disabled: constraint.is_disabled(date),
            is_selected: selected == Some(date),
        }
    });

    Grid { view, cells }
}

// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The date picker model: view cursor, selection and held time.

use alloc::format;
use alloc::string::String;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::{DateConstraint, Grid, Meridiem, TimeFormat, TimeValue, YearMonth, generate_grid};

/// State behind a date picker panel.
///
/// The view cursor and the selection move independently: paging the view
/// never changes the selection, and selecting a day never pages the view.
///
/// Mutators that change the picked instant return the new merged value so the
/// caller can forward it as a change notification. With time selection off,
/// the merged value is the selected day at midnight.
#[derive(Debug)]
pub struct DatePicker {
    view: YearMonth,
    selected: Option<NaiveDate>,
    time: TimeValue,
    show_time: bool,
    time_format: TimeFormat,
    constraint: DateConstraint,
}

impl DatePicker {
    /// Creates an empty picker viewing the month of `today`.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            view: YearMonth::of(today),
            selected: None,
            time: TimeValue::MIDNIGHT,
            show_time: false,
            time_format: TimeFormat::default(),
            constraint: DateConstraint::new(),
        }
    }

    /// Returns this picker holding `value` and viewing its month.
    ///
    /// The initial value is taken as given, even if the constraint would
    /// refuse it as a selection.
    #[must_use]
    pub fn with_value(mut self, value: NaiveDateTime) -> Self {
        self.selected = Some(value.date());
        self.time = value.time().into();
        self.view = YearMonth::of(value.date());
        self
    }

    /// Returns this picker with the time sub-selector on or off.
    #[must_use]
    pub fn with_time_selection(mut self, show_time: bool) -> Self {
        self.show_time = show_time;
        self
    }

    /// Returns this picker with a 12- or 24-hour time display.
    #[must_use]
    pub fn with_time_format(mut self, format: TimeFormat) -> Self {
        self.time_format = format;
        self
    }

    /// Returns this picker with a selection constraint.
    #[must_use]
    pub fn with_constraint(mut self, constraint: DateConstraint) -> Self {
        self.constraint = constraint;
        self
    }

    /// The viewed month.
    #[must_use]
    pub fn view(&self) -> YearMonth {
        self.view
    }

    /// The selected day.
    #[must_use]
    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    /// The held time of day.
    #[must_use]
    pub fn time(&self) -> TimeValue {
        self.time
    }

    /// Whether the time sub-selector is shown.
    #[must_use]
    pub fn shows_time(&self) -> bool {
        self.show_time
    }

    /// The time display format.
    #[must_use]
    pub fn time_format(&self) -> TimeFormat {
        self.time_format
    }

    /// The selection constraint.
    #[must_use]
    pub fn constraint(&self) -> &DateConstraint {
        &self.constraint
    }

    /// Mutable access to the selection constraint.
    ///
    /// Tightening the constraint does not clear an existing selection.
    pub fn constraint_mut(&mut self) -> &mut DateConstraint {
        &mut self.constraint
    }

    /// The selected day merged with the held time.
    #[must_use]
    pub fn value(&self) -> Option<NaiveDateTime> {
        let time = if self.show_time {
            NaiveTime::from(self.time)
        } else {
            NaiveTime::MIN
        };
        self.selected.map(|date| date.and_time(time))
    }

    /// Selects `date`.
    ///
    /// Disabled dates, including those outside the bounds, are refused and
    /// leave the selection untouched.
    pub fn select(&mut self, date: NaiveDate) -> Option<NaiveDateTime> {
        if self.constraint.is_disabled(date) {
            #[cfg(feature = "tracing")]
            tracing::debug!(%date, "refusing disabled date");
            return None;
        }
        self.selected = Some(date);
        self.value()
    }

    /// Selects `today` and moves the view to its month.
    ///
    /// The view moves even when `today` itself is disabled.
    pub fn select_today(&mut self, today: NaiveDate) -> Option<NaiveDateTime> {
        self.view = YearMonth::of(today);
        self.select(today)
    }

    /// Replaces the held time.
    ///
    /// Returns the re-merged value when a day is selected.
    pub fn set_time(&mut self, time: TimeValue) -> Option<NaiveDateTime> {
        self.time = time;
        self.value()
    }

    /// Flips the held time to the given half of the day.
    pub fn set_meridiem(&mut self, meridiem: Meridiem) -> Option<NaiveDateTime> {
        self.set_time(self.time.with_meridiem(meridiem))
    }

    /// Drops the selection.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Moves the view by `delta` months. Returns `false` at the calendar's edges.
    pub fn shift_month(&mut self, delta: i32) -> bool {
        self.shift_view(self.view.shifted_months(delta))
    }

    /// Moves the view by `delta` years. Returns `false` at the calendar's edges.
    pub fn shift_year(&mut self, delta: i32) -> bool {
        self.shift_view(self.view.shifted_years(delta))
    }

    /// Points the view at `view`.
    pub fn set_view(&mut self, view: YearMonth) {
        self.view = view;
    }

    fn shift_view(&mut self, view: Option<YearMonth>) -> bool {
        match view {
            Some(view) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(year = view.year(), month = view.month(), "calendar view moved");
                self.view = view;
                true
            }
            None => false,
        }
    }

    /// The day grid for the current view.
    #[must_use]
    pub fn grid(&self, today: NaiveDate) -> Grid {
        generate_grid(self.view, &self.constraint, self.selected, today)
    }

    /// The selection rendered for an input field.
    ///
    /// `MM/DD/YYYY`, followed by the time when the sub-selector is shown.
    /// Empty when nothing is selected.
    #[must_use]
    pub fn display_value(&self) -> String {
        let Some(date) = self.selected else {
            return String::new();
        };
        let day = format!("{:02}/{:02}/{:04}", date.month(), date.day(), date.year());
        if self.show_time {
            format!("{day} {}", self.time.format(self.time_format))
        } else {
            day
        }
    }
}

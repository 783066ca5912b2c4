// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The viewed year and month.

use alloc::format;
use alloc::string::String;

use chrono::{Datelike, Months, NaiveDate};

/// Years a [`YearMonth`] may point at.
pub const YEAR_RANGE: core::ops::RangeInclusive<i32> = 1..=9999;

/// Reasons a [`YearMonth`] cannot be built.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum YearMonthError {
    /// The month is not in `1..=12`.
    #[error("month {0} is not in 1..=12")]
    Month(u32),
    /// The year is outside [`YEAR_RANGE`].
    #[error("year {0} is outside 1..=9999")]
    Year(i32),
}

/// A Gregorian year and month, used as the calendar's view cursor.
///
/// Always within [`YEAR_RANGE`], so every date a six-week grid around it can
/// touch is representable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    /// Builds a year/month, validating both parts.
    pub fn new(year: i32, month: u32) -> Result<Self, YearMonthError> {
        if !(1..=12).contains(&month) {
            return Err(YearMonthError::Month(month));
        }
        if !YEAR_RANGE.contains(&year) {
            return Err(YearMonthError::Year(year));
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or(YearMonthError::Year(year))
    }

    /// The month containing `date`, clamped into [`YEAR_RANGE`].
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        let year = date.year().clamp(*YEAR_RANGE.start(), *YEAR_RANGE.end());
        let month = match year.cmp(&date.year()) {
            core::cmp::Ordering::Equal => date.month(),
            core::cmp::Ordering::Less => 12,
            core::cmp::Ordering::Greater => 1,
        };
        Self::new(year, month).expect("clamped year and calendar month are valid")
    }

    /// The year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.first.year()
    }

    /// The month, `1..=12`.
    #[must_use]
    pub fn month(self) -> u32 {
        self.first.month()
    }

    /// The 1st of this month.
    #[must_use]
    pub fn first_day(self) -> NaiveDate {
        self.first
    }

    /// Number of days in this month.
    #[must_use]
    pub fn days(self) -> u32 {
        let next = self.first + Months::new(1);
        u32::try_from(next.signed_duration_since(self.first).num_days())
            .expect("a month has between 28 and 31 days")
    }

    /// Whether `date` falls in this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Moves the cursor by `delta` months.
    ///
    /// Returns `None` when the result would leave [`YEAR_RANGE`].
    #[must_use]
    pub fn shifted_months(self, delta: i32) -> Option<Self> {
        let months = Months::new(delta.unsigned_abs());
        let first = if delta >= 0 {
            self.first.checked_add_months(months)?
        } else {
            self.first.checked_sub_months(months)?
        };
        YEAR_RANGE.contains(&first.year()).then_some(Self { first })
    }

    /// Moves the cursor by `delta` years, keeping the month.
    ///
    /// Returns `None` when the result would leave [`YEAR_RANGE`].
    #[must_use]
    pub fn shifted_years(self, delta: i32) -> Option<Self> {
        let year = self.year().checked_add(delta)?;
        Self::new(year, self.month()).ok()
    }

    /// English month name and year, for example `"March 2025"`.
    #[must_use]
    pub fn label(self) -> String {
        format!("{} {}", self.first.format("%B"), self.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn rejects_bad_parts() {
        assert_eq!(YearMonth::new(2025, 0), Err(YearMonthError::Month(0)));
        assert_eq!(YearMonth::new(2025, 13), Err(YearMonthError::Month(13)));
        assert_eq!(YearMonth::new(0, 1), Err(YearMonthError::Year(0)));
        assert_eq!(YearMonth::new(10_000, 1), Err(YearMonthError::Year(10_000)));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(ym(2024, 2).days(), 29);
        assert_eq!(ym(2025, 2).days(), 28);
        assert_eq!(ym(1900, 2).days(), 28);
        assert_eq!(ym(2000, 2).days(), 29);
        assert_eq!(ym(2025, 12).days(), 31);
        assert_eq!(ym(2025, 4).days(), 30);
    }

    #[test]
    fn shifting_crosses_year_boundaries() {
        assert_eq!(ym(2025, 12).shifted_months(1), Some(ym(2026, 1)));
        assert_eq!(ym(2025, 1).shifted_months(-1), Some(ym(2024, 12)));
        assert_eq!(ym(2025, 3).shifted_months(-15), Some(ym(2023, 12)));
        assert_eq!(ym(2024, 2).shifted_years(1), Some(ym(2025, 2)));
    }

    #[test]
    fn shifting_stops_at_range_edges() {
        assert_eq!(ym(9999, 12).shifted_months(1), None);
        assert_eq!(ym(1, 1).shifted_months(-1), None);
        assert_eq!(ym(1, 6).shifted_years(-1), None);
    }

    #[test]
    fn of_clamps_out_of_range_dates() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(YearMonth::of(date), ym(2025, 3));
        let ancient = NaiveDate::from_ymd_opt(-5, 6, 1).unwrap();
        assert_eq!(YearMonth::of(ancient), ym(1, 1));
    }

    #[test]
    fn label_names_the_month() {
        assert_eq!(ym(2025, 3).label(), "March 2025");
    }
}

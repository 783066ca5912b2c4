// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Calendar: month grids and date/time selection for date pickers.
//!
//! A date picker panel shows one month at a time as six rows of seven days,
//! Sunday first, padded with the tail of the previous month and the head of
//! the next. This crate computes that grid and the selection state behind it:
//!
//! - [`YearMonth`]: the validated view cursor, with month and year paging.
//! - [`generate_grid`]: the 42 [`DateCell`]s for a view, each flagged as in
//!   the current month, today, weekend, disabled or selected.
//! - [`DateConstraint`]: inclusive `min`/`max` bounds plus an optional
//!   predicate for extra disabled days.
//! - [`TimeValue`]: a 24-hour time of day with 12-hour rendering, parsing and
//!   a meridiem toggle.
//! - [`DatePicker`]: view, selection and held time together, producing merged
//!   `NaiveDateTime` values for change notifications.
//!
//! "Today" is always supplied by the caller; nothing here reads a clock.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use perch_calendar::{DatePicker, TimeValue};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
//! let mut picker = DatePicker::new(today).with_time_selection(true);
//!
//! picker.select(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
//! let changed = picker.set_time(TimeValue::new(14, 30).unwrap()).unwrap();
//! assert_eq!(changed.to_string(), "2025-03-10 14:30:00");
//! assert_eq!(picker.display_value(), "03/10/2025 02:30 PM");
//!
//! let grid = picker.grid(today);
//! assert_eq!(grid.cells().len(), 42);
//! assert_eq!(grid.start(), NaiveDate::from_ymd_opt(2025, 2, 23).unwrap());
//! ```
//!
//! ## Features
//!
//! - `tracing`: log refused selections and constraint changes at `debug`
//!   level, view moves at `trace` level.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod grid;
mod month;
mod picker;
mod time;

pub use grid::{DateCell, DateConstraint, GRID_CELLS, Grid, WEEK_LEN, generate_grid};
pub use month::{YEAR_RANGE, YearMonth, YearMonthError};
pub use picker::DatePicker;
pub use time::{Meridiem, TimeError, TimeFormat, TimeValue};

// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-of-day values for the time sub-selector.

use alloc::string::{String, ToString};

use chrono::format::{ParseErrorKind, Parsed, StrftimeItems};
use chrono::{NaiveTime, Timelike};

/// How a [`TimeValue`] is rendered and parsed. Storage is always 24-hour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimeFormat {
    /// `hh:mm AM` / `hh:mm PM`.
    #[default]
    H12,
    /// `HH:MM`.
    H24,
}

impl TimeFormat {
    /// The `strftime` pattern used to render and parse this format.
    #[must_use]
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::H12 => "%I:%M %p",
            Self::H24 => "%H:%M",
        }
    }
}

/// Half of the day in 12-hour mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Meridiem {
    /// Hours 0 through 11.
    Am,
    /// Hours 12 through 23.
    Pm,
}

impl Meridiem {
    /// `"AM"` or `"PM"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

/// Reasons a [`TimeValue`] cannot be built or parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TimeError {
    /// The hour is out of range for the format.
    #[error("hour {0} is out of range")]
    Hour(u32),
    /// The minute is not in `0..=59`.
    #[error("minute {0} is not in 0..=59")]
    Minute(u32),
    /// A parsed field is out of range for the format.
    #[error("time field is out of range")]
    OutOfRange,
    /// The text is not shaped like a time.
    #[error("expected a time like `hh:mm`")]
    Malformed,
    /// A 12-hour time lacks its `AM`/`PM` suffix.
    #[error("12-hour time needs an AM or PM suffix")]
    MissingMeridiem,
}

/// A time of day with minute precision.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeValue {
    hours: u8,
    minutes: u8,
}

impl TimeValue {
    /// Midnight.
    pub const MIDNIGHT: Self = Self {
        hours: 0,
        minutes: 0,
    };

    /// Builds a 24-hour time.
    pub fn new(hours: u32, minutes: u32) -> Result<Self, TimeError> {
        let h = u8::try_from(hours)
            .ok()
            .filter(|h| *h < 24)
            .ok_or(TimeError::Hour(hours))?;
        let m = u8::try_from(minutes)
            .ok()
            .filter(|m| *m < 60)
            .ok_or(TimeError::Minute(minutes))?;
        Ok(Self {
            hours: h,
            minutes: m,
        })
    }

    /// Hours, `0..=23`.
    #[must_use]
    pub const fn hours(self) -> u32 {
        self.hours as u32
    }

    /// Minutes, `0..=59`.
    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.minutes as u32
    }

    /// Hour on a 12-hour clock, `1..=12`.
    #[must_use]
    pub const fn hour12(self) -> u32 {
        match self.hours % 12 {
            0 => 12,
            h => h as u32,
        }
    }

    /// Which half of the day this time falls in.
    #[must_use]
    pub const fn meridiem(self) -> Meridiem {
        if self.hours < 12 {
            Meridiem::Am
        } else {
            Meridiem::Pm
        }
    }

    /// Flips to the given half of the day, keeping the clock face.
    ///
    /// PM adds 12 to morning hours; AM subtracts 12 from afternoon hours.
    #[must_use]
    pub const fn with_meridiem(self, meridiem: Meridiem) -> Self {
        let hours = match meridiem {
            Meridiem::Pm if self.hours < 12 => self.hours + 12,
            Meridiem::Am if self.hours >= 12 => self.hours - 12,
            _ => self.hours,
        };
        Self {
            hours,
            minutes: self.minutes,
        }
    }

    /// Renders the time, `"02:30 PM"` or `"14:30"`.
    #[must_use]
    pub fn format(self, format: TimeFormat) -> String {
        NaiveTime::from(self).format(format.pattern()).to_string()
    }

    /// Parses `"hh:mm AM"`/`"hh:mm PM"` (case-insensitive) or `"HH:MM"`.
    pub fn parse(text: &str, format: TimeFormat) -> Result<Self, TimeError> {
        let text = text.trim();
        match NaiveTime::parse_from_str(text, format.pattern()) {
            Ok(time) => Ok(time.into()),
            Err(_) if format == TimeFormat::H12 && is_bare_clock(text) => {
                Err(TimeError::MissingMeridiem)
            }
            Err(err) if err.kind() == ParseErrorKind::OutOfRange => Err(TimeError::OutOfRange),
            Err(_) => Err(TimeError::Malformed),
        }
    }
}

/// Whether `text` is a complete 12-hour clock face without a meridiem.
fn is_bare_clock(text: &str) -> bool {
    let mut parsed = Parsed::new();
    chrono::format::parse(&mut parsed, text, StrftimeItems::new("%I:%M")).is_ok()
}

impl From<NaiveTime> for TimeValue {
    fn from(time: NaiveTime) -> Self {
        Self::new(time.hour(), time.minute()).unwrap_or(Self::MIDNIGHT)
    }
}

impl From<TimeValue> for NaiveTime {
    fn from(time: TimeValue) -> Self {
        Self::from_hms_opt(time.hours(), time.minutes(), 0).unwrap_or(Self::MIN)
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar day type used as the key of every cache structure
//!
//! A [`CalendarDay`] is a local wall-clock day with no timezone attached. Its
//! canonical textual form is the fixed-width ISO 8601 date `YYYY-MM-DD`, so the
//! ordering of typed values matches the lexicographic ordering of their strings.
//! Days are limited to years 0001 through 9999 so that form always applies.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::errors::DateError;

/// Canonical format of a calendar day
pub(crate) const ISO_DAY_FORMAT: &str = "%Y-%m-%d";

/// A timezone-naive calendar day
///
/// # Examples
///
/// ```
/// use slotscan::CalendarDay;
///
/// let day = CalendarDay::parse("2024-02-28").unwrap();
/// assert_eq!(day.succ().unwrap().to_string(), "2024-02-29");
/// assert_eq!(day.pred().unwrap().to_string(), "2024-02-27");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDay(NaiveDate);

impl CalendarDay {
    /// Earliest representable day, 0001-01-01
    pub const MIN: Self = match NaiveDate::from_ymd_opt(1, 1, 1) {
        Some(date) => Self(date),
        None => panic!("0001-01-01 is a valid date"),
    };

    /// Latest representable day, 9999-12-31
    pub const MAX: Self = match NaiveDate::from_ymd_opt(9999, 12, 31) {
        Some(date) => Self(date),
        None => panic!("9999-12-31 is a valid date"),
    };

    /// Wraps a chrono date, clamping it into [`MIN`](Self::MIN)..=[`MAX`](Self::MAX)
    pub fn new(date: NaiveDate) -> Self {
        Self(date.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// Builds a day from its components
    ///
    /// Returns `None` for impossible dates and for years outside 1..=9999.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).and_then(Self::checked)
    }

    /// Today, in the local timezone of the process
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    fn checked(date: NaiveDate) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0).contains(&date).then_some(Self(date))
    }

    /// Parses a strict `YYYY-MM-DD` string
    ///
    /// Only the zero-padded, fixed-width form is accepted. Anything else
    /// (including `2024-3-1` or trailing time components) is rejected.
    pub fn parse(input: &str) -> Result<Self, DateError> {
        let trimmed = input.trim();
        if !is_iso_day_shaped(trimmed) {
            return Err(DateError::malformed(input));
        }
        NaiveDate::parse_from_str(trimmed, ISO_DAY_FORMAT)
            .ok()
            .and_then(Self::checked)
            .ok_or_else(|| DateError::malformed(input))
    }

    /// Parses a day, falling back to today when the input is malformed
    ///
    /// Meant for restoring previously persisted UI state where a crash is worse
    /// than a wrong default. The fallback is logged at `warn` level. Code that
    /// needs correct interval math should use [`CalendarDay::parse`].
    pub fn parse_or_today(input: &str) -> Self {
        match Self::parse(input) {
            Ok(day) => day,
            Err(e) => {
                warn!(input, error = %e, "Malformed calendar day, falling back to today");
                Self::today()
            }
        }
    }

    /// The following day, or `None` past [`CalendarDay::MAX`]
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().and_then(Self::checked)
    }

    /// The preceding day, or `None` before [`CalendarDay::MIN`]
    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().and_then(Self::checked)
    }

    /// Adds `days`, saturating at [`CalendarDay::MAX`]
    pub fn saturating_add_days(&self, days: u32) -> Self {
        self.0
            .checked_add_days(chrono::Days::new(u64::from(days)))
            .map_or(Self::MAX, Self::new)
    }

    /// Subtracts `days`, saturating at [`CalendarDay::MIN`]
    pub fn saturating_sub_days(&self, days: u32) -> Self {
        self.0
            .checked_sub_days(chrono::Days::new(u64::from(days)))
            .map_or(Self::MIN, Self::new)
    }

    /// Number of days from `self` to `other` (negative when `other` is earlier)
    pub fn days_until(&self, other: CalendarDay) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }

    /// The underlying chrono date
    pub const fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

fn is_iso_day_shaped(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
}

impl From<NaiveDate> for CalendarDay {
    fn from(date: NaiveDate) -> Self {
        Self::new(date)
    }
}

impl From<CalendarDay> for NaiveDate {
    fn from(day: CalendarDay) -> Self {
        day.0
    }
}

impl FromStr for CalendarDay {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_DAY_FORMAT))
    }
}

impl Serialize for CalendarDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Inclusive ranges of calendar days

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DateError;
use crate::types::day::CalendarDay;

/// A range of days with start and end inclusive
///
/// `DateRange::new` does not validate; a range whose `end` precedes its
/// `start` is empty. Use [`DateRange::checked`] or [`DateRange::parse`] when
/// the bounds come from untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: CalendarDay,
    pub end: CalendarDay,
}

impl DateRange {
    /// Create a new date range
    pub const fn new(start: CalendarDay, end: CalendarDay) -> Self {
        Self { start, end }
    }

    /// A range covering a single day
    pub const fn single(day: CalendarDay) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// Create a range, rejecting `start > end`
    pub fn checked(start: CalendarDay, end: CalendarDay) -> Result<Self, DateError> {
        if end < start {
            return Err(DateError::invalid_range(start, end));
        }
        Ok(Self { start, end })
    }

    /// Parse both bounds strictly and reject degenerate ranges
    ///
    /// # Examples
    ///
    /// ```
    /// use slotscan::DateRange;
    ///
    /// let march = DateRange::parse("2024-03-01", "2024-03-31").unwrap();
    /// assert_eq!(march.len_days(), 31);
    ///
    /// assert!(DateRange::parse("2024-03-31", "2024-03-01").is_err());
    /// assert!(DateRange::parse("2024-03-01", "soon").is_err());
    /// ```
    pub fn parse(start: &str, end: &str) -> Result<Self, DateError> {
        Self::checked(CalendarDay::parse(start)?, CalendarDay::parse(end)?)
    }

    /// Number of days in this range (inclusive)
    pub fn len_days(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.start.days_until(self.end).unsigned_abs() + 1
        }
    }

    /// Check if this range is empty
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Check if this range contains a specific day
    pub fn contains(&self, day: CalendarDay) -> bool {
        day >= self.start && day <= self.end
    }

    /// Check if `other` lies entirely within this range
    pub fn contains_range(&self, other: &DateRange) -> bool {
        !other.is_empty() && self.contains(other.start) && self.contains(other.end)
    }

    /// Check whether the two ranges share at least one day
    pub fn overlaps(&self, other: &DateRange) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.start <= other.end
            && other.start <= self.end
    }

    /// Check whether the two ranges overlap or sit next to each other with no day between
    pub fn touches(&self, other: &DateRange) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let (first, second) = if self.start <= other.start {
            (self, other)
        } else {
            (other, self)
        };
        match first.end.succ() {
            Some(next) => second.start <= next,
            None => true,
        }
    }

    /// Widen the range by `before` days at the start and `after` days at the end
    ///
    /// Saturates at the calendar bounds.
    pub fn widen(&self, before: u32, after: u32) -> Self {
        Self {
            start: self.start.saturating_sub_days(before),
            end: self.end.saturating_add_days(after),
        }
    }

    /// Iterate over every day in the range, in ascending order
    pub fn days(&self) -> Days {
        Days {
            next: (!self.is_empty()).then_some(self.start),
            end: self.end,
        }
    }
}

impl From<(CalendarDay, CalendarDay)> for DateRange {
    fn from((start, end): (CalendarDay, CalendarDay)) -> Self {
        Self { start, end }
    }
}

impl From<DateRange> for (CalendarDay, CalendarDay) {
    fn from(range: DateRange) -> Self {
        (range.start, range.end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Iterator over the days of a [`DateRange`]
#[derive(Debug, Clone)]
pub struct Days {
    next: Option<CalendarDay>,
    end: CalendarDay,
}

impl Iterator for Days {
    type Item = CalendarDay;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current < self.end {
            current.succ()
        } else {
            None
        };
        Some(current)
    }
}

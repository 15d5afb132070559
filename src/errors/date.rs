// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for calendar day parsing and range construction.

use crate::types::day::CalendarDay;

/// Errors that can occur while parsing days or building day ranges.
///
/// # Examples
///
/// ```rust
/// use slotscan::{CalendarDay, DateError};
///
/// match CalendarDay::parse("not-a-date") {
///     Err(DateError::Malformed { input }) => assert_eq!(input, "not-a-date"),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// The input is not a zero-padded `YYYY-MM-DD` calendar day.
    #[error("Malformed calendar day {input:?}, expected YYYY-MM-DD")]
    Malformed {
        /// The rejected input
        input: String,
    },

    /// The range ends before it starts.
    #[error("Invalid day range: {start} is after {end}")]
    InvalidRange {
        /// Start of the rejected range
        start: CalendarDay,
        /// End of the rejected range
        end: CalendarDay,
    },
}

impl DateError {
    /// Create a `Malformed` error for the given input.
    pub fn malformed(input: impl Into<String>) -> Self {
        DateError::Malformed {
            input: input.into(),
        }
    }

    /// Create an `InvalidRange` error for reversed bounds.
    pub fn invalid_range(start: CalendarDay, end: CalendarDay) -> Self {
        DateError::InvalidRange { start, end }
    }
}

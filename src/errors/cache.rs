// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for range cache mutations.

use crate::types::day::CalendarDay;

/// Errors that can occur when recording data in a range cache.
///
/// Lookups never fail; only inserts validate their input, so that an empty
/// range can never end up in the covered set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeCacheError {
    /// Attempted to mark an empty range (end before start) as covered.
    #[error("Refusing to record empty range [{start}, {end}]")]
    EmptyRange {
        /// Start of the rejected range
        start: CalendarDay,
        /// End of the rejected range
        end: CalendarDay,
    },
}

impl RangeCacheError {
    /// Create an `EmptyRange` error.
    pub fn empty_range(start: CalendarDay, end: CalendarDay) -> Self {
        RangeCacheError::EmptyRange { start, end }
    }
}

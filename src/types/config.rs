// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for configuration values
//!
//! These types keep request sizing and look-ahead settings from being
//! confused with slot counts or day offsets computed at runtime.

use serde::{Deserialize, Serialize};

use crate::types::range::DateRange;

/// Maximum number of days requested from the availability source at once
///
/// Large gaps are split into chunks of at most this many days. Each chunk is
/// fetched and recorded independently, so a failure only loses one chunk.
///
/// # Examples
///
/// ```
/// use slotscan::MaxDaysPerRequest;
///
/// assert_eq!(MaxDaysPerRequest::DEFAULT.as_u32(), 62);
/// assert_eq!(MaxDaysPerRequest::new(0).as_u32(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct MaxDaysPerRequest(u32);

impl MaxDaysPerRequest {
    /// Two calendar months, enough for a month view plus look-ahead
    pub const DEFAULT: Self = Self(62);

    /// One week per request, for slow backends
    pub const CONSERVATIVE: Self = Self(7);

    /// Create a new limit, clamped to at least one day
    pub const fn new(days: u32) -> Self {
        if days == 0 {
            Self(1)
        } else {
            Self(days)
        }
    }

    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    /// Number of chunks needed to cover `range`
    pub fn chunks_needed(&self, range: &DateRange) -> usize {
        range.len_days().div_ceil(u64::from(self.0)) as usize
    }

    /// Split a range into chunks of at most `self` days
    ///
    /// # Examples
    ///
    /// ```
    /// use slotscan::{DateRange, MaxDaysPerRequest};
    ///
    /// let limit = MaxDaysPerRequest::new(10);
    /// let march = DateRange::parse("2024-03-01", "2024-03-25").unwrap();
    /// let chunks: Vec<_> = limit.chunk_range(march).map(|c| c.to_string()).collect();
    ///
    /// assert_eq!(
    ///     chunks,
    ///     vec![
    ///         "[2024-03-01, 2024-03-10]",
    ///         "[2024-03-11, 2024-03-20]",
    ///         "[2024-03-21, 2024-03-25]",
    ///     ]
    /// );
    /// ```
    pub fn chunk_range(&self, range: DateRange) -> ChunkIterator {
        ChunkIterator {
            remaining: (!range.is_empty()).then_some(range),
            chunk_days: self.0,
        }
    }
}

impl Default for MaxDaysPerRequest {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u32> for MaxDaysPerRequest {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<MaxDaysPerRequest> for u32 {
    fn from(value: MaxDaysPerRequest) -> Self {
        value.0
    }
}

impl std::fmt::Display for MaxDaysPerRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} days", self.0)
    }
}

/// Iterator over request-sized chunks of a [`DateRange`]
#[derive(Debug, Clone)]
pub struct ChunkIterator {
    remaining: Option<DateRange>,
    chunk_days: u32,
}

impl Iterator for ChunkIterator {
    type Item = DateRange;

    fn next(&mut self) -> Option<Self::Item> {
        let remaining = self.remaining?;
        let chunk_end = remaining
            .start
            .saturating_add_days(self.chunk_days.saturating_sub(1))
            .min(remaining.end);

        self.remaining = if chunk_end < remaining.end {
            chunk_end
                .succ()
                .map(|next| DateRange::new(next, remaining.end))
        } else {
            None
        };

        Some(DateRange::new(remaining.start, chunk_end))
    }
}

/// Extra days fetched around the visible window
///
/// Panning a month view forward is far more common than panning backward,
/// hence the asymmetric default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefetchMargin {
    /// Days added before the window start
    pub before: u32,
    /// Days added after the window end
    pub after: u32,
}

impl PrefetchMargin {
    /// No look-ahead
    pub const NONE: Self = Self {
        before: 0,
        after: 0,
    };

    pub const fn new(before: u32, after: u32) -> Self {
        Self { before, after }
    }

    /// Widen `window` by this margin
    pub fn apply(&self, window: DateRange) -> DateRange {
        if window.is_empty() {
            return window;
        }
        window.widen(self.before, self.after)
    }
}

impl Default for PrefetchMargin {
    fn default() -> Self {
        Self {
            before: 0,
            after: 14,
        }
    }
}

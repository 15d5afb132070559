// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for per-day availability values

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::types::day::CalendarDay;

/// Number of bookable slots on a day
///
/// # Examples
///
/// ```
/// use slotscan::SlotCount;
///
/// let slots = SlotCount::new(3);
/// assert_eq!(slots.as_u32(), 3);
/// assert!(SlotCount::ZERO.is_zero());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SlotCount(u32);

impl SlotCount {
    /// No availability
    pub const ZERO: Self = Self(0);

    pub const fn new(slots: u32) -> Self {
        Self(slots)
    }

    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for SlotCount {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Add for SlotCount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for SlotCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-day availability, ordered by day
pub type ValueMap = BTreeMap<CalendarDay, SlotCount>;

/// One day of availability as reported by the remote source
///
/// The date is kept as the raw string from the response so that a malformed
/// value can be reported against the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityEntry {
    pub date: String,
    pub available_slots: u32,
}

impl AvailabilityEntry {
    pub fn new(date: impl Into<String>, available_slots: u32) -> Self {
        Self {
            date: date.into(),
            available_slots,
        }
    }
}

impl From<(CalendarDay, SlotCount)> for AvailabilityEntry {
    fn from((day, slots): (CalendarDay, SlotCount)) -> Self {
        Self {
            date: day.to_string(),
            available_slots: slots.as_u32(),
        }
    }
}

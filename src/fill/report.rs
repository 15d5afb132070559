// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Outcome types of a window load

use std::fmt;

use crate::errors::SlotscanError;
use crate::types::range::DateRange;

/// Lifecycle of a [`GapFiller`](crate::GapFiller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillState {
    /// Nothing loaded for the current identity yet
    #[default]
    Idle,
    /// Requests are being issued; `remaining` includes the current one
    FetchingGaps { remaining: usize },
    /// The last load finished (possibly with failures or cancelled)
    Settled,
}

/// A request that failed and was not recorded
#[derive(Debug)]
pub struct GapFailure {
    pub range: DateRange,
    pub error: SlotscanError,
}

impl fmt::Display for GapFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.range, self.error)
    }
}

/// Summary of one [`GapFiller::load`](crate::GapFiller::load) call
#[derive(Debug)]
pub struct FillReport {
    /// The window after applying the prefetch margin
    pub target: DateRange,
    /// Every request planned for the missing ranges, in issue order
    pub requests: Vec<DateRange>,
    /// Requests that succeeded and were recorded
    pub fetched: Vec<DateRange>,
    /// Requests that failed
    pub failed: Vec<GapFailure>,
    /// Whether the load stopped early because of cancellation
    pub cancelled: bool,
}

impl FillReport {
    pub(crate) fn new(target: DateRange, requests: Vec<DateRange>) -> Self {
        Self {
            target,
            requests,
            fetched: Vec::new(),
            failed: Vec::new(),
            cancelled: false,
        }
    }

    /// `true` if every planned request was fetched and recorded
    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.failed.is_empty() && self.fetched.len() == self.requests.len()
    }

    /// `true` if the target was already covered and nothing was requested
    pub fn was_cached(&self) -> bool {
        self.requests.is_empty()
    }

    /// Requests that were never attempted because the load was cancelled
    pub fn skipped(&self) -> &[DateRange] {
        let attempted = self.fetched.len() + self.failed.len();
        self.requests.get(attempted..).unwrap_or(&[])
    }
}

impl fmt::Display for FillReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "target={}, requests={}, fetched={}, failed={}, skipped={}, cancelled={}",
            self.target,
            self.requests.len(),
            self.fetched.len(),
            self.failed.len(),
            self.skipped().len(),
            self.cancelled
        )
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for slotscan integration tests
//!
//! Provides a scriptable [`AvailabilitySource`] so gap filling can be tested
//! without a booking backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use slotscan::{
    AvailabilityEntry, AvailabilitySource, CacheIdentity, CalendarDay, CancelFlag, DateRange,
    SourceError,
};
use tracing_subscriber::EnvFilter;

/// Mock AvailabilitySource for testing GapFiller logic
///
/// By default every requested day is reported with the slots returned by the
/// slot function (day of month modulo 5). Individual ranges can be scripted
/// to fail or to return malformed data.
///
/// # Example
///
/// ```rust,ignore
/// let mock = MockAvailabilitySource::new()
///     .failing_on(range("2024-03-11", "2024-03-20"))
///     .cancelling_after(2, cancel.clone());
///
/// let mut filler = GapFiller::new(mock, SlotscanConfig::minimal());
/// ```
pub struct MockAvailabilitySource {
    slots: Box<dyn Fn(CalendarDay) -> u32 + Send + Sync>,
    failures: Mutex<HashMap<DateRange, usize>>,
    malformed: Vec<DateRange>,
    cancel_after: Option<(usize, CancelFlag)>,
    latency: Option<Duration>,
    calls: Mutex<Vec<(CacheIdentity, DateRange)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl Default for MockAvailabilitySource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAvailabilitySource {
    /// Create a mock that succeeds for every range
    pub fn new() -> Self {
        Self {
            slots: Box::new(default_slots),
            failures: Mutex::new(HashMap::new()),
            malformed: Vec::new(),
            cancel_after: None,
            latency: None,
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Set the slot count reported for each day
    pub fn with_slots<F>(mut self, slots: F) -> Self
    where
        F: Fn(CalendarDay) -> u32 + Send + Sync + 'static,
    {
        self.slots = Box::new(slots);
        self
    }

    /// Fail every request for exactly `range` with a 503
    pub fn failing_on(self, range: DateRange) -> Self {
        self.failing_times(range, usize::MAX)
    }

    /// Fail the first `times` requests for exactly `range` with a 503
    pub fn failing_times(self, range: DateRange, times: usize) -> Self {
        self.failures.lock().unwrap().insert(range, times);
        self
    }

    /// Answer requests for exactly `range` with an unparseable date
    pub fn malformed_on(mut self, range: DateRange) -> Self {
        self.malformed.push(range);
        self
    }

    /// Set `flag` once `calls` requests have been answered
    pub fn cancelling_after(mut self, calls: usize, flag: CancelFlag) -> Self {
        self.cancel_after = Some((calls, flag));
        self
    }

    /// Delay every response
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Stop failing requests for `range`
    pub fn heal(&self, range: DateRange) {
        self.failures.lock().unwrap().remove(&range);
    }

    /// Every requested range, in request order
    pub fn requested_ranges(&self) -> Vec<DateRange> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, range)| *range)
            .collect()
    }

    /// Every identity a request was made for, in request order
    pub fn requested_identities(&self) -> Vec<CacheIdentity> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(identity, _)| identity.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Highest number of requests that were ever running at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn should_fail(&self, range: DateRange) -> bool {
        let mut failures = self.failures.lock().unwrap();
        match failures.get_mut(&range) {
            Some(0) | None => false,
            Some(remaining) => {
                *remaining = remaining.saturating_sub(1);
                true
            }
        }
    }
}

#[async_trait]
impl AvailabilitySource for MockAvailabilitySource {
    async fn fetch_range(
        &self,
        identity: &CacheIdentity,
        range: DateRange,
    ) -> Result<Vec<AvailabilityEntry>, SourceError> {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        let call_count = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((identity.clone(), range));
            calls.len()
        };

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some((after, flag)) = &self.cancel_after {
            if call_count >= *after {
                flag.cancel();
            }
        }

        if self.should_fail(range) {
            return Err(SourceError::status(503, format!("mock://{range}")));
        }

        if self.malformed.contains(&range) {
            return Ok(vec![AvailabilityEntry::new("not-a-date", 1)]);
        }

        Ok(range
            .days()
            .map(|day| AvailabilityEntry::new(day.to_string(), (self.slots)(day)))
            .collect())
    }

    fn name(&self) -> &'static str {
        "MockAvailabilitySource"
    }
}

fn default_slots(day: CalendarDay) -> u32 {
    use chrono::Datelike;
    day.as_naive().day() % 5
}

/// Install a test log subscriber, filtered by `RUST_LOG`
///
/// Run with `RUST_LOG=slotscan=debug` to see the fill loop's request and
/// failure logs. Safe to call from every test.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Parse a `YYYY-MM-DD` day, panicking on bad input
#[allow(dead_code)]
pub fn day(s: &str) -> CalendarDay {
    CalendarDay::parse(s).unwrap()
}

/// Parse an inclusive day range, panicking on bad input
#[allow(dead_code)]
pub fn range(start: &str, end: &str) -> DateRange {
    DateRange::parse(start, end).unwrap()
}

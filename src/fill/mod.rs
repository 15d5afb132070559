// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Gap filling: keeps a [`RangeCache`] complete for the windows a caller views
//!
//! [`GapFiller::load`] widens the requested window by the prefetch margin,
//! asks the cache which days are missing, splits those gaps into requests of
//! at most `max_days_per_request` days and fetches them one at a time in
//! ascending order. Transient failures are retried per
//! [`SlotscanConfig::retry`]. Only fully successful requests are recorded, so
//! anything that failed or was cancelled shows up as a gap again on the next
//! load.
//!
//! # Example
//!
//! ```rust,ignore
//! use slotscan::{CacheIdentity, CancelFlag, DateRange, GapFiller, HttpAvailabilitySource, SlotscanConfig};
//!
//! let config = SlotscanConfig::default();
//! let source = HttpAvailabilitySource::from_config(base_url, &config)?;
//! let mut filler = GapFiller::new(source, config);
//!
//! let identity = CacheIdentity::new("cleaning").at_location("downtown");
//! let march = DateRange::parse("2024-03-01", "2024-03-31")?;
//! let heatmap = filler.heatmap(&identity, march, &CancelFlag::new()).await;
//! ```

use tokio::time::sleep;
use tracing::{debug, info, trace, warn, Instrument};

use crate::cache::RangeCache;
use crate::config::SlotscanConfig;
use crate::errors::SlotscanError;
use crate::source::{entries_to_values, AvailabilitySource, RetryingSource};
use crate::tracing::spans;
use crate::types::identity::CacheIdentity;
use crate::types::range::DateRange;
use crate::types::slots::ValueMap;

pub mod cancel;
pub mod report;

pub use cancel::CancelFlag;
pub use report::{FillReport, FillState, GapFailure};

/// Fills cache gaps from an [`AvailabilitySource`]
///
/// Owns its cache; `load` takes `&mut self`, so one filler never has two
/// loads running at once and at most one request is in flight.
pub struct GapFiller<S> {
    cache: RangeCache,
    source: RetryingSource<S>,
    config: SlotscanConfig,
    state: FillState,
}

impl<S: AvailabilitySource> GapFiller<S> {
    /// Create a filler; `source` is retried according to `config.retry`
    pub fn new(source: S, config: SlotscanConfig) -> Self {
        Self {
            cache: RangeCache::new(),
            source: RetryingSource::new(source, config.retry.clone()),
            config,
            state: FillState::Idle,
        }
    }

    pub fn cache(&self) -> &RangeCache {
        &self.cache
    }

    pub fn source(&self) -> &S {
        self.source.inner()
    }

    pub fn config(&self) -> &SlotscanConfig {
        &self.config
    }

    /// Progress of the current or last load
    ///
    /// A load whose future is dropped part way through leaves the filler
    /// `Settled`, keeping whatever it recorded before the drop.
    pub fn state(&self) -> FillState {
        self.state
    }

    /// Drop everything cached for the current identity
    pub fn reset(&mut self) {
        self.cache.reset();
        self.state = FillState::Idle;
    }

    /// Dense values for `window` from whatever is cached, defaulting to zero
    pub fn project(&self, window: DateRange) -> ValueMap {
        self.cache.project(window)
    }

    /// Make sure `window` (plus the prefetch margin) is cached for `identity`
    ///
    /// Switching to a different identity discards the cache first. Request
    /// failures are logged and reported, never returned as an error; the
    /// cache keeps whatever succeeded.
    pub async fn load(
        &mut self,
        identity: &CacheIdentity,
        window: DateRange,
        cancel: &CancelFlag,
    ) -> FillReport {
        if self.cache.ensure_identity(identity) {
            self.state = FillState::Idle;
        }

        if window.is_empty() {
            debug!(%identity, %window, "Empty window, nothing to load");
            self.state = FillState::Settled;
            return FillReport::new(window, Vec::new());
        }

        let span = spans::load_window(identity, window);
        self.load_inner(identity, window, cancel)
            .instrument(span)
            .await
    }

    async fn load_inner(
        &mut self,
        identity: &CacheIdentity,
        window: DateRange,
        cancel: &CancelFlag,
    ) -> FillReport {
        let Self {
            cache,
            source,
            config,
            state,
        } = self;
        let mut state = SettleOnDrop(state);

        let target = config.prefetch_margin.apply(window);
        let gaps = cache.missing_ranges(target);

        let requests: Vec<DateRange> = gaps
            .iter()
            .flat_map(|gap| config.max_days_per_request.chunk_range(*gap))
            .collect();
        let mut report = FillReport::new(target, requests.clone());

        if requests.is_empty() {
            debug!(%identity, %target, "Window fully cached");
            return report;
        }

        info!(
            %identity,
            %target,
            gap_count = gaps.len(),
            request_count = requests.len(),
            source = source.name(),
            "Fetching uncached ranges"
        );

        let total = requests.len();
        for (index, range) in requests.into_iter().enumerate() {
            if index > 0 {
                if let Some(delay) = config.request_delay {
                    trace!(?delay, "Applying request delay");
                    sleep(delay).await;
                }
            }

            if cancel.is_cancelled() {
                info!(
                    %identity,
                    completed = index,
                    remaining = total - index,
                    "Load cancelled"
                );
                report.cancelled = true;
                break;
            }

            state.set(FillState::FetchingGaps {
                remaining: total - index,
            });

            let span = spans::fetch_gap(identity, range, index, total);
            match fetch_and_record(&*source, cache, identity, range)
                .instrument(span)
                .await
            {
                Ok(days) => {
                    debug!(%range, days, "Recorded range");
                    report.fetched.push(range);
                }
                Err(error) => {
                    warn!(
                        %identity,
                        %range,
                        error = %error,
                        "Failed to fetch range, leaving it uncached"
                    );
                    report.failed.push(GapFailure { range, error });
                }
            }
        }

        info!(
            %identity,
            %target,
            fetched = report.fetched.len(),
            failed = report.failed.len(),
            cancelled = report.cancelled,
            covered_days = cache.stats().covered_days,
            "Finished window load"
        );
        report
    }

    /// Load `window` and return its dense per-day values
    ///
    /// Days whose request failed read as zero; check [`load`](Self::load)'s
    /// report when that distinction matters.
    pub async fn heatmap(
        &mut self,
        identity: &CacheIdentity,
        window: DateRange,
        cancel: &CancelFlag,
    ) -> ValueMap {
        self.load(identity, window, cancel).await;
        self.project(window)
    }
}

/// Fetch one request and record it; returns the number of reported days
async fn fetch_and_record<S: AvailabilitySource>(
    source: &S,
    cache: &mut RangeCache,
    identity: &CacheIdentity,
    range: DateRange,
) -> Result<usize, SlotscanError> {
    let entries = source.fetch_range(identity, range).await?;
    let values = entries_to_values(entries)?;
    let days = values.len();
    cache.record_fetch_result(range, values)?;
    Ok(days)
}

/// Leaves the filler `Settled` when a load returns or its future is dropped
struct SettleOnDrop<'a>(&'a mut FillState);

impl SettleOnDrop<'_> {
    fn set(&mut self, state: FillState) {
        *self.0 = state;
    }
}

impl Drop for SettleOnDrop<'_> {
    fn drop(&mut self) {
        *self.0 = FillState::Settled;
    }
}

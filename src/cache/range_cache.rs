// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-identity availability cache
//!
//! A [`RangeCache`] holds the slot counts fetched so far for one
//! [`CacheIdentity`] together with the set of day ranges known to be complete.
//! It grows monotonically until the identity changes, at which point it is
//! discarded wholesale. There is no TTL and no eviction.

use std::fmt;

use tracing::debug;

use crate::cache::coverage::CoveredSet;
use crate::errors::RangeCacheError;
use crate::types::day::CalendarDay;
use crate::types::identity::CacheIdentity;
use crate::types::range::DateRange;
use crate::types::slots::{SlotCount, ValueMap};

/// Statistics about range cache usage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of gap lookups performed
    pub lookups: u64,
    /// Lookups whose target was already fully covered
    pub full_hits: u64,
    /// Number of fetched ranges recorded
    pub ranges_recorded: u64,
    /// Number of times the cache was reset
    pub resets: u64,
    /// Days currently inside the covered set
    pub covered_days: u64,
    /// Days currently holding a value (covered or not)
    pub cached_days: usize,
}

impl CacheStats {
    /// Percentage of lookups (0.0 to 100.0) that needed no fetch
    pub fn hit_rate(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            (self.full_hits as f64 / self.lookups as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lookups={}, full_hits={}, ranges_recorded={}, resets={}, covered_days={}, cached_days={}, hit_rate={:.1}%",
            self.lookups,
            self.full_hits,
            self.ranges_recorded,
            self.resets,
            self.covered_days,
            self.cached_days,
            self.hit_rate()
        )
    }
}

/// Sparse per-day slot cache with covered-range tracking
///
/// # Invariants
///
/// - The covered set is always maximally merged.
/// - Every day inside the covered set has an entry in the value map.
/// - Entries may exist outside the covered set; they are served by
///   [`project`](RangeCache::project) but never make a range count as covered.
///
/// # Examples
///
/// ```
/// use slotscan::{CalendarDay, DateRange, RangeCache, SlotCount, ValueMap};
///
/// let mut cache = RangeCache::new();
/// let april = DateRange::parse("2024-04-01", "2024-04-05").unwrap();
///
/// assert_eq!(cache.missing_ranges(april), vec![april]);
///
/// let mut values = ValueMap::new();
/// values.insert(CalendarDay::parse("2024-04-01").unwrap(), SlotCount::new(3));
/// cache.record_fetch_result(april, values).unwrap();
///
/// assert!(cache.missing_ranges(april).is_empty());
/// let dense = cache.project(april);
/// assert_eq!(dense.len(), 5);
/// assert_eq!(dense.values().map(|s| s.as_u32()).sum::<u32>(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RangeCache {
    identity: Option<CacheIdentity>,
    covered: CoveredSet,
    values: ValueMap,
    stats: CacheStats,
}

impl RangeCache {
    /// Creates an empty cache not yet bound to an identity
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache for `identity`
    pub fn for_identity(identity: CacheIdentity) -> Self {
        Self {
            identity: Some(identity),
            ..Self::default()
        }
    }

    /// The identity this cache currently holds data for
    pub fn identity(&self) -> Option<&CacheIdentity> {
        self.identity.as_ref()
    }

    /// Bind the cache to `identity`, discarding all data if it changed
    ///
    /// Returns `true` if the cache was reset.
    pub fn ensure_identity(&mut self, identity: &CacheIdentity) -> bool {
        if self.identity.as_ref() == Some(identity) {
            return false;
        }

        debug!(
            previous = ?self.identity.as_ref().map(ToString::to_string),
            next = %identity,
            "Cache identity changed, resetting"
        );
        let had_identity = self.identity.is_some();
        self.clear_data();
        self.identity = Some(identity.clone());
        if had_identity {
            self.stats.resets += 1;
        }
        had_identity
    }

    /// Discard all covered ranges and values, keeping the identity
    pub fn reset(&mut self) {
        debug!(
            covered_days = self.covered.total_days(),
            cached_days = self.values.len(),
            "Resetting range cache"
        );
        self.clear_data();
        self.stats.resets += 1;
    }

    fn clear_data(&mut self) {
        self.covered.clear();
        self.values.clear();
        self.stats.covered_days = 0;
        self.stats.cached_days = 0;
    }

    /// Calculate which parts of `target` still need to be fetched
    ///
    /// Returns a sorted list of disjoint ranges. An empty result means the
    /// whole target is covered (or the target itself is empty).
    pub fn missing_ranges(&mut self, target: DateRange) -> Vec<DateRange> {
        let gaps = self.covered.missing(target);

        self.stats.lookups += 1;
        if gaps.is_empty() {
            self.stats.full_hits += 1;
        }

        debug!(
            %target,
            gap_count = gaps.len(),
            "Calculated missing ranges"
        );
        gaps
    }

    /// Record a successful fetch for exactly `range`
    ///
    /// `values` are merged into the cache (later writes win for the same day),
    /// every day of `range` without a value is stored as zero, and `range` is
    /// merged into the covered set. Values outside `range` are kept but do not
    /// extend coverage.
    ///
    /// Must only be called once the fetch for the whole range succeeded.
    pub fn record_fetch_result(
        &mut self,
        range: DateRange,
        values: ValueMap,
    ) -> Result<(), RangeCacheError> {
        if range.is_empty() {
            return Err(RangeCacheError::empty_range(range.start, range.end));
        }

        let reported_days = values.len();
        self.values.extend(values);
        for day in range.days() {
            self.values.entry(day).or_insert(SlotCount::ZERO);
        }
        self.covered.insert(range);

        self.stats.ranges_recorded += 1;
        self.stats.covered_days = self.covered.total_days();
        self.stats.cached_days = self.values.len();

        debug!(
            %range,
            reported_days,
            covered_ranges = self.covered.len(),
            covered_days = self.stats.covered_days,
            "Recorded fetch result"
        );
        Ok(())
    }

    /// Dense per-day values for `window`, defaulting to zero
    ///
    /// Performs no coverage check and never fetches; call
    /// [`missing_ranges`](RangeCache::missing_ranges) and record the fetched
    /// gaps first if freshness matters.
    pub fn project(&self, window: DateRange) -> ValueMap {
        window
            .days()
            .map(|day| (day, self.value(day)))
            .collect()
    }

    /// The cached value for `day`, or zero
    pub fn value(&self, day: CalendarDay) -> SlotCount {
        self.values.get(&day).copied().unwrap_or(SlotCount::ZERO)
    }

    /// Whether every day of `range` has been fetched
    pub fn is_covered(&self, range: &DateRange) -> bool {
        self.covered.covers(range)
    }

    /// The covered set
    pub fn covered(&self) -> &CoveredSet {
        &self.covered
    }

    /// The raw, sparse value map
    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    /// Whether the cache holds no values and covers nothing
    pub fn is_empty(&self) -> bool {
        self.covered.is_empty() && self.values.is_empty()
    }

    /// Number of covered days
    pub fn len_days(&self) -> u64 {
        self.covered.total_days()
    }

    /// Current statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

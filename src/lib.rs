// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Availability heatmap caching for booking calendars.
//!
//! A calendar view asks for per-day slot counts over a date window. slotscan
//! keeps the days that were already fetched in a [`RangeCache`], computes the
//! gaps between them, and fills only those gaps from an
//! [`AvailabilitySource`], one request at a time.
//!
//! - [`cache`]: covered-range bookkeeping and the value cache
//! - [`source`]: the source trait, an HTTP implementation and a retry wrapper
//! - [`fill`]: the gap filler tying cache and source together
//! - [`config`]: prefetch, chunking and request pacing settings
//! - [`errors`]: error types
//! - [`types`]: calendar days, ranges and slot counts
//!
//! # Example
//!
//! ```rust
//! use slotscan::{CacheIdentity, DateRange, RangeCache, ValueMap};
//!
//! let mut cache = RangeCache::for_identity(CacheIdentity::new("cleaning"));
//! let march = DateRange::parse("2024-03-01", "2024-03-31").unwrap();
//!
//! // Nothing cached yet: the whole window is a gap
//! assert_eq!(cache.missing_ranges(march), vec![march]);
//!
//! cache.record_fetch_result(march, ValueMap::new()).unwrap();
//! assert!(cache.missing_ranges(march).is_empty());
//! ```

pub mod cache;
pub mod config;
pub mod errors;
pub mod fill;
pub mod source;
mod tracing;
pub mod types;

pub use cache::{merge_ranges, missing_ranges, CacheStats, CoveredSet, RangeCache};
pub use config::{SlotscanConfig, SlotscanConfigBuilder};
pub use errors::{DateError, RangeCacheError, SlotscanError, SourceError};
pub use fill::{CancelFlag, FillReport, FillState, GapFailure, GapFiller};
pub use source::{
    entries_to_values, AvailabilitySource, HttpAvailabilitySource, RetryConfig, RetryingSource,
};
pub use types::config::{ChunkIterator, MaxDaysPerRequest, PrefetchMargin};
pub use types::day::CalendarDay;
pub use types::identity::CacheIdentity;
pub use types::range::{DateRange, Days};
pub use types::slots::{AvailabilityEntry, SlotCount, ValueMap};

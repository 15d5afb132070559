// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Remote availability sources
//!
//! The gap filler talks to the booking backend through the
//! [`AvailabilitySource`] trait. Implement it to plug in any backend; the crate
//! ships an HTTP implementation ([`HttpAvailabilitySource`]) and a retry
//! wrapper ([`RetryingSource`]) that works with any source.
//!
//! # Example: a fixed in-memory source
//!
//! ```rust
//! use async_trait::async_trait;
//! use slotscan::{AvailabilityEntry, AvailabilitySource, CacheIdentity, DateRange, SourceError};
//!
//! struct WeekdaysOnly;
//!
//! #[async_trait]
//! impl AvailabilitySource for WeekdaysOnly {
//!     async fn fetch_range(
//!         &self,
//!         _identity: &CacheIdentity,
//!         range: DateRange,
//!     ) -> Result<Vec<AvailabilityEntry>, SourceError> {
//!         use chrono::Datelike;
//!         Ok(range
//!             .days()
//!             .filter(|d| d.as_naive().weekday().num_days_from_monday() < 5)
//!             .map(|d| AvailabilityEntry::new(d.to_string(), 8))
//!             .collect())
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "weekdays-only"
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::errors::SourceError;
use crate::types::day::CalendarDay;
use crate::types::identity::CacheIdentity;
use crate::types::range::DateRange;
use crate::types::slots::{AvailabilityEntry, SlotCount, ValueMap};

pub mod http;
pub mod retry;

pub use http::HttpAvailabilitySource;
pub use retry::{RetryConfig, RetryingSource};

/// Trait for fetching per-day availability for a date range
///
/// Implementations return a sparse list: days without availability may be
/// omitted. The caller treats every day of the requested range that is not in
/// the response as zero.
///
/// The trait is object-safe, allowing runtime pluggability via
/// `Box<dyn AvailabilitySource>`.
#[async_trait]
pub trait AvailabilitySource: Send + Sync {
    /// Fetch availability for every day of `range` for `identity`
    ///
    /// Either the whole range succeeds or an error is returned; partial
    /// results are never reported as success.
    async fn fetch_range(
        &self,
        identity: &CacheIdentity,
        range: DateRange,
    ) -> Result<Vec<AvailabilityEntry>, SourceError>;

    /// A short name for logging
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<S: AvailabilitySource + ?Sized> AvailabilitySource for Box<S> {
    async fn fetch_range(
        &self,
        identity: &CacheIdentity,
        range: DateRange,
    ) -> Result<Vec<AvailabilityEntry>, SourceError> {
        (**self).fetch_range(identity, range).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Convert a source response into a value map
///
/// Every entry date is parsed strictly. A single malformed date rejects the
/// whole response, so the request it belongs to is not recorded and will be
/// retried on the next lookup. When a day appears more than once, the later
/// entry wins.
///
/// # Examples
///
/// ```
/// use slotscan::{entries_to_values, AvailabilityEntry};
///
/// let values = entries_to_values(vec![
///     AvailabilityEntry::new("2024-04-01", 3),
///     AvailabilityEntry::new("2024-04-03", 0),
/// ])
/// .unwrap();
/// assert_eq!(values.len(), 2);
///
/// assert!(entries_to_values(vec![AvailabilityEntry::new("04/01/2024", 3)]).is_err());
/// ```
pub fn entries_to_values(entries: Vec<AvailabilityEntry>) -> Result<ValueMap, SourceError> {
    entries
        .into_iter()
        .map(|entry| {
            let day = CalendarDay::parse(&entry.date).map_err(|e| {
                SourceError::invalid_response(format!("entry date rejected: {e}"))
            })?;
            Ok((day, SlotCount::new(entry.available_slots)))
        })
        .collect()
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for slotscan operations.
//!
//! Telemetry is kept apart from business logic: instead of `#[instrument]`
//! attributes, each instrumented operation has a span helper here and attaches
//! it with [`tracing::Instrument`]:
//!
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     let span = spans::my_operation(param);
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(span)
//!     .await
//! }
//! ```

use tracing::{Level, Span};

use crate::types::identity::CacheIdentity;
use crate::types::range::DateRange;

/// Create span for loading a window into the cache.
///
/// Parent: None (root span for this operation)
/// Children: fetch_gap spans (one per request)
#[inline]
pub(crate) fn load_window(identity: &CacheIdentity, window: DateRange) -> Span {
    tracing::span!(
        Level::INFO,
        "slotscan.load_window",
        identity = %identity,
        window_start = %window.start,
        window_end = %window.end,
    )
}

/// Create span for fetching and recording one request-sized chunk of a gap.
///
/// Parent: load_window span
/// Children: source-specific spans such as http_fetch_range
#[inline]
pub(crate) fn fetch_gap(
    identity: &CacheIdentity,
    range: DateRange,
    index: usize,
    total: usize,
) -> Span {
    tracing::debug_span!(
        "slotscan.fetch_gap",
        identity = %identity,
        from = %range.start,
        to = %range.end,
        days = range.len_days(),
        request = index + 1,
        requests = total,
    )
}

/// Create span for a single HTTP availability request.
///
/// Parent: fetch_gap span
#[inline]
pub(crate) fn http_fetch_range(identity: &CacheIdentity, range: DateRange) -> Span {
    tracing::debug_span!(
        "slotscan.http_fetch_range",
        service_id = %identity.service_id,
        location_id = identity.location_id.as_deref().unwrap_or("*"),
        from = %range.start,
        to = %range.end,
    )
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the slotscan library.
//!
//! This module provides strongly-typed errors for all public APIs in slotscan.
//! It follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained error handling (`DateError`,
//!   `RangeCacheError`, `SourceError`)
//! - **Unified error type** (`SlotscanError`) for convenience when you don't need
//!   to distinguish between error sources
//!
//! # Architecture
//!
//! - [`DateError`] - Malformed calendar days and reversed day ranges
//! - [`RangeCacheError`] - Rejected cache mutations
//! - [`SourceError`] - Failures of a remote availability source for one request
//!
//! Gap filling itself never fails as a whole: per-request errors are
//! collected in the fill report instead of aborting the remaining requests.
//!
//! # Examples
//!
//! ```rust
//! use slotscan::{DateRange, RangeCache, SlotscanError, ValueMap};
//!
//! fn record(cache: &mut RangeCache, from: &str, to: &str) -> Result<(), SlotscanError> {
//!     let range = DateRange::parse(from, to)?;
//!     cache.record_fetch_result(range, ValueMap::new())?;
//!     Ok(())
//! }
//!
//! let mut cache = RangeCache::new();
//! assert!(record(&mut cache, "2024-04-01", "2024-04-05").is_ok());
//! assert!(matches!(
//!     record(&mut cache, "2024-04-05", "2024-04-01"),
//!     Err(SlotscanError::Date(_))
//! ));
//! ```

mod cache;
mod date;
mod source;

pub use cache::RangeCacheError;
pub use date::DateError;
pub use source::SourceError;

/// Unified error type for all slotscan operations.
///
/// All module-specific error types automatically convert to `SlotscanError` via
/// `From` implementations, so you can use `?` to propagate errors naturally.
#[derive(Debug, thiserror::Error)]
pub enum SlotscanError {
    /// Error from day parsing or range construction.
    #[error("Date error: {0}")]
    Date(#[from] DateError),

    /// Error from a cache mutation.
    #[error("Range cache error: {0}")]
    Cache(#[from] RangeCacheError),

    /// Error from a remote availability source.
    #[error("Availability source error: {0}")]
    Source(#[from] SourceError),
}

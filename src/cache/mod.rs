// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Availability caching keyed by calendar day ranges.
//!
//! - [`coverage`]: merging of covered ranges and gap detection
//! - [`range_cache`]: the per-identity value cache built on top of it

pub mod coverage;
pub mod range_cache;

pub use coverage::{merge_ranges, missing_ranges, CoveredSet};
pub use range_cache::{CacheStats, RangeCache};

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for slotscan operations
//!
//! Controls how the gap filler widens requested windows, how it splits gaps
//! into requests, and how requests are paced, timed out and retried.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use slotscan::SlotscanConfig;
//!
//! // Two weeks of prefetch after the window, 62 days per request
//! let config = SlotscanConfig::default();
//! assert_eq!(config.prefetch_margin.after, 14);
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use slotscan::SlotscanConfigBuilder;
//! use std::time::Duration;
//!
//! let config = SlotscanConfigBuilder::with_defaults()
//!     .max_days_per_request(31)
//!     .request_delay(Duration::from_millis(200))
//!     .build();
//! ```
//!
//! # Example: Exact windows, no pacing
//!
//! ```rust
//! use slotscan::SlotscanConfig;
//!
//! let config = SlotscanConfig::minimal();
//! assert!(config.request_delay.is_none());
//! ```

use std::time::Duration;

use crate::source::RetryConfig;
use crate::types::config::{MaxDaysPerRequest, PrefetchMargin};

/// Default timeout for a single availability request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for slotscan operations
///
/// Use [`SlotscanConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotscanConfig {
    /// Days fetched around every requested window
    /// Default: 0 before, 14 after
    pub prefetch_margin: PrefetchMargin,

    /// Maximum number of days covered by a single request
    /// Default: 62
    pub max_days_per_request: MaxDaysPerRequest,

    /// Delay between consecutive requests of one load
    /// Default: None (no delay)
    pub request_delay: Option<Duration>,

    /// Timeout for a single HTTP request
    /// Default: 30 seconds
    pub request_timeout: Duration,

    /// Retry policy for transient source failures, applied by the gap filler
    /// Default: 3 retries, 100ms base backoff
    pub retry: RetryConfig,
}

impl Default for SlotscanConfig {
    fn default() -> Self {
        Self::with_common_defaults()
    }
}

impl SlotscanConfig {
    /// Create config with defaults suited to an interactive calendar view
    ///
    /// Scrolling forward is the common case, so two weeks after the window are
    /// prefetched and nothing before it.
    pub fn with_common_defaults() -> Self {
        Self {
            prefetch_margin: PrefetchMargin::default(),
            max_days_per_request: MaxDaysPerRequest::DEFAULT,
            request_delay: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            retry: RetryConfig::default(),
        }
    }

    /// Create config that fetches exactly the requested window
    ///
    /// No prefetch margin, no delay between requests and no retries. Useful
    /// for tests and for backends without rate limits.
    pub fn minimal() -> Self {
        Self {
            prefetch_margin: PrefetchMargin::NONE,
            request_delay: None,
            retry: RetryConfig::disabled(),
            ..Self::with_common_defaults()
        }
    }
}

/// Builder for [`SlotscanConfig`]
///
/// # Example
///
/// ```rust
/// use slotscan::{RetryConfig, SlotscanConfigBuilder};
/// use std::time::Duration;
///
/// let config = SlotscanConfigBuilder::new()
///     .prefetch_margin(7, 30)
///     .request_timeout(Duration::from_secs(10))
///     .retry(RetryConfig::aggressive())
///     .build();
///
/// assert_eq!(config.prefetch_margin.before, 7);
/// assert_eq!(config.retry.max_retries, 5);
/// ```
#[derive(Debug, Clone)]
pub struct SlotscanConfigBuilder {
    config: SlotscanConfig,
}

impl Default for SlotscanConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotscanConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: SlotscanConfig::minimal(),
        }
    }

    /// Start with common defaults
    ///
    /// Initializes the builder with the same defaults as
    /// [`SlotscanConfig::with_common_defaults`].
    pub fn with_defaults() -> Self {
        Self {
            config: SlotscanConfig::with_common_defaults(),
        }
    }

    /// Set the days fetched before and after every window
    pub fn prefetch_margin(mut self, before: u32, after: u32) -> Self {
        self.config.prefetch_margin = PrefetchMargin::new(before, after);
        self
    }

    /// Set the maximum days per request (0 is treated as 1)
    pub fn max_days_per_request(mut self, days: u32) -> Self {
        self.config.max_days_per_request = MaxDaysPerRequest::new(days);
        self
    }

    /// Set the delay between consecutive requests
    pub fn request_delay(mut self, delay: Duration) -> Self {
        self.config.request_delay = Some(delay);
        self
    }

    pub fn no_request_delay(mut self) -> Self {
        self.config.request_delay = None;
        self
    }

    /// Set the HTTP request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Set the retry policy
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> SlotscanConfig {
        self.config
    }
}

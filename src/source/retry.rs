// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Retry wrapper with exponential backoff for availability sources.
//!
//! [`RetryingSource`] wraps any [`AvailabilitySource`] and retries requests
//! that failed with a transient error (see [`SourceError::is_retryable`]).
//! Retries happen inside a single `fetch_range` call, so the gap filler still
//! sees exactly one outcome per requested range.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::errors::SourceError;
use crate::source::AvailabilitySource;
use crate::types::identity::CacheIdentity;
use crate::types::range::DateRange;
use crate::types::slots::AvailabilityEntry;

/// Default maximum number of retry attempts.
const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default base delay for exponential backoff (100ms).
const DEFAULT_BASE_DELAY_MS: u64 = 100;
/// Default maximum delay between retries (30 seconds).
const DEFAULT_MAX_DELAY_MS: u64 = 30_000;

/// Configuration for retry behavior.
///
/// The delay before retry `n` (zero based) is:
///
/// ```text
/// delay = min(base_delay * 2^n, max_delay)
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not including the initial request).
    pub max_retries: u32,
    /// Base delay for exponential backoff.
    pub base_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
        }
    }
}

impl RetryConfig {
    /// Never retry.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Quick retries for interactive use: 5 attempts, 50ms base, 10s cap.
    pub fn aggressive() -> Self {
        Self {
            max_retries: 5,
            base_delay: Duration::from_millis(50),
            max_delay: Duration::from_secs(10),
        }
    }

    /// Patient retries for struggling backends: 3 attempts, 500ms base, 60s cap.
    pub fn conservative() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(60),
        }
    }

    /// Calculates the backoff duration for a given attempt.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let multiplier = 2u64.saturating_pow(attempt);
        let delay_ms = self
            .base_delay
            .as_millis()
            .saturating_mul(u128::from(multiplier));
        let capped_delay_ms = delay_ms.min(self.max_delay.as_millis()) as u64;
        Duration::from_millis(capped_delay_ms)
    }
}

/// An [`AvailabilitySource`] that retries transient failures of an inner source.
///
/// [`GapFiller`](crate::GapFiller) wraps its source in one of these using
/// [`SlotscanConfig::retry`](crate::SlotscanConfig::retry).
///
/// # Example
///
/// ```rust,ignore
/// use slotscan::{HttpAvailabilitySource, RetryConfig, RetryingSource};
///
/// let http = HttpAvailabilitySource::new(base_url, timeout)?;
/// let source = RetryingSource::new(http, RetryConfig::aggressive());
/// ```
#[derive(Clone, Debug)]
pub struct RetryingSource<S> {
    inner: S,
    config: RetryConfig,
}

impl<S: AvailabilitySource> RetryingSource<S> {
    pub fn new(inner: S, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    /// The wrapped source
    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }
}

#[async_trait]
impl<S: AvailabilitySource> AvailabilitySource for RetryingSource<S> {
    async fn fetch_range(
        &self,
        identity: &CacheIdentity,
        range: DateRange,
    ) -> Result<Vec<AvailabilityEntry>, SourceError> {
        let mut attempt = 0u32;
        loop {
            match self.inner.fetch_range(identity, range).await {
                Ok(entries) => {
                    if attempt > 0 {
                        debug!(attempt, %range, "Request succeeded after retry");
                    }
                    return Ok(entries);
                }
                Err(error) => {
                    if !error.is_retryable() {
                        debug!(error = %error, %range, "Non-retryable error, not retrying");
                        return Err(error);
                    }

                    if attempt >= self.config.max_retries {
                        warn!(
                            error = %error,
                            %range,
                            attempts = attempt + 1,
                            "Max retries exceeded"
                        );
                        return Err(error);
                    }

                    let delay = self.config.backoff(attempt);
                    warn!(
                        error = %error,
                        %range,
                        attempt = attempt + 1,
                        max_retries = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Retryable error, backing off"
                    );

                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

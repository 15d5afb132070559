// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for remote availability sources.
//!
//! A source error always concerns one request for one date range. The gap
//! filler logs it, leaves that range uncovered and moves on to the next one.

/// Errors that can occur while fetching availability from a remote source.
///
/// # Examples
///
/// ```rust
/// use slotscan::SourceError;
///
/// let err = SourceError::status(503, "https://clinic.example/availability");
/// assert!(err.is_retryable());
///
/// let err = SourceError::invalid_response("date \"32/01\" is not YYYY-MM-DD");
/// assert!(!err.is_retryable());
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The endpoint answered with a non-success HTTP status.
    #[error("Availability endpoint {url} returned status {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("Availability request to {url} timed out")]
    Timeout {
        /// Requested URL
        url: String,
    },

    /// The request failed below the HTTP layer (DNS, connection, TLS, ...).
    #[error("Availability request failed: {details}")]
    Transport {
        /// Description of the failure
        details: String,
        /// The underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The response could not be decoded into availability entries.
    ///
    /// This includes entries whose `date` is not a valid `YYYY-MM-DD` day.
    #[error("Invalid availability response: {details}")]
    InvalidResponse {
        /// Description of what was wrong with the response
        details: String,
    },

    /// The source was configured with a URL that cannot be used.
    #[error("Invalid availability endpoint URL: {details}")]
    InvalidUrl {
        /// Description of the problem
        details: String,
    },
}

impl SourceError {
    /// Create a `Status` error.
    pub fn status(status: u16, url: impl Into<String>) -> Self {
        SourceError::Status {
            status,
            url: url.into(),
        }
    }

    /// Create a `Timeout` error.
    pub fn timeout(url: impl Into<String>) -> Self {
        SourceError::Timeout { url: url.into() }
    }

    /// Create a `Transport` error from any error type.
    pub fn transport(
        details: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        SourceError::Transport {
            details: details.into(),
            source: Box::new(source),
        }
    }

    /// Create an `InvalidResponse` error.
    pub fn invalid_response(details: impl Into<String>) -> Self {
        SourceError::InvalidResponse {
            details: details.into(),
        }
    }

    /// Create an `InvalidUrl` error.
    pub fn invalid_url(details: impl Into<String>) -> Self {
        SourceError::InvalidUrl {
            details: details.into(),
        }
    }

    /// Whether retrying the same request might succeed.
    ///
    /// Timeouts, transport failures, rate limiting (429) and server errors
    /// (5xx) are transient. Client errors and undecodable responses are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            SourceError::Timeout { .. } | SourceError::Transport { .. } => true,
            SourceError::Status { status, .. } => *status == 429 || (500..600).contains(status),
            SourceError::InvalidResponse { .. } | SourceError::InvalidUrl { .. } => false,
        }
    }
}

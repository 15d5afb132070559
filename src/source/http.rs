// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP availability source
//!
//! Queries the booking backend's availability endpoint:
//!
//! ```text
//! GET {base_url}/availability?service_id=..&location_id=..&from=YYYY-MM-DD&to=YYYY-MM-DD
//! ```
//!
//! and expects a JSON array of `{ "date": "YYYY-MM-DD", "availableSlots": n }`.
//! `location_id` is omitted when the identity is not bound to a location.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, Instrument};
use url::Url;

use crate::config::SlotscanConfig;
use crate::errors::SourceError;
use crate::source::AvailabilitySource;
use crate::tracing::spans;
use crate::types::identity::CacheIdentity;
use crate::types::range::DateRange;
use crate::types::slots::AvailabilityEntry;

/// Path segment of the availability endpoint under the base URL
const AVAILABILITY_PATH: &str = "availability";

/// [`AvailabilitySource`] backed by the booking backend's REST endpoint
///
/// # Examples
///
/// ```rust,ignore
/// use slotscan::{HttpAvailabilitySource, SlotscanConfig};
///
/// let config = SlotscanConfig::default();
/// let source = HttpAvailabilitySource::from_config("https://clinic.example/api/v1", &config)?
///     .with_bearer_token(api_key);
/// ```
#[derive(Debug, Clone)]
pub struct HttpAvailabilitySource {
    client: reqwest::Client,
    base_url: Url,
    bearer_token: Option<String>,
}

impl HttpAvailabilitySource {
    /// Creates a source for `base_url` with the given request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SourceError::invalid_url(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SourceError::invalid_url(format!(
                "{base_url} cannot be used as a base URL"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::transport("failed to build HTTP client", e))?;

        Ok(Self {
            client,
            base_url,
            bearer_token: None,
        })
    }

    /// Creates a source using the request timeout from `config`
    ///
    /// `config.retry` is applied by [`GapFiller`](crate::GapFiller), which
    /// wraps this source in a [`RetryingSource`](crate::RetryingSource).
    pub fn from_config(base_url: &str, config: &SlotscanConfig) -> Result<Self, SourceError> {
        Self::new(base_url, config.request_timeout)
    }

    /// Sends `Authorization: Bearer <token>` with every request
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// The URL queried for `identity` and `range`
    pub fn request_url(&self, identity: &CacheIdentity, range: DateRange) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(AVAILABILITY_PATH);
        }
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("service_id", &identity.service_id);
            if let Some(location_id) = &identity.location_id {
                query.append_pair("location_id", location_id);
            }
            query
                .append_pair("from", &range.start.to_string())
                .append_pair("to", &range.end.to_string());
        }
        url
    }

    async fn get_entries(&self, url: Url) -> Result<Vec<AvailabilityEntry>, SourceError> {
        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify_request_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::status(status.as_u16(), url.as_str()));
        }

        response.json::<Vec<AvailabilityEntry>>().await.map_err(|e| {
            if e.is_decode() {
                SourceError::invalid_response(format!("undecodable body from {url}: {e}"))
            } else {
                classify_request_error(&url, e)
            }
        })
    }
}

fn classify_request_error(url: &Url, error: reqwest::Error) -> SourceError {
    if error.is_timeout() {
        SourceError::timeout(url.as_str())
    } else {
        SourceError::transport(format!("request to {url} failed"), error)
    }
}

#[async_trait]
impl AvailabilitySource for HttpAvailabilitySource {
    async fn fetch_range(
        &self,
        identity: &CacheIdentity,
        range: DateRange,
    ) -> Result<Vec<AvailabilityEntry>, SourceError> {
        let url = self.request_url(identity, range);
        let span = spans::http_fetch_range(identity, range);

        async move {
            debug!(url = %url, "Requesting availability");
            let entries = self.get_entries(url).await?;
            debug!(entries = entries.len(), "Received availability");
            Ok(entries)
        }
        .instrument(span)
        .await
    }

    fn name(&self) -> &'static str {
        "HttpAvailabilitySource"
    }
}

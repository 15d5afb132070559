// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use serde::{Deserialize, Serialize};

/// The query identity that scopes one logical availability cache
///
/// Availability differs per booked service and per clinic location, so a cache
/// built for one identity must never answer for another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheIdentity {
    pub service_id: String,
    pub location_id: Option<String>,
}

impl CacheIdentity {
    /// Identity for a service offered at any location
    pub fn new(service_id: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            location_id: None,
        }
    }

    /// Restrict the identity to a single location
    pub fn at_location(mut self, location_id: impl Into<String>) -> Self {
        self.location_id = Some(location_id.into());
        self
    }
}

impl fmt::Display for CacheIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location_id {
            Some(location) => write!(f, "{}@{}", self.service_id, location),
            None => write!(f, "{}@*", self.service_id),
        }
    }
}

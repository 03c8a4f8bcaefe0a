//! MBTA v3 HTTP client.
//!
//! One request per call, no retries. Every request is bounded by the
//! configured timeout.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::domain::{DataFormatError, RouteId, SourceKind, StopId};
use crate::error::Error;

use super::error::TransportError;
use super::source::TransitSource;
use super::types::{ArrivalResource, Envelope};

/// Default base URL for the MBTA v3 API.
pub const DEFAULT_BASE_URL: &str = "https://api-v3.mbta.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the MBTA client.
#[derive(Debug, Clone)]
pub struct MbtaConfig {
    /// Base URL for the API (defaults to production MBTA)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MbtaConfig {
    /// Create a config pointing at the production API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for MbtaConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// MBTA v3 API client.
#[derive(Debug, Clone)]
pub struct MbtaClient {
    http: reqwest::Client,
    base_url: String,
}

impl MbtaClient {
    /// Create a new client with the given configuration.
    pub fn new(config: MbtaConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Routes serving `stop`, as the raw `data` array.
    ///
    /// The raw form is what gets written to the route cache.
    pub async fn get_routes_for_stop(&self, stop: &StopId) -> Result<Vec<Value>, Error> {
        self.get_data("routes", &[("filter[stop]", stop.as_str().to_string())])
            .await
    }

    /// Up to `limit` predictions or schedules for `route` at `stop`.
    pub async fn get_arrivals(
        &self,
        kind: SourceKind,
        route: &RouteId,
        stop: &StopId,
        limit: u8,
    ) -> Result<Vec<ArrivalResource>, Error> {
        self.get_data(
            kind.resource(),
            &[
                ("page[limit]", limit.to_string()),
                ("filter[route]", route.as_str().to_string()),
                ("filter[stop]", stop.as_str().to_string()),
            ],
        )
        .await
    }

    /// GET `{base}/{resource}` and return the envelope's `data` array.
    async fn get_data<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, Error> {
        let url = format!("{}/{}", self.base_url, resource);
        debug!(%url, ?query, "querying MBTA");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Api {
                status: status.as_u16(),
                message: body,
            }
            .into());
        }

        let body = response.text().await?;

        let envelope: Envelope<T> = serde_json::from_str(&body)
            .map_err(|e| DataFormatError::json("API response", e))?;

        debug!(resource, count = envelope.data.len(), "MBTA response");
        Ok(envelope.data)
    }
}

impl TransitSource for MbtaClient {
    async fn routes_for_stop(&self, stop: &StopId) -> Result<Vec<Value>, Error> {
        self.get_routes_for_stop(stop).await
    }

    async fn arrivals(
        &self,
        kind: SourceKind,
        route: &RouteId,
        stop: &StopId,
        limit: u8,
    ) -> Result<Vec<ArrivalResource>, Error> {
        self.get_arrivals(kind, route, stop, limit).await
    }
}

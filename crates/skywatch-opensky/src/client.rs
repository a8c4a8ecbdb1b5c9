//! OpenSky REST API client.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::OpenSkyError;
use crate::token::TokenStore;

pub const DEFAULT_API_URL: &str = "https://opensky-network.org/api";

/// How far back `/flights/aircraft` is searched for the latest flight.
pub const DEFAULT_ROUTE_WINDOW: Duration = Duration::from_secs(12 * 60 * 60);

const STATES_ENDPOINT: &str = "states/all";
const FLIGHTS_ENDPOINT: &str = "flights/aircraft";
const METADATA_ENDPOINT: &str = "metadata/aircraft";

/// Outcome of an aircraft metadata lookup. OpenSky answers 404 for airframes
/// it has no record of, which is not an error for our callers.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataLookup {
    Found(Value),
    NotFound,
}

/// HTTP client for the OpenSky Network API.
pub struct OpenSkyClient {
    client: Client,
    base_url: String,
    tokens: Arc<TokenStore>,
    route_window: Duration,
}

impl OpenSkyClient {
    pub fn new(client: Client, base_url: impl Into<String>, tokens: Arc<TokenStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            tokens,
            route_window: DEFAULT_ROUTE_WINDOW,
        }
    }

    pub fn with_route_window(mut self, window: Duration) -> Self {
        self.route_window = window;
        self
    }

    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    fn authorized_get(&self, url: &str, token: &str, request_id: Option<&str>) -> RequestBuilder {
        let request = self.client.get(url).bearer_auth(token);
        match request_id {
            Some(value) if !value.is_empty() => request.header("X-Request-ID", value),
            _ => request,
        }
    }

    /// Fetch the current state vector snapshot (`/states/all`).
    ///
    /// A 401 means the cached token went stale: it is refreshed and the call
    /// retried exactly once.
    pub async fn states_all(&self, request_id: Option<&str>) -> Result<Value, OpenSkyError> {
        let url = format!("{}/{}", self.base_url, STATES_ENDPOINT);
        let token = self.tokens.ensure().await?;

        let response = self.authorized_get(&url, &token, request_id).send().await?;
        let response = if response.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!("OpenSky rejected access token, refreshing and retrying");
            let token = self.tokens.refresh().await?;
            self.authorized_get(&url, &token, request_id).send().await?
        } else {
            response
        };

        decode(STATES_ENDPOINT, response).await
    }

    /// Calls without a retry path drop a token OpenSky rejected, so the next
    /// request starts with a fresh grant.
    async fn forget_rejected_token(&self, response: &Response) {
        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!("OpenSky rejected access token, dropping it");
            self.tokens.invalidate().await;
        }
    }

    /// Fetch the most recent flight flown by `icao24` within the route window.
    pub async fn latest_flight(
        &self,
        icao24: &str,
        request_id: Option<&str>,
    ) -> Result<Option<Value>, OpenSkyError> {
        let url = format!("{}/{}", self.base_url, FLIGHTS_ENDPOINT);
        let token = self.tokens.ensure().await?;

        let (begin, end) = route_window_bounds(Utc::now().timestamp(), self.route_window);

        let response = self
            .authorized_get(&url, &token, request_id)
            .query(&[("icao24", icao24)])
            .query(&[("begin", begin), ("end", end)])
            .send()
            .await?;

        self.forget_rejected_token(&response).await;
        let records: Option<Vec<Value>> = decode(FLIGHTS_ENDPOINT, response).await?;
        Ok(records.and_then(last_record))
    }

    /// Fetch registration metadata for `icao24`.
    pub async fn aircraft_metadata(
        &self,
        icao24: &str,
        request_id: Option<&str>,
    ) -> Result<MetadataLookup, OpenSkyError> {
        let url = format!("{}/{}/icao/{}", self.base_url, METADATA_ENDPOINT, icao24);
        let token = self.tokens.ensure().await?;

        let response = self.authorized_get(&url, &token, request_id).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(icao24, "No OpenSky metadata for aircraft");
            return Ok(MetadataLookup::NotFound);
        }
        self.forget_rejected_token(&response).await;

        decode(METADATA_ENDPOINT, response)
            .await
            .map(MetadataLookup::Found)
    }
}

/// `(begin, end)` unix seconds for a lookback of `window` ending at `end`.
/// Oversized windows clamp rather than overflow.
pub fn route_window_bounds(end: i64, window: Duration) -> (i64, i64) {
    let span = i64::try_from(window.as_secs()).unwrap_or(i64::MAX);
    (end.saturating_sub(span), end)
}

/// OpenSky returns flights oldest first; the route of interest is the last.
pub fn last_record(mut records: Vec<Value>) -> Option<Value> {
    records.pop()
}

async fn decode<T: DeserializeOwned>(
    endpoint: &'static str,
    response: Response,
) -> Result<T, OpenSkyError> {
    let status = response.status();
    if !status.is_success() {
        return Err(OpenSkyError::Status { endpoint, status });
    }
    response
        .json()
        .await
        .map_err(|source| OpenSkyError::Decode { endpoint, source })
}

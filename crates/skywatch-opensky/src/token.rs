//! OAuth client-credentials token store for the OpenSky API.
//!
//! Holds a single bearer token for the lifetime of the process. Expiry is not
//! tracked: a stale token is only noticed when the API answers 401, at which
//! point the caller asks for a [`TokenStore::refresh`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::OpenSkyError;

pub const DEFAULT_TOKEN_URL: &str =
    "https://auth.opensky-network.org/auth/realms/opensky-network/protocol/openid-connect/token";

const TOKEN_ENDPOINT: &str = "token";

#[derive(Clone)]
pub struct ClientCredentials {
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl ClientCredentials {
    pub fn is_configured(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.client_secret.trim().is_empty()
    }
}

#[derive(Debug, Serialize)]
struct OAuthTokenRequest<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

#[derive(Debug, Deserialize)]
struct OAuthTokenResponse {
    access_token: String,
}

pub struct TokenStore {
    credentials: ClientCredentials,
    client: Client,
    cached: RwLock<Option<String>>,
    acquisitions: AtomicU64,
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore")
            .field("credentials", &self.credentials)
            .field("acquisitions", &self.acquisitions())
            .finish_non_exhaustive()
    }
}

impl TokenStore {
    pub fn new(client: Client, credentials: ClientCredentials) -> Self {
        Self {
            credentials,
            client,
            cached: RwLock::new(None),
            acquisitions: AtomicU64::new(0),
        }
    }

    /// The cached token, if one has been acquired.
    pub async fn current(&self) -> Option<String> {
        self.cached.read().await.clone()
    }

    /// Return the cached token, acquiring one first if the slot is empty.
    pub async fn ensure(&self) -> Result<String, OpenSkyError> {
        if let Some(token) = self.current().await {
            return Ok(token);
        }
        tracing::info!("No access token cached, fetching a new one");
        self.refresh().await
    }

    /// Perform a client-credentials grant and replace the cached token.
    ///
    /// Any failure leaves the slot empty. The lock is not held across the
    /// network call, so concurrent refreshes race and the last write wins.
    pub async fn refresh(&self) -> Result<String, OpenSkyError> {
        self.acquisitions.fetch_add(1, Ordering::Relaxed);
        tracing::info!("Requesting new OpenSky access token");

        match self.request_token().await {
            Ok(token) => {
                *self.cached.write().await = Some(token.clone());
                tracing::info!("Received new OpenSky access token");
                Ok(token)
            }
            Err(err) => {
                *self.cached.write().await = None;
                tracing::error!(error = %err, "Could not get OpenSky access token");
                Err(OpenSkyError::auth(err))
            }
        }
    }

    /// Drop the cached token so the next [`TokenStore::ensure`] grants anew.
    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }

    /// Number of grant attempts made so far, successful or not.
    pub fn acquisitions(&self) -> u64 {
        self.acquisitions.load(Ordering::Relaxed)
    }

    async fn request_token(&self) -> Result<String, OpenSkyError> {
        let request = OAuthTokenRequest {
            grant_type: "client_credentials",
            client_id: self.credentials.client_id.as_str(),
            client_secret: self.credentials.client_secret.as_str(),
        };

        let response = self
            .client
            .post(self.credentials.token_url.as_str())
            .form(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(%status, %body, "OpenSky token endpoint error body");
            return Err(OpenSkyError::Status {
                endpoint: TOKEN_ENDPOINT,
                status,
            });
        }

        let payload: OAuthTokenResponse = response
            .json()
            .await
            .map_err(|source| OpenSkyError::Decode {
                endpoint: TOKEN_ENDPOINT,
                source,
            })?;

        let token = payload.access_token.trim();
        if token.is_empty() {
            return Err(OpenSkyError::EmptyToken);
        }
        Ok(token.to_string())
    }
}

//! Server configuration from environment.

use std::env;
use std::fmt;
use std::time::Duration;

use skywatch_opensky::{ClientCredentials, DEFAULT_API_URL, DEFAULT_ROUTE_WINDOW, DEFAULT_TOKEN_URL};

#[derive(Clone)]
pub struct Config {
    pub server_port: u16,
    pub opensky_client_id: String,
    pub opensky_client_secret: String,
    pub opensky_auth_url: String,
    pub opensky_api_url: String,
    /// Lookback for `/api/flight_route`, in seconds.
    pub route_lookback_s: u64,
    /// Upstream request timeout. `None` leaves reqwest's default in place.
    pub http_timeout_s: Option<u64>,
    pub static_dir: String,
    pub log_json: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server_port", &self.server_port)
            .field("opensky_client_id", &self.opensky_client_id)
            .field("opensky_client_secret", &"<redacted>")
            .field("opensky_auth_url", &self.opensky_auth_url)
            .field("opensky_api_url", &self.opensky_api_url)
            .field("route_lookback_s", &self.route_lookback_s)
            .field("http_timeout_s", &self.http_timeout_s)
            .field("static_dir", &self.static_dir)
            .field("log_json", &self.log_json)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            server_port: non_empty("PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            opensky_client_id: non_empty("OPENSKY_USER").unwrap_or_default(),
            opensky_client_secret: non_empty("OPENSKY_SECRET").unwrap_or_default(),
            opensky_auth_url: non_empty("OPENSKY_AUTH_URL")
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            opensky_api_url: non_empty("OPENSKY_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            route_lookback_s: non_empty("ROUTE_LOOKBACK_S")
                .and_then(|s| s.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_ROUTE_WINDOW.as_secs()),
            http_timeout_s: non_empty("OPENSKY_HTTP_TIMEOUT_S")
                .and_then(|s| s.parse().ok())
                .filter(|secs| *secs > 0),
            static_dir: non_empty("STATIC_DIR").unwrap_or_else(|| "public".to_string()),
            log_json: non_empty("LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
        }
    }

    pub fn credentials(&self) -> ClientCredentials {
        ClientCredentials {
            token_url: self.opensky_auth_url.clone(),
            client_id: self.opensky_client_id.clone(),
            client_secret: self.opensky_client_secret.clone(),
        }
    }

    pub fn route_window(&self) -> Duration {
        Duration::from_secs(self.route_lookback_s)
    }

    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = self.http_timeout_s {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }
}

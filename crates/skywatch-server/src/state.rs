//! Shared application state handed to every request handler.

use std::sync::Arc;

use skywatch_opensky::{OpenSkyClient, TokenStore};

use crate::config::Config;

pub struct AppState {
    opensky: OpenSkyClient,
    config: Config,
}

impl AppState {
    pub fn new(config: Config) -> reqwest::Result<Self> {
        let http = config.http_client()?;
        let tokens = Arc::new(TokenStore::new(http.clone(), config.credentials()));
        let opensky = OpenSkyClient::new(http, config.opensky_api_url.clone(), tokens)
            .with_route_window(config.route_window());
        Ok(Self { opensky, config })
    }

    pub fn opensky(&self) -> &OpenSkyClient {
        &self.opensky
    }

    pub fn tokens(&self) -> &TokenStore {
        self.opensky.tokens()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

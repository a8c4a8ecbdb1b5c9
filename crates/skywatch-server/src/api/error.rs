//! HTTP error mapping for proxy handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use skywatch_opensky::OpenSkyError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("ICAO24 identifier is required")]
    MissingIcao,
    #[error("ICAO24 identifier must be 6 hexadecimal characters")]
    InvalidIcao,
    #[error("Malformed query string")]
    MalformedQuery,
    #[error("Could not authenticate with OpenSky API.")]
    Unauthenticated,
    #[error("{message}")]
    Upstream { message: &'static str },
}

impl ApiError {
    /// Map an upstream failure to what the client sees. Token failures become
    /// 503; everything else collapses into the handler's generic message.
    pub fn from_opensky(err: &OpenSkyError, message: &'static str) -> Self {
        if err.is_auth() {
            Self::Unauthenticated
        } else {
            Self::Upstream { message }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingIcao | Self::InvalidIcao | Self::MalformedQuery => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::SERVICE_UNAVAILABLE,
            Self::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

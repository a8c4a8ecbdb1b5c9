//! Upstream authentication gate for proxied endpoints.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::error::ApiError;
use crate::state::AppState;

/// Middleware that makes sure an OpenSky bearer token is cached before the
/// handler runs, acquiring one if needed. Answers 503 when none can be had.
pub async fn require_token(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    match state.tokens().ensure().await {
        Ok(_) => next.run(request).await,
        Err(err) => {
            tracing::error!(error = %err, "Rejecting request, no OpenSky access token");
            ApiError::Unauthenticated.into_response()
        }
    }
}

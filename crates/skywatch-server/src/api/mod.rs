//! API routes for the skywatch proxy.

pub mod auth;
pub mod error;
pub mod icao;
pub mod proxy;
pub mod request_id;
mod routes;

use crate::state::AppState;
use axum::Router;
use std::sync::Arc;

pub fn routes(state: Arc<AppState>) -> Router {
    routes::create_router(state)
}

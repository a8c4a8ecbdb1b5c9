//! REST API routes.

use std::sync::Arc;

use axum::{middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::api::{auth, proxy, request_id};
use crate::state::AppState;

/// Create the API router, with the dashboard's static assets as fallback.
pub fn create_router(state: Arc<AppState>) -> Router {
    // Every proxied route needs an upstream token before it runs
    let proxied_routes = Router::new()
        .route("/api/flights", get(proxy::get_flights))
        .route("/api/flight_route", get(proxy::get_flight_route))
        .route("/api/aircraft_meta", get(proxy::get_aircraft_meta))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_token,
        ));

    let static_files =
        ServeDir::new(&state.config().static_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/api", get(api_index))
        .route("/health", get(|| async { "OK" }))
        .merge(proxied_routes)
        .fallback_service(static_files)
        .layer(middleware::from_fn(request_id::propagate_request_id))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn api_index() -> Json<Value> {
    Json(json!({ "message": "Hello from the API server!" }))
}

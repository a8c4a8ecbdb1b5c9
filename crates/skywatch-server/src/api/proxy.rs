//! Read-only passthrough handlers for the OpenSky endpoints the dashboard polls.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use serde_json::{json, Value};
use skywatch_opensky::MetadataLookup;

use crate::api::error::ApiError;
use crate::api::icao::{Icao24, IcaoQuery};
use crate::api::request_id::RequestId;
use crate::state::AppState;

const FLIGHTS_FAILED: &str = "Failed to fetch flight data.";
const ROUTE_FAILED: &str = "Failed to fetch flight route.";
const METADATA_FAILED: &str = "Failed to fetch aircraft metadata.";

pub const NO_METADATA_MESSAGE: &str = "No metadata available.";

fn request_id(extension: &Option<Extension<RequestId>>) -> Option<&str> {
    extension.as_ref().map(|Extension(id)| id.as_str())
}

/// `GET /api/flights` - current state vectors, verbatim.
pub async fn get_flights(
    State(state): State<Arc<AppState>>,
    request_id_ext: Option<Extension<RequestId>>,
) -> Result<Json<Value>, ApiError> {
    tracing::info!("Fetching all flight data");
    state
        .opensky()
        .states_all(request_id(&request_id_ext))
        .await
        .map(Json)
        .map_err(|err| {
            tracing::error!(error = %err, "Error fetching all flights data");
            ApiError::from_opensky(&err, FLIGHTS_FAILED)
        })
}

/// `GET /api/flight_route?icao=` - the aircraft's most recent flight, or `null`.
pub async fn get_flight_route(
    State(state): State<Arc<AppState>>,
    request_id_ext: Option<Extension<RequestId>>,
    query: Result<Query<IcaoQuery>, QueryRejection>,
) -> Result<Json<Option<Value>>, ApiError> {
    let icao: Icao24 = IcaoQuery::resolve(query)?;
    tracing::info!(%icao, "Fetching route");

    state
        .opensky()
        .latest_flight(icao.as_str(), request_id(&request_id_ext))
        .await
        .map(Json)
        .map_err(|err| {
            tracing::error!(%icao, error = %err, "Error fetching flight route");
            ApiError::from_opensky(&err, ROUTE_FAILED)
        })
}

/// `GET /api/aircraft_meta?icao=` - registration metadata, with a placeholder
/// message when OpenSky has none.
pub async fn get_aircraft_meta(
    State(state): State<Arc<AppState>>,
    request_id_ext: Option<Extension<RequestId>>,
    query: Result<Query<IcaoQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let icao: Icao24 = IcaoQuery::resolve(query)?;
    tracing::info!(%icao, "Fetching metadata");

    let lookup = state
        .opensky()
        .aircraft_metadata(icao.as_str(), request_id(&request_id_ext))
        .await
        .map_err(|err| {
            tracing::error!(%icao, error = %err, "Error fetching aircraft metadata");
            ApiError::from_opensky(&err, METADATA_FAILED)
        })?;

    Ok(Json(match lookup {
        MetadataLookup::Found(metadata) => metadata,
        MetadataLookup::NotFound => json!({ "message": NO_METADATA_MESSAGE }),
    }))
}

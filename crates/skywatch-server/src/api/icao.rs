use std::fmt;

use axum::extract::{rejection::QueryRejection, Query};
use serde::Deserialize;

use crate::api::error::ApiError;

/// `?icao=` query accepted by the per-aircraft endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct IcaoQuery {
    pub icao: Option<String>,
}

impl IcaoQuery {
    /// Resolve the extracted query into an address. Malformed query strings
    /// (a repeated `icao`, say) get the same JSON error body as a bad value.
    pub fn resolve(query: Result<Query<Self>, QueryRejection>) -> Result<Icao24, ApiError> {
        let Query(query) = query.map_err(|rejection| {
            tracing::debug!(%rejection, "Rejecting malformed query string");
            ApiError::MalformedQuery
        })?;
        Icao24::parse(query.icao.as_deref())
    }
}

/// A normalized ICAO 24-bit transponder address (6 lower-case hex digits).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icao24(String);

impl Icao24 {
    pub fn parse(raw: Option<&str>) -> Result<Self, ApiError> {
        let value = raw.map(str::trim).unwrap_or_default();
        if value.is_empty() {
            return Err(ApiError::MissingIcao);
        }
        if value.len() != 6 || !value.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ApiError::InvalidIcao);
        }
        Ok(Self(value.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Icao24 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

//! Skywatch OpenSky - OpenSky Network API client
//!
//! Handles OAuth client-credentials authentication and the handful of
//! REST endpoints the skywatch dashboard needs.

pub mod client;
pub mod error;
pub mod token;

pub use client::{last_record, MetadataLookup, OpenSkyClient, DEFAULT_API_URL, DEFAULT_ROUTE_WINDOW};
pub use error::OpenSkyError;
pub use token::{ClientCredentials, TokenStore, DEFAULT_TOKEN_URL};

//! Shared library surface for the skywatch proxy server and its tests.

pub mod api;
pub mod config;
pub mod state;

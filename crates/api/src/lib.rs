//! HTTP API for the workout tracker.
//!
//! Exposed as a library so the binaries and the integration tests can build
//! the router and reuse the configuration.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod services;

//! HTTP surface for the credential-encoding service.
//!
//! This module wires the domain core from the `hashvault` crate into an
//! axum router: configuration, route handlers, per-request statistics, and
//! logging setup.
//!
//! ## Structure
//!
//! - [`config`] - CLI/environment configuration and validation.
//! - [`routes`] - handlers, router assembly, and error-to-status mapping.
//! - [`telemetry`] - console logging via `tracing-subscriber`.
//! - [`timing`] - middleware feeding the request-statistics aggregator.

pub mod config;
pub mod routes;
pub mod telemetry;
pub mod timing;

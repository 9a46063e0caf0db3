//! # greenhouse-adapter-collector-http
//!
//! Pushes telemetry payloads to the remote collector.
//!
//! ## Responsibilities
//! - Build a `reqwest` client with the configured timeout
//! - Implement the `TelemetryCollector` port: `POST` the JSON payload with a
//!   bearer token, treating any non-2xx answer as a rejection
//!
//! ## Dependency rule
//! Depends on `greenhouse-app` (for the port) and `greenhouse-domain` (for
//! the payload). `reqwest` types never leave this crate except as error
//! sources.

pub mod client;
pub mod config;
pub mod error;

pub use client::HttpCollector;
pub use config::CollectorConfig;
pub use error::CollectorError;

//! # greenhouse-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **current snapshot** as JSON (`/api/data`), as the raw report
//!   line (`/data`) and as a server-sent event stream (`/api/data/stream`)
//! - Accept **actuator commands** as a query parameter (`/command?cmd=…`) or
//!   a JSON body (`POST /api/control`) and hand them to the `CommandRouter`
//! - Map application errors into HTTP responses: client errors for rejected
//!   commands, server errors for a failing actuator channel
//!
//! ## Dependency rule
//! Depends on `greenhouse-app` (for the store, ports and services) and
//! `greenhouse-domain` (for payload and command types). Never leaks axum
//! types into the domain.

pub mod api;
pub mod error;
pub mod plain;
pub mod router;
pub mod state;

//! # greenhouse-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ReportSource`: yields raw report lines from the controller
//!   - `ActuatorChannel`: carries command lines to the controller
//!   - `TelemetryCollector`: pushes snapshots to the remote collector
//! - Own the single-slot **`SnapshotStore`** shared by ingestion and serving
//! - Provide the **use cases**:
//!   - `CommandRouter`: validate a command token, then dispatch it
//!   - `IngestionLoop`: read, parse, store, forward
//!
//! ## Dependency rule
//! Depends on `greenhouse-domain` only (plus `tokio::sync` / `tokio::time`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ingestion;
pub mod ports;
pub mod services;
pub mod store;

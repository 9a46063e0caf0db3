//! # greenhouse-domain
//!
//! Pure domain model for the greenhouse telemetry-and-control bridge.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define the **sensor snapshot** (one fully-populated sensor report)
//! - Parse the **report line** sent by the microcontroller into a snapshot
//! - Define the **command grammar** accepted on the actuator channel
//! - Decide **when to forward** a snapshot to the remote collector
//! - Define the **telemetry payload** shared by the read API and the collector push
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod command;
pub mod forwarding;
pub mod payload;
pub mod report;
pub mod snapshot;

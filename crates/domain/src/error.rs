//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`BridgeError`]
//! at port boundaries (`#[from]` or an adapter-specific `into_domain`).

use crate::command::CommandError;

/// Boxed source error coming from an adapter (serial port, HTTP client, …).
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error for the bridge core.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The command token was missing or did not match the grammar.
    #[error("command rejected")]
    Command(#[from] CommandError),

    /// Writing to the actuator channel failed.
    #[error("actuator channel error")]
    Actuator(#[source] SourceError),

    /// Pushing a snapshot to the remote collector failed.
    #[error("forwarding failed")]
    Forwarding(#[source] SourceError),

    /// The report source has been closed and no more lines will arrive.
    #[error("report source closed")]
    SourceClosed,
}

//! Collector adapter error types.

use greenhouse_domain::error::BridgeError;

/// Errors specific to the collector adapter.
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent or timed out.
    #[error("collector request failed")]
    Request(#[source] reqwest::Error),

    /// The collector answered with a non-success status.
    #[error("collector rejected payload with status {status}")]
    Rejected { status: reqwest::StatusCode },
}

impl CollectorError {
    /// Convert into a [`BridgeError::Forwarding`] for propagation across port
    /// boundaries.
    pub fn into_domain(self) -> BridgeError {
        BridgeError::Forwarding(Box::new(self))
    }
}

impl From<CollectorError> for BridgeError {
    fn from(err: CollectorError) -> Self {
        err.into_domain()
    }
}

//! Collector port: pushes snapshots to the remote telemetry collector.

use std::future::Future;

use greenhouse_domain::error::BridgeError;
use greenhouse_domain::payload::TelemetryPayload;

/// Remote endpoint receiving periodic snapshots.
///
/// Implementations report failures as [`BridgeError::Forwarding`] and never
/// retry on their own.
pub trait TelemetryCollector {
    /// Push one payload.
    fn push(
        &self,
        payload: &TelemetryPayload,
    ) -> impl Future<Output = Result<(), BridgeError>> + Send;
}

impl<T: TelemetryCollector + Send + Sync> TelemetryCollector for std::sync::Arc<T> {
    fn push(
        &self,
        payload: &TelemetryPayload,
    ) -> impl Future<Output = Result<(), BridgeError>> + Send {
        (**self).push(payload)
    }
}

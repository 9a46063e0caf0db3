//! Shared application state for axum handlers.

use std::sync::Arc;

use greenhouse_app::ports::ActuatorChannel;
use greenhouse_app::services::command_router::CommandRouter;
use greenhouse_app::store::SnapshotStore;
use greenhouse_domain::payload::TelemetryPayload;

/// Application state shared across all axum handlers.
///
/// Generic over the actuator channel to avoid dynamic dispatch.
/// `Clone` is implemented manually so the channel itself does not need to
/// be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<A> {
    /// Latest device state, written by the ingestion loop.
    pub store: Arc<SnapshotStore>,
    /// Validates and dispatches actuator commands.
    pub command_router: Arc<CommandRouter<A>>,
    /// Identifier reported as `deviceId` in payloads.
    pub device_id: Arc<str>,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            command_router: Arc::clone(&self.command_router),
            device_id: Arc::clone(&self.device_id),
        }
    }
}

impl<A> AppState<A>
where
    A: ActuatorChannel + Send + Sync + 'static,
{
    /// Create a new application state.
    pub fn new(
        store: Arc<SnapshotStore>,
        command_router: CommandRouter<A>,
        device_id: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            store,
            command_router: Arc::new(command_router),
            device_id: device_id.into(),
        }
    }

    /// Payload describing the current snapshot.
    #[must_use]
    pub fn current_payload(&self) -> TelemetryPayload {
        let state = self.store.read();
        TelemetryPayload::from_snapshot(&*self.device_id, &state.snapshot)
    }
}

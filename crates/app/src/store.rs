//! Snapshot store: the single slot holding the device's latest state.
//!
//! Backed by a tokio [`watch`] channel of `Arc<DeviceState>`. Every update
//! builds a complete new [`DeviceState`] and swaps the pointer, so a reader
//! holds the lock only for an `Arc` clone and always sees either the previous
//! state or the new one, never a mix of both.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;

use greenhouse_domain::snapshot::SensorSnapshot;
use greenhouse_domain::time::Timestamp;

/// Raw line reported before the controller has sent anything.
pub const WAITING_FOR_DATA: &str = "Waiting for sensor data...";

/// Latest known state of the greenhouse controller.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceState {
    /// Current snapshot; the idle snapshot until the first report.
    pub snapshot: SensorSnapshot,
    /// Line the snapshot was parsed from; `None` until the first report.
    pub raw_line: Option<String>,
    /// Monotonic time of the last forward attempt, if any.
    pub last_forwarded_at: Option<Instant>,
}

impl DeviceState {
    fn initial(started_at: Timestamp) -> Self {
        Self {
            snapshot: SensorSnapshot::idle(started_at),
            raw_line: None,
            last_forwarded_at: None,
        }
    }

    /// Whether at least one report has been ingested.
    #[must_use]
    pub fn have_data(&self) -> bool {
        self.raw_line.is_some()
    }

    /// The last raw line, or a placeholder before the first report.
    #[must_use]
    pub fn raw_line_or_placeholder(&self) -> &str {
        self.raw_line.as_deref().unwrap_or(WAITING_FOR_DATA)
    }

    #[must_use]
    pub fn captured_at(&self) -> Timestamp {
        self.snapshot.captured_at
    }
}

/// Single-slot holder of the [`DeviceState`].
///
/// Written only by the ingestion loop; read concurrently by HTTP handlers
/// and the forwarding step.
pub struct SnapshotStore {
    state: watch::Sender<Arc<DeviceState>>,
}

impl SnapshotStore {
    /// Create the store with the idle snapshot stamped at `started_at`.
    #[must_use]
    pub fn new(started_at: Timestamp) -> Self {
        let (state, _) = watch::channel(Arc::new(DeviceState::initial(started_at)));
        Self { state }
    }

    /// Current state. Cheap: clones an `Arc`.
    #[must_use]
    pub fn read(&self) -> Arc<DeviceState> {
        self.state.borrow().clone()
    }

    /// Replace the snapshot and raw line. No history is kept.
    pub fn replace(&self, raw_line: String, snapshot: SensorSnapshot) {
        self.state.send_modify(|current| {
            *current = Arc::new(DeviceState {
                snapshot,
                raw_line: Some(raw_line),
                last_forwarded_at: current.last_forwarded_at,
            });
        });
    }

    /// Record a forward attempt at `at`. Subscribers are not notified.
    pub fn mark_forwarded(&self, at: Instant) {
        self.state.send_if_modified(|current| {
            let mut next = (**current).clone();
            next.last_forwarded_at = Some(at);
            *current = Arc::new(next);
            false
        });
    }

    /// Subscribe to snapshot replacements.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<DeviceState>> {
        self.state.subscribe()
    }
}

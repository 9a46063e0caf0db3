//! Ingestion loop: the single control loop fed by the controller's reports.
//!
//! ```text
//! WAITING ──line──▶ PROCESSING: parse → replace snapshot → start forward if due ──▶ WAITING
//! ```
//!
//! Processing always completes: malformed fields fall back to defaults and a
//! failed forward is logged, so no single line or push can stop the loop.

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use greenhouse_domain::error::BridgeError;
use greenhouse_domain::forwarding::ForwardingPolicy;
use greenhouse_domain::payload::TelemetryPayload;
use greenhouse_domain::report;
use greenhouse_domain::time;

use crate::ports::{ReportSource, TelemetryCollector};
use crate::store::SnapshotStore;

/// What happened to one ingested line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Snapshot replaced, nothing forwarded.
    Stored,
    /// Snapshot replaced and a push to the collector started in the background.
    ForwardStarted,
    /// Snapshot replaced; a forward was due but the previous push is still running.
    ForwardBusy,
}

/// Reads report lines, keeps the [`SnapshotStore`] current and forwards
/// snapshots to the remote collector at a bounded rate.
///
/// Pushes run on their own task, one at a time, so a slow or failing
/// collector never holds back the next report.
pub struct IngestionLoop<S, C> {
    source: S,
    store: Arc<SnapshotStore>,
    collector: Option<Arc<C>>,
    policy: ForwardingPolicy,
    device_id: String,
    in_flight: Option<JoinHandle<()>>,
}

impl<S, C> IngestionLoop<S, C>
where
    S: ReportSource + Send,
    C: TelemetryCollector + Send + Sync + 'static,
{
    /// Create a loop without forwarding.
    pub fn new(source: S, store: Arc<SnapshotStore>, device_id: impl Into<String>) -> Self {
        Self {
            source,
            store,
            collector: None,
            policy: ForwardingPolicy::default(),
            device_id: device_id.into(),
            in_flight: None,
        }
    }

    /// Forward snapshots to `collector`, rate-limited by `policy`.
    #[must_use]
    pub fn with_collector(mut self, collector: C, policy: ForwardingPolicy) -> Self {
        self.collector = Some(Arc::new(collector));
        self.policy = policy;
        self
    }

    /// Run until `shutdown` resolves or the source closes.
    ///
    /// A push still running at that point is awaited before returning; it is
    /// bounded by the collector's own timeout.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::SourceClosed`] when the report source stops
    /// delivering lines. Returns `Ok(())` on shutdown.
    pub async fn run(
        mut self,
        shutdown: impl Future<Output = ()> + Send,
    ) -> Result<(), BridgeError> {
        tokio::pin!(shutdown);
        tracing::info!(
            device_id = %self.device_id,
            forwarding = self.collector.is_some(),
            "ingestion loop started"
        );

        let result = loop {
            tokio::select! {
                () = &mut shutdown => {
                    tracing::info!("ingestion loop stopped");
                    break Ok(());
                }
                line = self.source.next_line() => match line {
                    Some(line) => {
                        self.process_line(&line);
                    }
                    None => {
                        tracing::warn!("report source closed, ingestion loop stopped");
                        break Err(BridgeError::SourceClosed);
                    }
                },
            }
        };

        self.wait_for_forward().await;
        result
    }

    /// Parse one line, replace the snapshot and start a forward if due.
    pub fn process_line(&mut self, line: &str) -> LineOutcome {
        let line = line.trim_end_matches(['\r', '\n']);
        let parsed = report::parse(line, time::now());
        for field in &parsed.malformed {
            tracing::warn!(
                key = %field.key,
                value = %field.value,
                "malformed report field, using default"
            );
        }
        tracing::info!(raw = line, "report received");

        let previous = self.store.read();
        if parsed.snapshot.has_rfid_tag() && parsed.snapshot.rfid_tag != previous.snapshot.rfid_tag
        {
            tracing::info!(tag = %parsed.snapshot.rfid_tag, "rfid tag presented");
        }

        self.store.replace(line.to_string(), parsed.snapshot);
        self.forward_if_due()
    }

    fn forward_if_due(&mut self) -> LineOutcome {
        let Some(collector) = &self.collector else {
            return LineOutcome::Stored;
        };

        let state = self.store.read();
        let now = Instant::now().into_std();
        if !self
            .policy
            .should_forward(now, state.last_forwarded_at, state.have_data())
        {
            return LineOutcome::Stored;
        }

        if self
            .in_flight
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
        {
            tracing::debug!("previous forward still running, skipping");
            return LineOutcome::ForwardBusy;
        }

        // The timer advances when the attempt starts, whatever its outcome.
        self.store.mark_forwarded(now);
        let payload = TelemetryPayload::from_snapshot(&self.device_id, &state.snapshot);
        let collector = Arc::clone(collector);
        self.in_flight = Some(tokio::spawn(async move {
            match collector.push(&payload).await {
                Ok(()) => tracing::info!("snapshot forwarded to collector"),
                Err(err) => tracing::warn!(
                    error = %err,
                    source = ?std::error::Error::source(&err),
                    "failed to forward snapshot"
                ),
            }
        }));
        LineOutcome::ForwardStarted
    }

    async fn wait_for_forward(&mut self) {
        let Some(handle) = self.in_flight.take() else {
            return;
        };
        if let Err(err) = handle.await {
            tracing::error!(error = %err, "forward task failed");
        }
    }
}

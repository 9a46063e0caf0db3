//! # greenhoused: greenhouse bridge daemon
//!
//! Composition root that wires all adapters together and starts the bridge.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars) and initialise logging
//! - Open the serial link to the controller and start its reader thread
//! - Build the collector client when a collector URL is configured
//! - Spawn the ingestion loop and serve the HTTP surface
//! - Handle graceful shutdown (SIGTERM/SIGINT), and stop when the serial
//!   link goes away
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing_subscriber::EnvFilter;

use greenhouse_adapter_collector_http::HttpCollector;
use greenhouse_adapter_http_axum::state::AppState;
use greenhouse_app::ingestion::IngestionLoop;
use greenhouse_app::services::command_router::CommandRouter;
use greenhouse_app::store::SnapshotStore;
use greenhouse_domain::forwarding::ForwardingPolicy;
use greenhouse_domain::time;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Serial link
    let (lines, actuator) = greenhouse_adapter_serial::connect(&config.serial)?;

    // Ingestion
    let store = Arc::new(SnapshotStore::new(time::now()));
    let mut ingestion = IngestionLoop::new(lines, Arc::clone(&store), config.device.id.as_str());
    if let Some(collector) = HttpCollector::from_config(&config.collector)? {
        tracing::info!(url = collector.url(), "forwarding to collector enabled");
        ingestion = ingestion.with_collector(
            collector,
            ForwardingPolicy::new(config.collector.interval()),
        );
    }

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let (ended_tx, ended_rx) = oneshot::channel::<()>();
    let ingestion = tokio::spawn(async move {
        let result = ingestion
            .run(async {
                let _ = stop_rx.await;
            })
            .await;
        let _ = ended_tx.send(());
        result
    });

    // HTTP
    let state = AppState::new(
        store,
        CommandRouter::new(actuator),
        config.device.id.as_str(),
    );
    let app = greenhouse_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, device_id = %config.device.id, "greenhoused listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                () = shutdown_signal() => {}
                _ = ended_rx => {}
            }
        })
        .await?;

    let _ = stop_tx.send(());
    ingestion.await??;
    tracing::info!("greenhoused stopped");

    Ok(())
}

/// Resolve on SIGINT, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}

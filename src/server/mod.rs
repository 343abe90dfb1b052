//! HTTP ingestion server.
//!
//! One write route, `POST /api/dump`, plus a `GET /health` probe that a
//! second instance (or a curious client) can use to see whether the port is
//! already taken by a running dumpdeck.

mod dump;

use crate::config::Config;
use crate::error::Error;
use crate::handoff::SnapshotSender;
use crate::store::EventStore;
use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Shared state accessible from the handlers.
#[derive(Clone)]
pub struct AppState {
    /// The session event store.
    pub store: Arc<EventStore>,
    /// Rendezvous sender toward the dashboard.
    pub updates: SnapshotSender,
    /// When the server started.
    pub start_time: Instant,
}

impl AppState {
    /// Bundle the shared handles.
    pub fn new(store: Arc<EventStore>, updates: SnapshotSender) -> Self {
        Self {
            store,
            updates,
            start_time: Instant::now(),
        }
    }
}

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/dump", post(dump::dump))
        .route("/health", get(health))
        .with_state(state)
}

/// Bind the configured address, synchronously and outside any runtime.
///
/// Done before the dashboard takes over the terminal, so a port already in
/// use (say, another running dumpdeck) fails loudly on a usable stderr.
pub fn bind(config: &Config) -> Result<std::net::TcpListener, Error> {
    let addr = config.socket_addr()?;
    let listener = std::net::TcpListener::bind(addr)
        .map_err(|e| Error::Server(format!("failed to bind {addr}: {e}")))?;
    listener
        .set_nonblocking(true)
        .map_err(|e| Error::Server(e.to_string()))?;
    Ok(listener)
}

/// Serve on an already-bound listener until the process exits.
pub async fn serve(
    listener: std::net::TcpListener,
    store: Arc<EventStore>,
    updates: SnapshotSender,
) -> Result<(), Error> {
    let app = router(AppState::new(store, updates));

    let listener = tokio::net::TcpListener::from_std(listener)
        .map_err(|e| Error::Server(e.to_string()))?;
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "ingestion endpoint listening");
    }

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Server(e.to_string()))
}

/// Health probe body.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
    events: usize,
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.start_time.elapsed().as_secs(),
        events: state.store.len(),
    })
}

//! HTTP server for the built dashboard.
//!
//! Requires the `http` feature.
//!
//! ## Routes
//!
//! - `GET /health` returns `{ "ok": true }`.
//! - `POST /analytics/track` accepts an analytics batch into the in-process inbox.
//! - `GET /robots.txt` serves the configured robots file, cached for a day.
//! - Anything else is a static file under the configured directory, with
//!   `index.html` as the fallback for client-side routes.
//!
//! ## Example
//!
//! ```ignore
//! use user_dashboard::{server, DashboardConfig};
//!
//! let config = DashboardConfig::from_env()?;
//! server::serve(&config.server).await?;
//! ```

mod files;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tracing::{info, warn};

use crate::analytics::AnalyticsBatch;
use crate::config::ServerConfig;

pub use files::{cache_control_for, content_type_for};

/// Analytics batches received by `POST /analytics/track`.
pub type Inbox = Arc<Mutex<Vec<AnalyticsBatch>>>;

pub(crate) struct ServerState {
    static_dir: PathBuf,
    robots_path: PathBuf,
    inbox: Inbox,
}

/// Build the dashboard `Router`. Received analytics batches land in `inbox`.
pub fn router(config: &ServerConfig, inbox: Inbox) -> Router {
    let state = Arc::new(ServerState {
        static_dir: config.static_dir.clone(),
        robots_path: config.robots_path.clone(),
        inbox,
    });
    Router::new()
        .route("/health", get(health_handler))
        .route("/analytics/track", post(track_handler))
        .route("/robots.txt", get(files::robots_handler))
        .fallback(files::static_handler)
        .with_state(state)
}

/// Serve on `0.0.0.0:{port}` until Ctrl-C.
pub async fn serve(config: &ServerConfig) -> Result<(), std::io::Error> {
    let app = router(config, Inbox::default());
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, static_dir = %config.static_dir.display(), "server running");
    info!("visit: http://localhost:{}", addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

/// `GET /health`
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// `POST /analytics/track`
async fn track_handler(
    State(state): State<Arc<ServerState>>,
    Json(batch): Json<AnalyticsBatch>,
) -> impl IntoResponse {
    let accepted = batch.events.len();
    match state.inbox.lock() {
        Ok(mut inbox) => {
            inbox.push(batch);
            (StatusCode::OK, Json(json!({ "ok": true, "accepted": accepted })))
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "ok": false, "error": "analytics inbox poisoned" })),
        ),
    }
}

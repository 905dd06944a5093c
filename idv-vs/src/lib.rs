//! idv-vs library - Verify Service module
//!
//! Single-endpoint triage service for identity document submissions:
//! ingests front/back document images plus an optional selfie, runs the
//! three analysis adapters, and fuses their signals into a verdict.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::sync::Arc;

pub mod analysis;
pub mod api;
pub mod error;
pub mod fusion;

use fusion::VerdictEngine;

/// Largest accepted request body (documents are phone camera shots)
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Verdict engine (immutable after startup, shared across requests)
    pub engine: Arc<VerdictEngine>,
}

impl AppState {
    /// Create new application state
    pub fn new(engine: VerdictEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::post;
    use tower_http::trace::TraceLayer;

    Router::new()
        .route("/verify", post(api::verify))
        .merge(api::health_routes())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! idv-vs (Verify Service) - Identity document triage microservice
//!
//! POST /verify ingests two document images (front/back) and an optional
//! selfie, runs OCR, ELA tamper scoring, and face similarity, and returns
//! a fused confidence score with a coarse verdict. Best-effort triage
//! only; adapter failures degrade to absent signals, never to errors.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use idv_vs::analysis::{FaceMatcher, TamperScorer, TextExtractor};
use idv_vs::fusion::VerdictEngine;
use idv_vs::{build_router, AppState};

#[derive(Parser, Debug)]
#[command(name = "idv-vs", about = "IDV document verify service")]
struct Args {
    /// Listen port (overrides VERIFY_PORT environment variable)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting IDV Verify Service (idv-vs) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let port = idv_common::config::resolve_listen_port(args.port);

    // Face capability is resolved once at startup and read-only after
    let face = FaceMatcher::initialize();
    if face.is_available() {
        info!("✓ Face matching capability available");
    } else {
        info!("Face matching capability unavailable; face scores will be absent");
    }

    let engine = VerdictEngine::new(TextExtractor::default(), TamperScorer::default(), face);
    let state = AppState::new(engine);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("idv-vs listening on http://0.0.0.0:{}", port);
    info!("Health check: http://127.0.0.1:{}/health", port);

    axum::serve(listener, app).await?;

    Ok(())
}

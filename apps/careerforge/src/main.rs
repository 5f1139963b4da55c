mod analysis;
mod config;
mod dashboard;
mod errors;
mod gamification;
mod intake;
mod llm_client;
mod resume;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::build_analyzer;
use crate::config::Config;
use crate::intake::build_extractor;
use crate::routes::build_router;
use crate::session::SessionHandle;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on inconsistent env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerForge v{}", env!("CARGO_PKG_VERSION"));

    // Analysis backend (KeywordAnalyzer by default, swap via ANALYSIS_BACKEND)
    let analyzer = build_analyzer(&config)?;

    // Text extraction (FixtureExtractor by default, swap via EXTRACTION_BACKEND)
    let extractor = build_extractor(config.extraction_backend);
    info!("Extraction backend: {:?}", config.extraction_backend);

    // One in-memory session per process
    let state = AppState {
        session: SessionHandle::new(),
        analyzer,
        extractor,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

mod config;
mod errors;
mod generation;
mod llm_client;
mod render;
mod routes;
mod session;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::pipeline::CoverLetterPipeline;
use crate::llm_client::LlmClient;
use crate::render::LopdfWriter;
use crate::routes::build_router;
use crate::session::SessionState;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cover letter API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.llm_timeout);
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm_client::MODEL,
        config.llm_timeout.as_secs()
    );

    // Session slots start empty; SAVE_DIRECTORY may pre-fill the save location.
    let session = Arc::new(SessionState::new());
    if let Some(dir) = &config.save_directory {
        match session.set_save_location(dir) {
            Ok(resolved) => info!("Initial save location: {}", resolved.display()),
            Err(e) => warn!("Ignoring SAVE_DIRECTORY: {e}"),
        }
    }

    let pipeline = CoverLetterPipeline::new(
        session,
        Arc::new(llm),
        Arc::new(LopdfWriter::with_title("Cover Letter")),
    );

    // Build router
    let app = build_router(AppState { pipeline })
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

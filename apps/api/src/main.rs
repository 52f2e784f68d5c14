mod ats;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod oracle;
mod routes;
mod state;
mod synthesis;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::{ocr, Extractor};
use crate::llm_client::{LlmClient, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting atsforge v{}", env!("CARGO_PKG_VERSION"));

    // OCR engine for image uploads
    let ocr_engine = ocr::default_engine(&config.ocr_language)
        .with_context(|| format!("initialising OCR for language '{}'", config.ocr_language))?;
    info!("OCR engine: {}", ocr_engine.name());
    let extractor = Extractor::new(ocr_engine);

    // Generation oracle, built once from the credential
    let generator: Option<Arc<dyn TextGenerator>> = match &config.anthropic_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone()).context("building LLM client")?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(client))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; oracle routes will answer 503");
            None
        }
    };

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .with_context(|| format!("creating output dir {}", config.output_dir.display()))?;

    let state = AppState {
        config: config.clone(),
        extractor,
        generator,
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

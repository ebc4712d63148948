mod config;
mod errors;
mod interview;
mod models;
mod questions;
mod report;
mod resume;
mod routes;
mod scoring;
mod state;
mod textgen;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::interview::{FlowPolicy, SessionStore};
use crate::routes::build_router;
use crate::scoring::PlaceholderScorer;
use crate::state::AppState;
use crate::textgen::TextGenClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Intervu API v{}", env!("CARGO_PKG_VERSION"));

    // Shared HTTP client for the remote resume parser
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;

    // Initialize text generation client (falls back to local templates when unset)
    let textgen = TextGenClient::new(config.textgen_api_url.clone(), config.textgen_api_key.clone())?;
    if textgen.is_configured() {
        info!("Text generation client initialized");
    } else {
        info!("TEXTGEN_API_KEY not set; using local question templates");
    }

    // Session store with the recording-duration policy and default scorer
    let sessions = Arc::new(SessionStore::new(
        FlowPolicy {
            min_secs: config.min_recording_secs,
            max_secs: config.max_recording_secs,
        },
        Arc::new(PlaceholderScorer::new()),
    ));

    let state = AppState {
        config: config.clone(),
        http,
        textgen,
        sessions,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

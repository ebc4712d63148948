use std::sync::Arc;

use crate::config::Config;
use crate::interview::SessionStore;
use crate::textgen::TextGenClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Shared HTTP client for the remote resume parser.
    pub http: reqwest::Client,
    pub textgen: TextGenClient,
    /// Session registry; owns the pluggable answer scorer.
    pub sessions: Arc<SessionStore>,
}

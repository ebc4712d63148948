pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers as sessions;
use crate::resume::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route(
            "/api/v1/resumes",
            post(resumes::handle_upload)
                // Raised past the 3 MiB file cap so oversized uploads reach
                // our own size check and get a structured 413 body.
                .layer(DefaultBodyLimit::max(8 * 1024 * 1024)),
        )
        // Session API
        .route("/api/v1/sessions", post(sessions::create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .route("/api/v1/sessions/:id/events", post(sessions::post_event))
        .route("/api/v1/sessions/:id/report", get(sessions::get_report))
        .route(
            "/api/v1/sessions/:id/report/export",
            get(sessions::export_report),
        )
        .with_state(state)
}

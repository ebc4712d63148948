//! Session HTTP handlers.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::session::{SessionCommand, SessionView};
use crate::models::{Profile, Report};
use crate::questions::generate_questions;
use crate::report::{export_filename, render_text};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub profile: Profile,
    #[serde(default)]
    pub video_requested: bool,
}

/// Wire form of the commands a client may post. Internal commands (timer
/// ticks, scoring results) are deliberately absent.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEventBody {
    Begin,
    StartRecording,
    Transcript { text: String },
    SourceError { message: String },
    StopRecording,
    Submit,
    ToggleCamera,
}

impl From<SessionEventBody> for SessionCommand {
    fn from(body: SessionEventBody) -> Self {
        match body {
            SessionEventBody::Begin => SessionCommand::Begin,
            SessionEventBody::StartRecording => SessionCommand::StartRecording,
            SessionEventBody::Transcript { text } => SessionCommand::Transcript { text },
            SessionEventBody::SourceError { message } => SessionCommand::SourceError { message },
            SessionEventBody::StopRecording => SessionCommand::StopRecording,
            SessionEventBody::Submit => SessionCommand::Submit,
            SessionEventBody::ToggleCamera => SessionCommand::ToggleCamera,
        }
    }
}

pub async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let questions = generate_questions(&state.textgen, &request.profile).await;
    if questions.is_empty() {
        return Err(AppError::Validation(
            "could not derive any questions from the profile".to_string(),
        ));
    }
    let view = state
        .sessions
        .create(request.profile, questions, request.video_requested)
        .await;
    info!(session_id = %view.id, questions = view.question_count, "interview session created");
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn post_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SessionEventBody>,
) -> Result<Json<SessionView>, AppError> {
    let view = state.sessions.apply(id, body.into()).await?;
    Ok(Json(view))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.sessions.view(id).await?))
}

pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Report>, AppError> {
    Ok(Json(state.sessions.report(id).await?))
}

/// Plain-text report download, served as an attachment.
pub async fn export_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let report = state.sessions.report(id).await?;
    let now = Utc::now();
    let body = render_text(&report, now);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    let disposition = format!("attachment; filename=\"{}\"", export_filename(now));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?,
    );
    Ok((headers, body))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_bodies_deserialize_by_type_tag() {
        let body: SessionEventBody =
            serde_json::from_str(r#"{"type":"transcript","text":"hello"}"#).unwrap();
        assert!(matches!(body, SessionEventBody::Transcript { text } if text == "hello"));

        let body: SessionEventBody = serde_json::from_str(r#"{"type":"begin"}"#).unwrap();
        assert!(matches!(body, SessionEventBody::Begin));
    }

    #[test]
    fn internal_commands_are_not_on_the_wire() {
        assert!(serde_json::from_str::<SessionEventBody>(r#"{"type":"tick","epoch":1}"#).is_err());
        assert!(serde_json::from_str::<SessionEventBody>(r#"{"type":"scoring_done"}"#).is_err());
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Why an uploaded résumé was rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadRejectReason {
    UnsupportedType,
    TooLarge,
    ParseFailed,
}

impl UploadRejectReason {
    pub fn code(&self) -> &'static str {
        match self {
            UploadRejectReason::UnsupportedType => "UNSUPPORTED_TYPE",
            UploadRejectReason::TooLarge => "TOO_LARGE",
            UploadRejectReason::ParseFailed => "PARSE_FAILED",
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Upload rejected ({}): {message}", reason.code())]
    UploadRejected {
        reason: UploadRejectReason,
        message: String,
    },

    #[error("Session not found: {0}")]
    SessionNotFound(uuid::Uuid),

    #[error("Report not ready: the interview has not finished")]
    ReportNotReady,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::UploadRejected { reason, message } => {
                let status = match reason {
                    UploadRejectReason::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
                    UploadRejectReason::UnsupportedType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    UploadRejectReason::ParseFailed => StatusCode::UNPROCESSABLE_ENTITY,
                };
                (status, reason.code(), message.clone())
            }
            AppError::SessionNotFound(id) => (
                StatusCode::NOT_FOUND,
                "SESSION_NOT_FOUND",
                format!("Session {id} not found"),
            ),
            AppError::ReportNotReady => (
                StatusCode::CONFLICT,
                "REPORT_NOT_READY",
                "The interview has not finished yet".to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

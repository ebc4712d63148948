use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use super::extract::extract_profile;
use crate::errors::AppError;
use crate::models::Profile;
use crate::state::AppState;

/// POST /api/v1/resumes
///
/// Multipart upload of exactly one résumé file. Returns the extracted
/// `Profile` or an `UploadRejected` error.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Profile>, AppError> {
    let mut upload: Option<(bytes::Bytes, String, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue; // non-file fields are ignored
        };

        if upload.is_some() {
            return Err(AppError::Validation(
                "exactly one file may be uploaded".to_string(),
            ));
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;

        upload = Some((bytes, content_type, filename));
    }

    let (bytes, content_type, filename) =
        upload.ok_or_else(|| AppError::Validation("no file field in upload".to_string()))?;

    info!(
        "resume upload: '{}' ({} bytes, {})",
        filename,
        bytes.len(),
        content_type
    );

    let profile = extract_profile(&state.config, &state.http, bytes, &content_type, &filename).await?;
    Ok(Json(profile))
}

//! Upload boundary and profile extraction.
//!
//! Exactly one file, at most 3 MiB, PDF or DOCX. PDFs are extracted locally
//! with `pdf-extract` and scanned heuristically; DOCX relies on the remote
//! parsing service (no local OOXML extraction). When both paths fail, the
//! configured policy either substitutes the placeholder profile or rejects
//! the upload with `ParseFailed`.

use bytes::Bytes;
use tracing::{info, warn};

use super::heuristics::{placeholder_profile, profile_from_text};
use super::remote::parse_remote;
use crate::config::Config;
use crate::errors::{AppError, UploadRejectReason};
use crate::models::Profile;

pub const MAX_UPLOAD_BYTES: usize = 3 * 1024 * 1024;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Rejects uploads outside the accepted type/size envelope.
pub fn validate_upload(content_type: &str, size: usize) -> Result<(), AppError> {
    if content_type != MIME_PDF && content_type != MIME_DOCX {
        return Err(AppError::UploadRejected {
            reason: UploadRejectReason::UnsupportedType,
            message: format!("'{content_type}' is not accepted; upload a PDF or DOCX file"),
        });
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(AppError::UploadRejected {
            reason: UploadRejectReason::TooLarge,
            message: "resume file size must be less than 3 MiB".to_string(),
        });
    }
    Ok(())
}

/// Converts an accepted upload into a `Profile`.
///
/// Order of attempts: remote parsing service (when configured), then local
/// PDF extraction, then the parse-failure policy.
pub async fn extract_profile(
    config: &Config,
    http: &reqwest::Client,
    bytes: Bytes,
    content_type: &str,
    filename: &str,
) -> Result<Profile, AppError> {
    validate_upload(content_type, bytes.len())?;

    if let Some(url) = &config.resume_parser_url {
        match parse_remote(http, url, bytes.clone(), content_type, filename).await {
            Ok(profile) => {
                info!("remote parser produced profile for '{}'", profile.name);
                return Ok(profile);
            }
            Err(e) => {
                warn!("remote resume parsing failed, trying local extraction: {e}");
            }
        }
    }

    if content_type == MIME_PDF {
        match extract_pdf_text(bytes).await {
            Ok(text) => match profile_from_document_text(&text) {
                Some(profile) => {
                    info!("local PDF extraction produced profile for '{}'", profile.name);
                    return Ok(profile);
                }
                None => warn!("PDF extraction yielded no usable resume content"),
            },
            Err(e) => warn!("PDF extraction failed: {e}"),
        }
    }

    parse_failed(config)
}

/// Scans extracted document text; an empty scan (no skills, experience, or
/// projects) counts as a parse failure rather than an anchor-less profile.
fn profile_from_document_text(text: &str) -> Option<Profile> {
    if text.trim().is_empty() {
        return None;
    }
    let profile = profile_from_text(text);
    if profile.is_effectively_empty() {
        None
    } else {
        Some(profile)
    }
}

fn parse_failed(config: &Config) -> Result<Profile, AppError> {
    if config.placeholder_on_parse_failed {
        warn!("substituting placeholder profile; session continues in degraded mode");
        Ok(placeholder_profile())
    } else {
        Err(AppError::UploadRejected {
            reason: UploadRejectReason::ParseFailed,
            message: "could not extract any resume content from the file".to_string(),
        })
    }
}

/// PDF text extraction is CPU-bound; run it off the async runtime.
async fn extract_pdf_text(bytes: Bytes) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&bytes).map_err(anyhow::Error::from)
    })
    .await?
}

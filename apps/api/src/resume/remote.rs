//! Client for the optional remote résumé parsing service.
//!
//! The service takes the uploaded file as multipart form data and answers
//! with a flat JSON object of plain-text section fields. Any non-2xx status
//! or structurally invalid body is a `ParseFailed`-class error the caller
//! resolves through the configured fallback policy.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::heuristics::{profile_from_sections, SectionTexts};
use crate::models::Profile;

#[derive(Debug, Error)]
pub enum RemoteParseError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("parser returned status {0}")]
    Status(u16),

    #[error("parser returned an empty or invalid body")]
    InvalidBody,
}

#[derive(Debug, Deserialize)]
struct ParserResponse {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    skills: String,
    #[serde(default)]
    experience: String,
    #[serde(default)]
    education: String,
    #[serde(default)]
    projects: String,
}

impl ParserResponse {
    fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.skills.is_empty()
            && self.experience.is_empty()
            && self.education.is_empty()
            && self.projects.is_empty()
    }
}

/// Sends the uploaded file to the parsing service and converts its section
/// fields into a `Profile`.
pub async fn parse_remote(
    client: &reqwest::Client,
    url: &str,
    bytes: Bytes,
    content_type: &str,
    filename: &str,
) -> Result<Profile, RemoteParseError> {
    let part = Part::bytes(bytes.to_vec())
        .file_name(filename.to_string())
        .mime_str(content_type)?;
    let form = Form::new().part("file", part);

    let response = client.post(url).multipart(form).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(RemoteParseError::Status(status.as_u16()));
    }

    let parsed: ParserResponse = response
        .json()
        .await
        .map_err(|_| RemoteParseError::InvalidBody)?;
    if parsed.is_empty() {
        return Err(RemoteParseError::InvalidBody);
    }

    debug!("remote parser extracted sections for '{}'", parsed.name);

    Ok(profile_from_sections(SectionTexts {
        name: parsed.name,
        email: parsed.email,
        phone: parsed.phone,
        skills: parsed.skills,
        experience: parsed.experience,
        education: parsed.education,
        projects: parsed.projects,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_response_tolerates_missing_fields() {
        let parsed: ParserResponse = serde_json::from_str(r#"{"name": "Sam", "skills": "Go"}"#)
            .unwrap();
        assert_eq!(parsed.name, "Sam");
        assert_eq!(parsed.skills, "Go");
        assert!(parsed.email.is_empty());
        assert!(!parsed.is_empty());
    }

    #[test]
    fn test_all_blank_response_counts_as_empty() {
        let parsed: ParserResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.is_empty());
    }
}

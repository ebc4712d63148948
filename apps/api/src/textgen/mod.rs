/// Text-generation client — the single point of entry for the remote
/// question-generation call.
///
/// ARCHITECTURAL RULE: no other module may call the text-generation API
/// directly. All remote generation goes through this module, and every
/// failure here is recoverable — callers fall back to local templates.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const MAX_OUTPUT_TOKENS: u32 = 1024;

#[derive(Debug, Error)]
pub enum TextGenError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("endpoint returned no usable text")]
    EmptyContent,

    #[error("no numbered question lines in response")]
    NoQuestionLines,

    #[error("remote generation is not configured")]
    NotConfigured,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "topK")]
    top_k: u32,
    #[serde(rename = "topP")]
    top_p: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Client for a `generateContent`-style text endpoint. Cheap to clone.
#[derive(Clone)]
pub struct TextGenClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl TextGenClient {
    pub fn new(api_url: String, api_key: Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            api_url,
            api_key,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Makes a single generation call and returns the raw text of the first
    /// candidate. No retry: callers recover via local fallback instead.
    pub async fn generate(&self, prompt: &str) -> Result<String, TextGenError> {
        let api_key = self.api_key.as_deref().ok_or(TextGenError::NotConfigured)?;

        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                top_k: 40,
                top_p: 0.95,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", api_key)])
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TextGenError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or(TextGenError::EmptyContent)?;

        debug!("text generation returned {} chars", text.len());
        Ok(text)
    }
}

/// Extracts the question texts from a numbered-list response.
///
/// Only lines beginning with an integer and a period count; everything else
/// (preamble, blank lines, markdown) is ignored. Zero matched lines is a
/// failure — the endpoint did not honor the requested format.
pub fn parse_numbered_lines(text: &str) -> Result<Vec<String>, TextGenError> {
    let questions: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter_map(strip_line_number)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .collect();

    if questions.is_empty() {
        return Err(TextGenError::NoQuestionLines);
    }
    Ok(questions)
}

/// `"3. What is ...?"` -> `Some("What is ...?")`, non-numbered -> `None`.
fn strip_line_number(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    Some(rest.trim_start())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbered_lines_basic() {
        let text = "1. Tell me about Rust.\n2. Describe your last project.\n3. Why Acme?";
        let questions = parse_numbered_lines(text).unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0], "Tell me about Rust.");
        assert_eq!(questions[2], "Why Acme?");
    }

    #[test]
    fn test_parse_numbered_lines_skips_preamble_and_blanks() {
        let text = "Here are your questions:\n\n1. First?\n\nSome note\n2. Second?";
        let questions = parse_numbered_lines(text).unwrap();
        assert_eq!(questions, vec!["First?", "Second?"]);
    }

    #[test]
    fn test_parse_numbered_lines_zero_matches_is_error() {
        let text = "I cannot generate questions for this resume.";
        assert!(matches!(
            parse_numbered_lines(text),
            Err(TextGenError::NoQuestionLines)
        ));
    }

    #[test]
    fn test_strip_line_number_requires_period() {
        assert_eq!(strip_line_number("10. Ten?"), Some("Ten?"));
        assert_eq!(strip_line_number("10) Ten?"), None);
        assert_eq!(strip_line_number("No number"), None);
    }

    #[test]
    fn test_generate_without_key_is_not_configured() {
        let client = TextGenClient::new("http://localhost:9".to_string(), None).unwrap();
        assert!(!client.is_configured());
        let err = tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(client.generate("prompt"))
            .unwrap_err();
        assert!(matches!(err, TextGenError::NotConfigured));
    }
}

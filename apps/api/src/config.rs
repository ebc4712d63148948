use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// The two remote endpoints are optional: without `TEXTGEN_API_KEY` question
/// generation runs purely from local templates, and without
/// `RESUME_PARSER_URL` DOCX uploads follow the parse-failure policy.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Text-generation endpoint for remote question generation.
    pub textgen_api_url: String,
    /// API key for the text-generation endpoint. `None` disables the remote path.
    pub textgen_api_key: Option<String>,
    /// Remote résumé parsing service. `None` disables the remote path.
    pub resume_parser_url: Option<String>,
    /// On a failed parse, substitute the deterministic placeholder profile
    /// so the session can continue in degraded mode.
    pub placeholder_on_parse_failed: bool,
    /// Recording-duration policy window, in whole seconds.
    pub min_recording_secs: u32,
    pub max_recording_secs: u32,
}

const DEFAULT_TEXTGEN_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let min_recording_secs = env_parse("MIN_RECORDING_SECS", 10)?;
        let max_recording_secs = env_parse("MAX_RECORDING_SECS", 30)?;
        if min_recording_secs > max_recording_secs {
            anyhow::bail!(
                "MIN_RECORDING_SECS ({min_recording_secs}) must not exceed MAX_RECORDING_SECS ({max_recording_secs})"
            );
        }

        Ok(Config {
            port: env_parse("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            textgen_api_url: std::env::var("TEXTGEN_API_URL")
                .unwrap_or_else(|_| DEFAULT_TEXTGEN_API_URL.to_string()),
            textgen_api_key: optional_env("TEXTGEN_API_KEY"),
            resume_parser_url: optional_env("RESUME_PARSER_URL"),
            placeholder_on_parse_failed: env_parse("PLACEHOLDER_ON_PARSE_FAILED", true)?,
            min_recording_secs,
            max_recording_secs,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("'{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

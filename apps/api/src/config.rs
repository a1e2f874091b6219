use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Only `PORT` and `AI_TIMEOUT_SECS` can fail to parse; everything else is
/// optional with documented defaults. A missing `AI_API_KEY` disables the
/// suggestion collaborator rather than failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Gemini API key; suggestions are disabled when absent.
    pub ai_api_key: Option<String>,
    /// Upper bound on one suggestion call, in seconds.
    pub ai_timeout_secs: u64,
    /// Optional JSON lexicon override; the built-in lexicon is used when unset.
    pub lexicon_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            ai_api_key: optional_env("AI_API_KEY"),
            ai_timeout_secs: std::env::var("AI_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("AI_TIMEOUT_SECS must be a positive integer")?,
            lexicon_path: optional_env("LEXICON_PATH"),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

use std::time::Duration;

use anyhow::{Context, Result};

use crate::analysis::AnalysisBackend;
use crate::intake::ExtractionBackend;

const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;

/// Application configuration loaded from environment variables.
/// Startup fails if a value is present but invalid.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub analysis_backend: AnalysisBackend,
    /// Only required when `analysis_backend` is `Llm`.
    pub anthropic_api_key: Option<String>,
    pub llm_timeout: Duration,
    pub extraction_backend: ExtractionBackend,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            analysis_backend: AnalysisBackend::default(),
            anthropic_api_key: None,
            llm_timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
            extraction_backend: ExtractionBackend::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            port: optional_env("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            analysis_backend: parse_env("ANALYSIS_BACKEND")?.unwrap_or_default(),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            llm_timeout: Duration::from_secs(
                parse_env::<u64>("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_LLM_TIMEOUT_SECS),
            ),
            extraction_backend: parse_env("EXTRACTION_BACKEND")?.unwrap_or_default(),
        };
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.analysis_backend == AnalysisBackend::Llm && self.anthropic_api_key.is_none() {
            anyhow::bail!("Required environment variable 'ANTHROPIC_API_KEY' is not set (ANALYSIS_BACKEND=llm)");
        }
        if self.llm_timeout.is_zero() {
            anyhow::bail!("LLM_TIMEOUT_SECS must be greater than zero");
        }
        Ok(())
    }
}

/// Unset and blank are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    optional_env(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| anyhow::anyhow!("{key} is invalid: {e}"))
        })
        .transpose()
}

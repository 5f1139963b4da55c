pub mod cache;
pub mod chart;
pub mod keyword;
pub mod llm;
pub mod models;
pub mod prompts;
pub mod service;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::llm_client::{self, LlmClient};

pub use cache::{AnalysisCache, Facet, FacetState};
pub use keyword::KeywordAnalyzer;
pub use llm::LlmAnalyzer;
pub use service::{AnalysisBackend, AnalysisError, AnalysisService, DEFAULT_LEARNING_LEVEL};

/// Picks the analysis backend named by config.
pub fn build_analyzer(config: &Config) -> Result<Arc<dyn AnalysisService>> {
    match config.analysis_backend {
        AnalysisBackend::Keyword => {
            info!("Analysis backend: keyword (offline)");
            Ok(Arc::new(KeywordAnalyzer))
        }
        AnalysisBackend::Llm => {
            let api_key = config
                .anthropic_api_key
                .clone()
                .context("ANTHROPIC_API_KEY is required when ANALYSIS_BACKEND=llm")?;
            let client = LlmClient::new(api_key, config.llm_timeout)
                .context("Failed to build HTTP client for the LLM backend")?;
            info!(
                "Analysis backend: llm (model: {}, timeout: {}s)",
                llm_client::MODEL,
                config.llm_timeout.as_secs()
            );
            Ok(Arc::new(LlmAnalyzer(client)))
        }
    }
}

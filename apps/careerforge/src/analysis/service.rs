//! Analysis service contract. The backend is chosen at startup from config.
//!
//! Default: `KeywordAnalyzer` (pure-Rust, offline, deterministic, fully testable).
//! Opt-in: `LlmAnalyzer` (one JSON prompt per contract through `LlmClient`).
//!
//! `AppState` holds an `Arc<dyn AnalysisService>`.

use std::str::FromStr;

use async_trait::async_trait;
use thiserror::Error;

use crate::analysis::models::{
    CareerDna, JobMatch, LearningPath, ProcessedResumeData, SkillGapAnalysis,
};
use crate::llm_client::LlmError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Malformed analysis result: {0}")]
    Malformed(String),

    #[error("An analysis is already in progress")]
    Busy,
}

/// Learning-path level requested by the job analysis flow.
pub const DEFAULT_LEARNING_LEVEL: &str = "intermediate";

#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Turns extracted resume text into structured data.
    async fn parse(&self, text: &str) -> Result<ProcessedResumeData, AnalysisError>;

    /// ATS compatibility score plus improvement suggestions.
    async fn match_job(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<JobMatch, AnalysisError>;

    async fn skill_gap(
        &self,
        current_skills: &[String],
        job_description: &str,
    ) -> Result<SkillGapAnalysis, AnalysisError>;

    async fn learning_path(
        &self,
        missing_skills: &[String],
        level: &str,
    ) -> Result<LearningPath, AnalysisError>;

    async fn career_profile(
        &self,
        processed: &ProcessedResumeData,
    ) -> Result<CareerDna, AnalysisError>;

    async fn interview_questions(
        &self,
        job_description: &str,
        skills: &[String],
    ) -> Result<Vec<String>, AnalysisError>;
}

/// Which analysis backend the service runs with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalysisBackend {
    #[default]
    Keyword,
    Llm,
}

impl FromStr for AnalysisBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keyword" => Ok(AnalysisBackend::Keyword),
            "llm" => Ok(AnalysisBackend::Llm),
            other => Err(anyhow::anyhow!(
                "unknown analysis backend '{other}' (expected 'keyword' or 'llm')"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_str() {
        assert_eq!("keyword".parse::<AnalysisBackend>().unwrap(), AnalysisBackend::Keyword);
        assert_eq!(" LLM ".parse::<AnalysisBackend>().unwrap(), AnalysisBackend::Llm);
        assert!("huggingface".parse::<AnalysisBackend>().is_err());
    }
}

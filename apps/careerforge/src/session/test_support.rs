// Test doubles for the extraction and analysis seams.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::analysis::cache::Facet;
use crate::analysis::models::{
    CareerDna, JobMatch, LearningPath, LearningTask, ProcessedResumeData, SkillGapAnalysis,
    TaskType,
};
use crate::analysis::{AnalysisError, AnalysisService, KeywordAnalyzer};
use crate::intake::{ExtractionError, TextExtractor, UploadedFile};

pub const RESUME_TEXT: &str = "Jane Doe\njane@x.com\nSkills: Rust, React, PostgreSQL";

/// Returns [`RESUME_TEXT`] for any file, optionally after a delay, and counts calls.
#[derive(Clone, Default)]
pub struct CountingExtractor {
    calls: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl CountingExtractor {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextExtractor for CountingExtractor {
    async fn extract(&self, _file: &UploadedFile) -> Result<String, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(RESUME_TEXT.to_string())
    }
}

/// Keyword analysis with one scripted failure point.
#[derive(Default)]
pub struct ScriptedAnalyzer {
    fail_parse: bool,
    fail_at: Option<Facet>,
    calls: AtomicUsize,
}

impl ScriptedAnalyzer {
    pub fn failing_parse() -> Self {
        Self {
            fail_parse: true,
            ..Self::default()
        }
    }

    pub fn failing_at(facet: Facet) -> Self {
        Self {
            fail_at: Some(facet),
            ..Self::default()
        }
    }

    /// Number of analysis calls made, parse excluded.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn step(&self, facet: Facet) -> Result<(), AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_at == Some(facet) {
            return Err(AnalysisError::Malformed(format!("scripted {} failure", facet.label())));
        }
        Ok(())
    }
}

#[async_trait]
impl AnalysisService for ScriptedAnalyzer {
    async fn parse(&self, text: &str) -> Result<ProcessedResumeData, AnalysisError> {
        if self.fail_parse {
            return Err(AnalysisError::Malformed("scripted parse failure".into()));
        }
        KeywordAnalyzer.parse(text).await
    }

    async fn match_job(&self, resume_text: &str, jd: &str) -> Result<JobMatch, AnalysisError> {
        self.step(Facet::JobMatch)?;
        KeywordAnalyzer.match_job(resume_text, jd).await
    }

    async fn skill_gap(&self, skills: &[String], jd: &str) -> Result<SkillGapAnalysis, AnalysisError> {
        self.step(Facet::SkillGap)?;
        KeywordAnalyzer.skill_gap(skills, jd).await
    }

    async fn learning_path(&self, missing: &[String], level: &str) -> Result<LearningPath, AnalysisError> {
        self.step(Facet::LearningPath)?;
        KeywordAnalyzer.learning_path(missing, level).await
    }

    async fn career_profile(&self, processed: &ProcessedResumeData) -> Result<CareerDna, AnalysisError> {
        self.step(Facet::CareerDna)?;
        KeywordAnalyzer.career_profile(processed).await
    }

    async fn interview_questions(&self, jd: &str, skills: &[String]) -> Result<Vec<String>, AnalysisError> {
        self.step(Facet::InterviewQuestions)?;
        KeywordAnalyzer.interview_questions(jd, skills).await
    }
}

pub fn sample_path() -> LearningPath {
    LearningPath {
        title: "Path to Kafka".into(),
        duration: "2 weeks".into(),
        tasks: vec![
            LearningTask {
                id: 1,
                title: "Kafka fundamentals".into(),
                description: String::new(),
                duration: "1 week".into(),
                kind: TaskType::Course,
                completed: false,
            },
            LearningTask {
                id: 2,
                title: "Build something with Kafka".into(),
                description: String::new(),
                duration: "1 week".into(),
                kind: TaskType::Project,
                completed: false,
            },
        ],
    }
}

//! Job analysis orchestration: five dependent service calls, each result cached
//! as it arrives, stopping at the first failure.

use serde::Serialize;
use tracing::{error, info};

use crate::analysis::cache::{Facet, FacetState};
use crate::analysis::{AnalysisError, AnalysisService, DEFAULT_LEARNING_LEVEL};
use crate::gamification::{LevelChange, Reward};
use crate::session::SessionHandle;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// Blank job description or no processed resume. Nothing ran.
    Skipped,
    Completed { progress: LevelChange },
    /// `facet` holds the failure; earlier facets were refreshed, later ones untouched.
    Failed { facet: Facet, reason: String },
}

impl SessionHandle {
    pub async fn analyze_job(
        &self,
        job_description: &str,
        analyzer: &dyn AnalysisService,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        if job_description.trim().is_empty() {
            return Ok(AnalysisOutcome::Skipped);
        }
        let Some(processed) = self.lock().await.cache.processed_resume.clone() else {
            return Ok(AnalysisOutcome::Skipped);
        };

        let _ticket = self.analysis_gate.try_acquire().ok_or(AnalysisError::Busy)?;
        info!(skills = processed.skills.len(), "Analyzing job description");

        let job_match = match analyzer
            .match_job(&processed.extracted_text, job_description)
            .await
        {
            Ok(v) => v,
            Err(e) => return Ok(self.record_failure(Facet::JobMatch, e).await),
        };
        self.lock().await.cache.job_match = FacetState::Ready(job_match);

        let skill_gap = match analyzer.skill_gap(&processed.skills, job_description).await {
            Ok(v) => v,
            Err(e) => return Ok(self.record_failure(Facet::SkillGap, e).await),
        };
        let missing_skills = skill_gap.missing_skills.clone();
        self.lock().await.cache.skill_gap = FacetState::Ready(skill_gap);

        let learning_path = match analyzer
            .learning_path(&missing_skills, DEFAULT_LEARNING_LEVEL)
            .await
        {
            Ok(v) => v,
            Err(e) => return Ok(self.record_failure(Facet::LearningPath, e).await),
        };
        self.lock().await.cache.learning_path = FacetState::Ready(learning_path);

        let career_dna = match analyzer.career_profile(&processed).await {
            Ok(v) => v,
            Err(e) => return Ok(self.record_failure(Facet::CareerDna, e).await),
        };
        self.lock().await.cache.career_dna = FacetState::Ready(career_dna);

        let questions = match analyzer
            .interview_questions(job_description, &processed.skills)
            .await
        {
            Ok(v) => v,
            Err(e) => return Ok(self.record_failure(Facet::InterviewQuestions, e).await),
        };

        let mut session = self.lock().await;
        session.cache.interview_questions = FacetState::Ready(questions);
        let progress = session.tracker.award(Reward::JobAnalysis);
        info!(xp = progress.xp, level = progress.level, "Job analysis complete");

        Ok(AnalysisOutcome::Completed { progress })
    }

    async fn record_failure(&self, facet: Facet, err: AnalysisError) -> AnalysisOutcome {
        error!("Error analyzing job ({}): {err}", facet.label());
        let reason = err.to_string();
        self.lock().await.cache.mark_failed(facet, reason.clone());
        AnalysisOutcome::Failed { facet, reason }
    }
}

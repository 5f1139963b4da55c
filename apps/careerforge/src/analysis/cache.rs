//! Per-facet store of the most recent analysis results.
//!
//! Each facet is replaced independently as results arrive. A failed call marks
//! only its own facet; earlier facets keep their fresh values and later facets
//! keep whatever they held before.

use serde::Serialize;

use crate::analysis::models::{
    CareerDna, JobMatch, LearningPath, ProcessedResumeData, SkillGapAnalysis,
};

/// Lifecycle of a single cached result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum FacetState<T> {
    Empty,
    Ready(T),
    Failed(String),
}

impl<T> Default for FacetState<T> {
    fn default() -> Self {
        FacetState::Empty
    }
}

impl<T> FacetState<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            FacetState::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        match self {
            FacetState::Ready(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    JobMatch,
    SkillGap,
    LearningPath,
    CareerDna,
    InterviewQuestions,
}

impl Facet {
    pub fn label(self) -> &'static str {
        match self {
            Facet::JobMatch => "job match",
            Facet::SkillGap => "skill gap",
            Facet::LearningPath => "learning path",
            Facet::CareerDna => "career DNA",
            Facet::InterviewQuestions => "interview questions",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisCache {
    /// Set by a successful upload. Kept when the upload card is cleared.
    pub processed_resume: Option<ProcessedResumeData>,
    pub job_match: FacetState<JobMatch>,
    pub skill_gap: FacetState<SkillGapAnalysis>,
    pub learning_path: FacetState<LearningPath>,
    pub career_dna: FacetState<CareerDna>,
    pub interview_questions: FacetState<Vec<String>>,
}

impl AnalysisCache {
    pub fn mark_failed(&mut self, facet: Facet, reason: String) {
        match facet {
            Facet::JobMatch => self.job_match = FacetState::Failed(reason),
            Facet::SkillGap => self.skill_gap = FacetState::Failed(reason),
            Facet::LearningPath => self.learning_path = FacetState::Failed(reason),
            Facet::CareerDna => self.career_dna = FacetState::Failed(reason),
            Facet::InterviewQuestions => self.interview_questions = FacetState::Failed(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_failed_touches_only_that_facet() {
        let mut cache = AnalysisCache {
            job_match: FacetState::Ready(JobMatch { ats_score: 70, suggestions: vec![] }),
            ..Default::default()
        };
        cache.mark_failed(Facet::SkillGap, "timeout".into());

        assert_eq!(cache.job_match.value().map(|m| m.ats_score), Some(70));
        assert_eq!(cache.skill_gap, FacetState::Failed("timeout".into()));
        assert_eq!(cache.learning_path, FacetState::Empty);
    }

    #[test]
    fn test_facet_state_serializes_tagged() {
        let state: FacetState<Vec<String>> = FacetState::Ready(vec!["Why us?".into()]);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["value"][0], "Why us?");

        let empty = serde_json::to_value(FacetState::<u8>::Empty).unwrap();
        assert_eq!(empty["status"], "empty");
    }
}

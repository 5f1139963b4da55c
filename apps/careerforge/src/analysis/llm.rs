//! LlmAnalyzer: answers each analysis contract with one JSON prompt through `LlmClient`.
//!
//! Replies are range-checked before they reach the session; an out-of-range
//! score is reported as `AnalysisError::Malformed` instead of being clamped.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::analysis::models::{
    CareerDna, JobMatch, LearningPath, ProcessedResumeData, SkillGapAnalysis,
};
use crate::analysis::prompts::{
    ANALYSIS_SYSTEM, CAREER_DNA_PROMPT_TEMPLATE, INTERVIEW_PROMPT_TEMPLATE,
    JOB_MATCH_PROMPT_TEMPLATE, LEARNING_PATH_PROMPT_TEMPLATE, PARSE_PROMPT_TEMPLATE,
    SKILL_GAP_PROMPT_TEMPLATE,
};
use crate::analysis::service::{AnalysisError, AnalysisService};
use crate::llm_client::LlmClient;
use crate::resume::model::PersonalInfo;

pub struct LlmAnalyzer(pub LlmClient);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParseReply {
    #[serde(default)]
    personal_info: PersonalInfo,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    skills: Vec<String>,
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, AnalysisError> {
    serde_json::to_string(value).map_err(|e| AnalysisError::Malformed(e.to_string()))
}

fn check_percent(label: &str, value: u8) -> Result<(), AnalysisError> {
    if value > 100 {
        return Err(AnalysisError::Malformed(format!(
            "{label} must be 0-100, got {value}"
        )));
    }
    Ok(())
}

fn check_job_match(reply: &JobMatch) -> Result<(), AnalysisError> {
    check_percent("atsScore", reply.ats_score)
}

fn check_skill_gap(reply: &SkillGapAnalysis) -> Result<(), AnalysisError> {
    check_percent("matchPercentage", reply.match_percentage)?;
    if let Some(bad) = reply
        .current_skills
        .iter()
        .chain(&reply.required_skills)
        .find(|s| s.level > 10)
    {
        return Err(AnalysisError::Malformed(format!(
            "level for {} must be 0-10, got {}",
            bad.skill, bad.level
        )));
    }
    Ok(())
}

#[async_trait]
impl AnalysisService for LlmAnalyzer {
    async fn parse(&self, text: &str) -> Result<ProcessedResumeData, AnalysisError> {
        let prompt = PARSE_PROMPT_TEMPLATE.replace("{resume_text}", text);
        let reply: ParseReply = self.0.call_json(&prompt, ANALYSIS_SYSTEM).await?;
        debug!(skills = reply.skills.len(), "parsed resume via LLM");

        Ok(ProcessedResumeData {
            personal_info: reply.personal_info,
            summary: reply.summary,
            skills: reply.skills,
            extracted_text: text.to_string(),
        })
    }

    async fn match_job(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<JobMatch, AnalysisError> {
        let prompt = JOB_MATCH_PROMPT_TEMPLATE
            .replace("{resume_text}", resume_text)
            .replace("{job_description}", job_description);
        let reply: JobMatch = self.0.call_json(&prompt, ANALYSIS_SYSTEM).await?;
        check_job_match(&reply)?;
        Ok(reply)
    }

    async fn skill_gap(
        &self,
        current_skills: &[String],
        job_description: &str,
    ) -> Result<SkillGapAnalysis, AnalysisError> {
        let prompt = SKILL_GAP_PROMPT_TEMPLATE
            .replace("{skills_json}", &to_json(current_skills)?)
            .replace("{job_description}", job_description);
        let reply: SkillGapAnalysis = self.0.call_json(&prompt, ANALYSIS_SYSTEM).await?;
        check_skill_gap(&reply)?;
        Ok(reply)
    }

    async fn learning_path(
        &self,
        missing_skills: &[String],
        level: &str,
    ) -> Result<LearningPath, AnalysisError> {
        let prompt = LEARNING_PATH_PROMPT_TEMPLATE
            .replace("{skills_json}", &to_json(missing_skills)?)
            .replace("{level}", level);
        Ok(self.0.call_json(&prompt, ANALYSIS_SYSTEM).await?)
    }

    async fn career_profile(
        &self,
        processed: &ProcessedResumeData,
    ) -> Result<CareerDna, AnalysisError> {
        let prompt = CAREER_DNA_PROMPT_TEMPLATE.replace("{resume_json}", &to_json(processed)?);
        Ok(self.0.call_json(&prompt, ANALYSIS_SYSTEM).await?)
    }

    async fn interview_questions(
        &self,
        job_description: &str,
        skills: &[String],
    ) -> Result<Vec<String>, AnalysisError> {
        let prompt = INTERVIEW_PROMPT_TEMPLATE
            .replace("{skills_json}", &to_json(skills)?)
            .replace("{job_description}", job_description);
        Ok(self.0.call_json(&prompt, ANALYSIS_SYSTEM).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::SkillLevel;

    #[test]
    fn test_parse_reply_tolerates_missing_fields() {
        let reply: ParseReply =
            serde_json::from_str(r#"{"personalInfo": {"name": "Jane Doe"}}"#).unwrap();
        assert_eq!(reply.personal_info.name, "Jane Doe");
        assert!(reply.personal_info.email.is_empty());
        assert!(reply.skills.is_empty());
    }

    #[test]
    fn test_check_job_match_rejects_out_of_range() {
        let ok = JobMatch { ats_score: 100, suggestions: vec![] };
        assert!(check_job_match(&ok).is_ok());
        let bad = JobMatch { ats_score: 140, suggestions: vec![] };
        assert!(matches!(check_job_match(&bad), Err(AnalysisError::Malformed(_))));
    }

    #[test]
    fn test_check_skill_gap_rejects_bad_level() {
        let gap = SkillGapAnalysis {
            match_percentage: 50,
            current_skills: vec![SkillLevel { skill: "Rust".into(), level: 7 }],
            required_skills: vec![SkillLevel { skill: "Go".into(), level: 11 }],
            missing_skills: vec!["Go".into()],
        };
        let err = check_skill_gap(&gap).unwrap_err();
        assert!(err.to_string().contains("Go"));
    }

    #[test]
    fn test_prompts_fill_every_placeholder() {
        let prompt = SKILL_GAP_PROMPT_TEMPLATE
            .replace("{skills_json}", &to_json(&["Rust".to_string()]).unwrap())
            .replace("{job_description}", "Backend Engineer");
        assert!(prompt.contains(r#"["Rust"]"#));
        assert!(!prompt.contains("{skills_json}"));
        assert!(!prompt.contains("{job_description}"));
    }
}

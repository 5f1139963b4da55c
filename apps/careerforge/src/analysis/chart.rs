//! Derived view of a skill-gap analysis: one comparison row per required skill.

use serde::Serialize;

use crate::analysis::models::SkillGapAnalysis;

/// How many current skills the chart lists as strengths.
const MAX_STRENGTHS: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillGapRow {
    pub skill: String,
    pub current: u8,
    pub required: u8,
    pub gap: u8,
}

/// Color band for a 0–100 match figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchBand {
    Strong,
    Moderate,
    Weak,
}

impl MatchBand {
    pub fn for_percentage(percentage: u8) -> Self {
        match percentage {
            80.. => MatchBand::Strong,
            60..=79 => MatchBand::Moderate,
            _ => MatchBand::Weak,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapChart {
    pub rows: Vec<SkillGapRow>,
    pub match_percentage: u8,
    pub band: MatchBand,
    pub strengths: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Pairs each required skill with the current level of the same skill,
/// compared case-insensitively. A skill the user lacks counts as level 0.
pub fn chart_rows(analysis: &SkillGapAnalysis) -> Vec<SkillGapRow> {
    analysis
        .required_skills
        .iter()
        .map(|required| {
            let current = analysis
                .current_skills
                .iter()
                .find(|c| c.skill.to_lowercase() == required.skill.to_lowercase())
                .map(|c| c.level)
                .unwrap_or(0);
            SkillGapRow {
                skill: required.skill.clone(),
                current,
                required: required.level,
                gap: required.level.saturating_sub(current),
            }
        })
        .collect()
}

pub fn build_chart(analysis: &SkillGapAnalysis) -> SkillGapChart {
    SkillGapChart {
        rows: chart_rows(analysis),
        match_percentage: analysis.match_percentage,
        band: MatchBand::for_percentage(analysis.match_percentage),
        strengths: analysis
            .current_skills
            .iter()
            .take(MAX_STRENGTHS)
            .map(|s| format!("{} ({}/10)", s.skill, s.level))
            .collect(),
        missing_skills: analysis.missing_skills.clone(),
    }
}

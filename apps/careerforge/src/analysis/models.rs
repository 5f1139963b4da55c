//! Result shapes returned by the analysis service. Serialized in camelCase for the front-end.

use serde::{Deserialize, Serialize};

use crate::resume::model::PersonalInfo;

/// What the parse contract yields for an uploaded resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedResumeData {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub skills: Vec<String>,
    pub extracted_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatch {
    /// 0 – 100
    pub ats_score: u8,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillLevel {
    pub skill: String,
    /// 0 – 10
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapAnalysis {
    /// 0 – 100
    pub match_percentage: u8,
    pub current_skills: Vec<SkillLevel>,
    pub required_skills: Vec<SkillLevel>,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Course,
    Project,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningTask {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub duration: String,
    #[serde(rename = "type")]
    pub kind: TaskType,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPath {
    pub title: String,
    pub duration: String,
    pub tasks: Vec<LearningTask>,
}

impl LearningPath {
    /// Marks the task complete. Returns true only on the false → true transition.
    pub fn complete_task(&mut self, task_id: u64) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) if !task.completed => {
                task.completed = true;
                true
            }
            _ => false,
        }
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerDna {
    pub archetype: String,
    pub strengths: Vec<String>,
    pub growth_areas: Vec<String>,
    pub career_stage: String,
    pub recommended_roles: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> LearningPath {
        LearningPath {
            title: "Kubernetes in 4 weeks".into(),
            duration: "4 weeks".into(),
            tasks: vec![
                LearningTask {
                    id: 1,
                    title: "Intro course".into(),
                    description: String::new(),
                    duration: "1 week".into(),
                    kind: TaskType::Course,
                    completed: false,
                },
                LearningTask {
                    id: 2,
                    title: "Deploy a cluster".into(),
                    description: String::new(),
                    duration: "2 weeks".into(),
                    kind: TaskType::Project,
                    completed: false,
                },
            ],
        }
    }

    #[test]
    fn test_complete_task_only_transitions_once() {
        let mut p = path();
        assert!(p.complete_task(2));
        assert!(!p.complete_task(2));
        assert!(!p.complete_task(99));
        assert_eq!(p.completed_count(), 1);
    }

    #[test]
    fn test_task_type_unknown_maps_to_other() {
        let json = r#"{"id":3,"title":"t","description":"d","duration":"1h","type":"workshop"}"#;
        let task: LearningTask = serde_json::from_str(json).unwrap();
        assert_eq!(task.kind, TaskType::Other);
        assert!(!task.completed);
    }

    #[test]
    fn test_skill_gap_deserializes_camel_case() {
        let json = r#"{
            "matchPercentage": 72,
            "currentSkills": [{"skill": "React", "level": 8}],
            "requiredSkills": [{"skill": "react", "level": 9}],
            "missingSkills": ["GraphQL"]
        }"#;
        let gap: SkillGapAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(gap.match_percentage, 72);
        assert_eq!(gap.missing_skills, vec!["GraphQL"]);
    }
}

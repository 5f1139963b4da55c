//! Read-only view models handed to the front-end.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::cache::AnalysisCache;
use crate::analysis::chart::{build_chart, SkillGapChart};
use crate::dashboard::simulator::{HeatmapCell, RecruiterSimulator};
use crate::gamification::ProgressView;
use crate::intake::FileMetadata;
use crate::resume::{BuilderSession, BuilderStep, ResumeData};
use crate::session::Session;

/// Navigation tabs. The active tab is view state only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Dashboard,
    Upload,
    Builder,
    Optimizer,
    Skills,
    Growth,
    Simulator,
    Dna,
    Interview,
    Salary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadView {
    pub file: Option<FileMetadata>,
    pub error: Option<String>,
    pub processing: bool,
    pub progress: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderView {
    pub step: BuilderStep,
    pub version: u64,
    /// Shared with the builder; never mutated after capture.
    pub resume: Arc<ResumeData>,
}

impl BuilderView {
    pub fn from_builder(builder: &BuilderSession) -> Self {
        BuilderView {
            step: builder.step(),
            version: builder.version(),
            resume: builder.snapshot(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorView {
    pub running: bool,
    pub progress: u8,
    pub heatmap: Vec<HeatmapCell>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningProgress {
    pub completed: usize,
    pub total: usize,
}

/// Everything the dashboard renders, captured under one lock.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub active_tab: Tab,
    pub progress: ProgressView,
    pub upload: UploadView,
    pub builder: BuilderView,
    pub analysis: AnalysisCache,
    pub skill_gap_chart: Option<SkillGapChart>,
    pub learning: Option<LearningProgress>,
    pub simulator: SimulatorView,
}

impl DashboardView {
    pub fn capture(session: &Session, upload_progress: u8, simulator: &RecruiterSimulator) -> Self {
        let upload = session.upload();
        let cache = session.cache();

        DashboardView {
            active_tab: session.active_tab(),
            progress: session.tracker().snapshot(),
            upload: UploadView {
                file: upload.file.clone(),
                error: upload.error.clone(),
                processing: upload.processing,
                progress: upload_progress,
            },
            builder: BuilderView::from_builder(session.builder()),
            analysis: cache.clone(),
            skill_gap_chart: cache.skill_gap.value().map(build_chart),
            learning: cache.learning_path.value().map(|path| LearningProgress {
                completed: path.completed_count(),
                total: path.tasks.len(),
            }),
            simulator: SimulatorView {
                running: simulator.is_running(),
                progress: simulator.progress(),
                heatmap: session.heatmap().to_vec(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_names() {
        let tab: Tab = serde_json::from_str(r#""dna""#).unwrap();
        assert_eq!(tab, Tab::Dna);
        assert_eq!(serde_json::to_value(Tab::Salary).unwrap(), "salary");
        assert!(serde_json::from_str::<Tab>(r#""settings""#).is_err());
    }

    #[test]
    fn test_builder_view_shares_snapshot() {
        let mut builder = BuilderSession::default();
        builder.add_skill("Rust");
        let view = BuilderView::from_builder(&builder);
        assert!(Arc::ptr_eq(&view.resume, &builder.snapshot()));

        builder.add_skill("Go");
        assert_eq!(view.resume.skills.to_vec(), vec!["Rust".to_string()], "captured view is frozen");
    }

    #[test]
    fn test_capture_fresh_session() {
        let session = Session::default();
        let view = DashboardView::capture(&session, 0, &RecruiterSimulator::default());
        assert_eq!(view.active_tab, Tab::Dashboard);
        assert_eq!(view.progress.level, 1);
        assert!(view.upload.file.is_none());
        assert!(view.skill_gap_chart.is_none());
        assert!(view.learning.is_none());
        assert!(view.simulator.heatmap.is_empty());

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["analysis"]["jobMatch"]["status"], "empty");
        assert_eq!(json["builder"]["step"], "personal");
    }
}

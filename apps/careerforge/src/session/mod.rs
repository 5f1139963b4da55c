//! The single-user session: resume builder, analysis cache, XP tracker and the
//! cosmetic state the dashboard renders.
//!
//! `Session` is plain owned data mutated through its methods. `SessionHandle`
//! shares it behind a `tokio::sync::Mutex` together with the in-flight gates
//! and progress meters, which live outside the lock so tickers never contend
//! with request handlers. The lock is never held across an external call.

pub mod analyze;
pub mod gate;
pub mod progress;
pub mod upload;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

use crate::analysis::cache::AnalysisCache;
use crate::dashboard::simulator::{self, recruiter_heatmap, HeatmapCell, RecruiterSimulator, SimulatorError};
use crate::dashboard::views::{DashboardView, Tab};
use crate::gamification::{LevelChange, Reward, XpTracker};
use crate::intake::FileMetadata;
use crate::resume::BuilderSession;

use self::gate::InFlightGate;
use self::progress::ProgressMeter;

pub use analyze::AnalysisOutcome;
pub use upload::{UploadError, UPLOAD_FAILED_MESSAGE};

/// What the upload card shows.
#[derive(Debug, Clone, Default)]
pub struct UploadState {
    /// Retained after a failure so the user can see what was sent.
    pub file: Option<FileMetadata>,
    pub error: Option<String>,
    pub processing: bool,
}

#[derive(Debug, Default)]
pub struct Session {
    builder: BuilderSession,
    cache: AnalysisCache,
    tracker: XpTracker,
    upload: UploadState,
    heatmap: Vec<HeatmapCell>,
    active_tab: Tab,
}

impl Session {
    pub fn builder(&self) -> &BuilderSession {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut BuilderSession {
        &mut self.builder
    }

    pub fn cache(&self) -> &AnalysisCache {
        &self.cache
    }

    pub fn tracker(&self) -> &XpTracker {
        &self.tracker
    }

    pub fn upload(&self) -> &UploadState {
        &self.upload
    }

    pub fn heatmap(&self) -> &[HeatmapCell] {
        &self.heatmap
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Marks a learning-path task complete and awards task XP. Returns `None`
    /// (and awards nothing) when no path is loaded, the id is unknown, or the
    /// task was already complete.
    pub fn complete_task(&mut self, task_id: u64) -> Option<LevelChange> {
        let path = self.cache.learning_path.value_mut()?;
        if !path.complete_task(task_id) {
            return None;
        }
        let change = self.tracker.award(Reward::LearningTask);
        info!(task_id, xp = change.xp, "Learning task completed");
        Some(change)
    }
}

/// Cloneable handle shared by every request handler.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    state: Arc<Mutex<Session>>,
    upload_gate: InFlightGate,
    analysis_gate: InFlightGate,
    upload_progress: ProgressMeter,
    simulator: RecruiterSimulator,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self) -> MutexGuard<'_, Session> {
        self.state.lock().await
    }

    pub fn upload_progress(&self) -> u8 {
        self.upload_progress.get()
    }

    pub fn simulator(&self) -> &RecruiterSimulator {
        &self.simulator
    }

    pub async fn dashboard(&self) -> DashboardView {
        let session = self.lock().await;
        DashboardView::capture(&session, self.upload_progress(), self.simulator())
    }

    /// Drops the retained file, its error and the progress figure.
    pub async fn clear_upload(&self) {
        let mut session = self.lock().await;
        session.upload = UploadState::default();
        self.upload_progress.set(0);
    }

    /// Starts a recruiter simulation in the background. The heatmap and XP
    /// land when the sweep reaches 100.
    pub fn run_simulator(&self) -> Result<(), SimulatorError> {
        let handle = self.clone();
        self.simulator.launch(move |progress, ticket| {
            tokio::spawn(async move {
                let _ticket = ticket;
                handle.lock().await.heatmap.clear();
                simulator::sweep(&progress).await;

                let mut session = handle.lock().await;
                session.heatmap = recruiter_heatmap();
                let change = session.tracker.award(Reward::RecruiterSimulation);
                info!(xp = change.xp, level = change.level, "Recruiter simulation finished");
            })
        })
    }

    /// Cancels any running simulation and clears its heatmap.
    pub async fn reset_simulator(&self) {
        self.simulator.reset().await;
        self.lock().await.heatmap.clear();
    }
}

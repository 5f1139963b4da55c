use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::analysis::chart::{build_chart, SkillGapChart};
use crate::errors::AppError;
use crate::gamification::ProgressView;
use crate::session::AnalysisOutcome;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub job_description: String,
}

#[derive(Serialize)]
pub struct TaskCompletion {
    /// False when the call changed nothing.
    pub awarded: bool,
    pub progress: ProgressView,
}

/// POST /api/v1/analysis
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisOutcome>, AppError> {
    let session = state.session.clone();
    let analyzer = state.analyzer.clone();
    let outcome = tokio::spawn(async move {
        session
            .analyze_job(&req.job_description, analyzer.as_ref())
            .await
    })
    .await
    .map_err(|e| anyhow::anyhow!("Analysis task failed: {e}"))??;
    Ok(Json(outcome))
}

/// GET /api/v1/analysis/skill-gap/chart
pub async fn handle_skill_gap_chart(
    State(state): State<AppState>,
) -> Result<Json<SkillGapChart>, AppError> {
    let session = state.session.lock().await;
    session
        .cache()
        .skill_gap
        .value()
        .map(|gap| Json(build_chart(gap)))
        .ok_or_else(|| AppError::NotFound("No skill-gap analysis yet".into()))
}

/// POST /api/v1/learning-path/tasks/:id/complete
pub async fn handle_complete_task(
    State(state): State<AppState>,
    Path(task_id): Path<u64>,
) -> Json<TaskCompletion> {
    let mut session = state.session.lock().await;
    let awarded = session.complete_task(task_id).is_some();
    Json(TaskCompletion {
        awarded,
        progress: session.tracker().snapshot(),
    })
}

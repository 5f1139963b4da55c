use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::dashboard::{salary_insights, DashboardView, SalaryInsights, Tab};
use crate::errors::AppError;
use crate::gamification::ProgressView;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct TabRequest {
    pub tab: Tab,
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(State(state): State<AppState>) -> Json<DashboardView> {
    Json(state.session.dashboard().await)
}

/// PUT /api/v1/tab
pub async fn handle_set_tab(
    State(state): State<AppState>,
    Json(req): Json<TabRequest>,
) -> Json<Tab> {
    state.session.lock().await.set_active_tab(req.tab);
    Json(req.tab)
}

/// GET /api/v1/progress
pub async fn handle_progress(State(state): State<AppState>) -> Json<ProgressView> {
    Json(state.session.lock().await.tracker().snapshot())
}

/// GET /api/v1/salary
pub async fn handle_salary(State(state): State<AppState>) -> Json<SalaryInsights> {
    let session = state.session.lock().await;
    let stage = session
        .cache()
        .career_dna
        .value()
        .map(|dna| dna.career_stage.as_str());
    Json(salary_insights(stage))
}

/// POST /api/v1/simulator/run
pub async fn handle_run_simulator(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.session.run_simulator()?;
    Ok(StatusCode::ACCEPTED)
}

/// DELETE /api/v1/simulator
pub async fn handle_reset_simulator(State(state): State<AppState>) -> StatusCode {
    state.session.reset_simulator().await;
    StatusCode::NO_CONTENT
}

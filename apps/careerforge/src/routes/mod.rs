pub mod analysis;
pub mod dashboard;
pub mod health;
pub mod resume;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::errors::AppError;
use crate::state::AppState;

async fn not_implemented() -> Result<(), AppError> {
    Err(AppError::NotImplemented)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session views
        .route("/api/v1/dashboard", get(dashboard::handle_dashboard))
        .route("/api/v1/tab", put(dashboard::handle_set_tab))
        .route("/api/v1/progress", get(dashboard::handle_progress))
        .route("/api/v1/salary", get(dashboard::handle_salary))
        // Upload
        .route(
            "/api/v1/upload",
            post(upload::handle_upload)
                .delete(upload::handle_clear_upload)
                .layer(DefaultBodyLimit::max(upload::UPLOAD_BODY_LIMIT)),
        )
        // Builder
        .route("/api/v1/resume", get(resume::handle_get_resume))
        .route("/api/v1/resume/personal", put(resume::handle_update_personal))
        .route("/api/v1/resume/summary", put(resume::handle_update_summary))
        .route("/api/v1/resume/step", put(resume::handle_set_step))
        .route("/api/v1/resume/skills", post(resume::handle_add_skill))
        .route(
            "/api/v1/resume/skills/:skill",
            delete(resume::handle_remove_skill),
        )
        .route("/api/v1/resume/export", post(not_implemented))
        .route("/api/v1/resume/:list", post(resume::handle_add_item))
        .route(
            "/api/v1/resume/:list/:id",
            patch(resume::handle_update_item).delete(resume::handle_remove_item),
        )
        // Analysis
        .route("/api/v1/analysis", post(analysis::handle_analyze))
        .route(
            "/api/v1/analysis/skill-gap/chart",
            get(analysis::handle_skill_gap_chart),
        )
        .route(
            "/api/v1/learning-path/tasks/:id/complete",
            post(analysis::handle_complete_task),
        )
        // Recruiter simulator
        .route("/api/v1/simulator/run", post(dashboard::handle_run_simulator))
        .route(
            "/api/v1/simulator",
            delete(dashboard::handle_reset_simulator),
        )
        .with_state(state)
}

//! Builder routes: every form edit is one setter call on the session's builder.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::dashboard::views::BuilderView;
use crate::errors::AppError;
use crate::resume::{BuilderStep, ItemId, PersonalField, PersonalInfo};
use crate::state::AppState;

/// The id-keyed list fields of a resume.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeList {
    Experience,
    Education,
    Projects,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum PersonalUpdate {
    Field { field: PersonalField, value: String },
    Full(PersonalInfo),
}

#[derive(Deserialize)]
pub struct SummaryRequest {
    pub summary: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepDirection {
    Next,
    Previous,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum StepRequest {
    Jump { step: BuilderStep },
    Move { direction: StepDirection },
}

#[derive(Deserialize)]
pub struct FieldUpdate {
    pub field: String,
    pub value: String,
}

#[derive(Deserialize)]
pub struct SkillRequest {
    pub skill: String,
}

#[derive(Serialize)]
pub struct CreatedItem {
    pub id: ItemId,
}

#[derive(Serialize)]
pub struct SkillsResponse {
    pub changed: bool,
    pub skills: Vec<String>,
}

fn parse_field<F: DeserializeOwned>(list: ResumeList, name: &str) -> Result<F, AppError> {
    serde_json::from_value(serde_json::Value::String(name.to_string()))
        .map_err(|_| AppError::Validation(format!("Unknown field '{name}' for {list:?}")))
}

fn missing(list: ResumeList, id: ItemId) -> AppError {
    AppError::NotFound(format!("No {list:?} item with id {id}"))
}

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<BuilderView> {
    let session = state.session.lock().await;
    Json(BuilderView::from_builder(session.builder()))
}

/// PUT /api/v1/resume/personal
pub async fn handle_update_personal(
    State(state): State<AppState>,
    Json(update): Json<PersonalUpdate>,
) -> Json<BuilderView> {
    let mut session = state.session.lock().await;
    let builder = session.builder_mut();
    match update {
        PersonalUpdate::Field { field, value } => builder.update_personal_field(field, value),
        PersonalUpdate::Full(info) => builder.set_personal_info(info),
    };
    Json(BuilderView::from_builder(builder))
}

/// PUT /api/v1/resume/summary
pub async fn handle_update_summary(
    State(state): State<AppState>,
    Json(req): Json<SummaryRequest>,
) -> Json<BuilderView> {
    let mut session = state.session.lock().await;
    let builder = session.builder_mut();
    builder.set_summary(req.summary);
    Json(BuilderView::from_builder(builder))
}

/// PUT /api/v1/resume/step
pub async fn handle_set_step(
    State(state): State<AppState>,
    Json(req): Json<StepRequest>,
) -> Json<BuilderStep> {
    let mut session = state.session.lock().await;
    let builder = session.builder_mut();
    let step = match req {
        StepRequest::Jump { step } => {
            builder.set_step(step);
            step
        }
        StepRequest::Move { direction: StepDirection::Next } => builder.next_step(),
        StepRequest::Move { direction: StepDirection::Previous } => builder.previous_step(),
    };
    Json(step)
}

/// POST /api/v1/resume/:list
pub async fn handle_add_item(
    State(state): State<AppState>,
    Path(list): Path<ResumeList>,
) -> (StatusCode, Json<CreatedItem>) {
    let mut session = state.session.lock().await;
    let builder = session.builder_mut();
    let id = match list {
        ResumeList::Experience => builder.add_experience(),
        ResumeList::Education => builder.add_education(),
        ResumeList::Projects => builder.add_project(),
    };
    (StatusCode::CREATED, Json(CreatedItem { id }))
}

/// PATCH /api/v1/resume/:list/:id
pub async fn handle_update_item(
    State(state): State<AppState>,
    Path((list, id)): Path<(ResumeList, u64)>,
    Json(req): Json<FieldUpdate>,
) -> Result<Json<BuilderView>, AppError> {
    let id = ItemId(id);
    let mut session = state.session.lock().await;
    let builder = session.builder_mut();
    let updated = match list {
        ResumeList::Experience => {
            builder.update_experience(id, parse_field(list, &req.field)?, req.value)
        }
        ResumeList::Education => {
            builder.update_education(id, parse_field(list, &req.field)?, req.value)
        }
        ResumeList::Projects => builder.update_project(id, parse_field(list, &req.field)?, req.value),
    };
    if !updated {
        return Err(missing(list, id));
    }
    Ok(Json(BuilderView::from_builder(builder)))
}

/// DELETE /api/v1/resume/:list/:id
pub async fn handle_remove_item(
    State(state): State<AppState>,
    Path((list, id)): Path<(ResumeList, u64)>,
) -> Result<StatusCode, AppError> {
    let id = ItemId(id);
    let mut session = state.session.lock().await;
    let builder = session.builder_mut();
    let removed = match list {
        ResumeList::Experience => builder.remove_experience(id),
        ResumeList::Education => builder.remove_education(id),
        ResumeList::Projects => builder.remove_project(id),
    };
    if !removed {
        return Err(missing(list, id));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/resume/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Json(req): Json<SkillRequest>,
) -> Json<SkillsResponse> {
    let mut session = state.session.lock().await;
    let builder = session.builder_mut();
    let changed = builder.add_skill(&req.skill);
    Json(SkillsResponse {
        changed,
        skills: builder.data().skills.to_vec(),
    })
}

/// DELETE /api/v1/resume/skills/:skill
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path(skill): Path<String>,
) -> Json<SkillsResponse> {
    let mut session = state.session.lock().await;
    let builder = session.builder_mut();
    let changed = builder.remove_skill(&skill);
    Json(SkillsResponse {
        changed,
        skills: builder.data().skills.to_vec(),
    })
}

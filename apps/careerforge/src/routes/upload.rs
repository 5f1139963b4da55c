use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::debug;

use crate::analysis::models::ProcessedResumeData;
use crate::errors::AppError;
use crate::gamification::ProgressView;
use crate::intake::{UploadedFile, MAX_UPLOAD_BYTES};
use crate::state::AppState;

/// Request body cap for the upload route. Leaves room above the file limit so
/// oversize files reach the validator and get its message.
pub const UPLOAD_BODY_LIMIT: usize = 2 * MAX_UPLOAD_BYTES as usize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub processed: ProcessedResumeData,
    pub progress: ProgressView,
}

/// POST /api/v1/upload (multipart, field `file`)
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read uploaded file: {e}")))?;
        debug!(%name, %content_type, size = bytes.len(), "Received upload");
        file = Some(UploadedFile::new(name, content_type, bytes));
    }
    let file = file.ok_or_else(|| AppError::Validation("Missing multipart field 'file'".into()))?;

    // Detached so a dropped connection cannot leave the session mid-upload.
    let session = state.session.clone();
    let extractor = state.extractor.clone();
    let analyzer = state.analyzer.clone();
    let processed = tokio::spawn(async move {
        session
            .handle_upload(file, extractor.as_ref(), analyzer.as_ref())
            .await
    })
    .await
    .map_err(|e| anyhow::anyhow!("Upload task failed: {e}"))??;

    let progress = state.session.lock().await.tracker().snapshot();
    Ok(Json(UploadResponse {
        processed,
        progress,
    }))
}

/// DELETE /api/v1/upload
pub async fn handle_clear_upload(State(state): State<AppState>) -> StatusCode {
    state.session.clear_upload().await;
    StatusCode::NO_CONTENT
}

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a status object with the service version and active backends.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "analysisBackend": format!("{:?}", state.config.analysis_backend).to_lowercase(),
        "extractionBackend": format!("{:?}", state.config.extraction_backend).to_lowercase(),
    }))
}

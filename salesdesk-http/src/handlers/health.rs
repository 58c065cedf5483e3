use axum::{extract::State, Json};
use std::sync::Arc;

use super::AppState;
use crate::dto::HealthResponse;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up; flags describe the spreadsheet backend", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let host = hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string());

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: salesdesk::types::creation_timestamp(),
        credentials_file_exists: state.sheets.credentials_file_exists(),
        spreadsheet_configured: state.sheets.spreadsheet_id().is_some(),
        service_initialized: state.store.remote_configured(),
        backup_file: state.backup_file.display().to_string(),
        host,
    })
}

use axum::{body::Bytes, extract::State, Json};
use std::sync::Arc;

use super::AppState;
use crate::dto::{ListSalesResponse, SubmitSaleRequest, SubmitSaleResponse};
use salesdesk::SalesError;

/// Submit a new sales entry
#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "sales",
    request_body = SubmitSaleRequest,
    responses(
        (status = 200, description = "Entry stored in the sheet or the local backup", body = SubmitSaleResponse),
        (status = 400, description = "Missing or invalid field"),
        (status = 500, description = "Body is not a JSON object, or the backup write failed in strict mode")
    )
)]
pub async fn submit_sale(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SubmitSaleResponse>, SalesError> {
    let raw: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!("Error processing sales entry: {}", e);
        SalesError::InvalidPayload(format!("Request body is not valid JSON: {}", e))
    })?;

    let outcome = state.store.submit(&raw).await.map_err(|e| {
        if e.is_client_error() {
            tracing::warn!("Rejected sales entry: {}", e);
        } else {
            tracing::error!("Error processing sales entry: {}", e);
        }
        e
    })?;

    Ok(Json(SubmitSaleResponse::from(&outcome)))
}

/// List stored sales entries
#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "sales",
    responses(
        (status = 200, description = "Entries from the sheet, or from the local backup when the sheet is unavailable", body = ListSalesResponse)
    )
)]
pub async fn list_sales(State(state): State<Arc<AppState>>) -> Json<ListSalesResponse> {
    let listed = state.store.list().await;
    Json(ListSalesResponse {
        success: true,
        data: listed.records,
        source: listed.source,
    })
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use salesdesk::{AppendReceipt, Backend, SalesRecord, SubmitOutcome};

/// Body accepted by `POST /api/sales`.
///
/// Only documents the shape: the handler parses the body itself so it can
/// report missing fields by name. `boxesSold` may be a number or a numeric
/// string.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSaleRequest {
    pub employee_name: String,
    #[schema(value_type = u64)]
    pub boxes_sold: serde_json::Value,
    pub category: String,
    pub week_date: String,
    #[serde(default)]
    pub remarks: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSaleResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
    pub backend: Backend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updates: Option<AppendReceipt>,
}

impl From<&SubmitOutcome> for SubmitSaleResponse {
    fn from(outcome: &SubmitOutcome) -> Self {
        Self {
            success: true,
            message: outcome.message().to_string(),
            timestamp: outcome.timestamp.clone(),
            backend: outcome.backend(),
            warning: outcome.warning().map(str::to_string),
            updates: outcome.receipt().cloned(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListSalesResponse {
    pub success: bool,
    pub data: Vec<SalesRecord>,
    pub source: Backend,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub credentials_file_exists: bool,
    pub spreadsheet_configured: bool,
    pub service_initialized: bool,
    pub backup_file: String,
    pub host: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesdesk::store::{FallbackReason, StoredIn};

    fn outcome(stored_in: StoredIn) -> SubmitOutcome {
        SubmitOutcome {
            timestamp: "2024-03-01T10:00:00.000000".to_string(),
            record: SalesRecord {
                timestamp: "2024-03-01T10:00:00.000000".to_string(),
                employee_name: "Alice".to_string(),
                boxes_sold: 4,
                category: "A".to_string(),
                week_date: "W9".to_string(),
                remarks: String::new(),
            },
            stored_in,
        }
    }

    #[test]
    fn test_remote_response_carries_updates() {
        let resp = SubmitSaleResponse::from(&outcome(StoredIn::Remote(AppendReceipt {
            updated_range: Some("Sheet1!A2:F2".into()),
            updated_rows: 1,
        })));
        let v = serde_json::to_value(&resp).unwrap();
        assert_eq!(v["success"], true);
        assert_eq!(v["backend"], "remote");
        assert_eq!(v["updates"]["updatedRows"], 1);
        assert!(v.get("warning").is_none());
    }

    #[test]
    fn test_fallback_response_carries_warning() {
        let resp = SubmitSaleResponse::from(&outcome(StoredIn::Local {
            reason: FallbackReason::CallFailed("503 Service Unavailable".into()),
            persisted: true,
        }));
        let v = serde_json::to_value(&resp).unwrap();
        assert_eq!(v["backend"], "local");
        assert_eq!(v["warning"], "503 Service Unavailable");
        assert_eq!(v["message"], "Sales entry saved locally (Google Sheets error)");
        assert!(v.get("updates").is_none());
    }
}

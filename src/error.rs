use http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum SalesError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Remote backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Remote backend call failed: {0}")]
    BackendCall(String),

    #[error("Local backup store error: {0}")]
    LocalStore(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),
}

pub type Result<T> = std::result::Result<T, SalesError>;

impl From<std::io::Error> for SalesError {
    fn from(e: std::io::Error) -> Self {
        SalesError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for SalesError {
    fn from(e: serde_json::Error) -> Self {
        SalesError::Json(e.to_string())
    }
}

impl SalesError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SalesError::MissingField(_) => StatusCode::BAD_REQUEST,
            SalesError::InvalidField { .. } => StatusCode::BAD_REQUEST,
            SalesError::InvalidPayload(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SalesError::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            SalesError::BackendCall(_) => StatusCode::BAD_GATEWAY,
            SalesError::LocalStore(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SalesError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SalesError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SalesError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code used in error bodies and logs.
    pub fn code(&self) -> &'static str {
        match self {
            SalesError::MissingField(_) => "missing_field",
            SalesError::InvalidField { .. } => "invalid_field",
            SalesError::InvalidPayload(_) => "invalid_payload",
            SalesError::BackendUnavailable(_) => "backend_unavailable",
            SalesError::BackendCall(_) => "backend_call_failed",
            SalesError::LocalStore(_) => "local_store_error",
            SalesError::Config(_) => "config_error",
            SalesError::Io(_) => "io_error",
            SalesError::Json(_) => "json_error",
        }
    }

    /// Whether the caller is at fault. Only these reach clients as 4xx.
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

// Axum IntoResponse implementation (feature-gated)
#[cfg(feature = "axum-support")]
use axum::response::{IntoResponse, Json, Response};
#[cfg(feature = "axum-support")]
use serde::Serialize;

#[cfg(feature = "axum-support")]
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub request_id: String,
}

#[cfg(feature = "axum-support")]
impl IntoResponse for SalesError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = match &self {
            SalesError::MissingField(field) => format!("Missing required field: {}", field),
            SalesError::InvalidField { field, reason } => {
                format!("Invalid value for field '{}': {}", field, reason)
            }
            other => other.to_string(),
        };

        let body = ErrorResponse {
            error,
            code: self.code().to_string(),
            request_id: format!("req_sd_{}", uuid::Uuid::new_v4()),
        };

        (status, Json(body)).into_response()
    }
}

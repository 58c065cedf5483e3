pub mod auth;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;

use std::sync::Arc;

pub use auth::{AccessTokenProvider, ServiceAccountAuth, StaticToken};
pub use client::SheetsClient;
pub use config::SheetsConfig;
pub use credentials::ServiceAccountKey;
pub use error::{Result, SheetsError};

/// Build the Sheets client once at startup.
///
/// Missing configuration or credentials are logged and yield `None`, which
/// puts the service in local-backup-only mode for its whole lifetime.
pub fn connect(config: &SheetsConfig) -> Option<Arc<SheetsClient>> {
    match SheetsClient::from_config(config) {
        Ok(client) => {
            tracing::info!(
                spreadsheet_id = client.spreadsheet_id(),
                range = client.range(),
                "Google Sheets service initialized successfully"
            );
            Some(Arc::new(client))
        }
        Err(SheetsError::Config(msg)) | Err(SheetsError::Credentials(msg)) => {
            tracing::warn!("Google Sheets not configured: {}", msg);
            None
        }
        Err(e) => {
            tracing::error!("Failed to initialize Google Sheets service: {}", e);
            None
        }
    }
}

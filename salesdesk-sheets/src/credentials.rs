use serde::Deserialize;
use std::path::Path;

use crate::error::{Result, SheetsError};

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

/// The subset of a Google service-account key file this client needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub private_key_id: Option<String>,
    pub private_key: String,
    pub client_email: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SheetsError::Credentials(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let key: ServiceAccountKey = serde_json::from_str(contents)
            .map_err(|e| SheetsError::Credentials(format!("Invalid key file: {}", e)))?;

        if let Some(kind) = key.key_type.as_deref() {
            if kind != "service_account" {
                return Err(SheetsError::Credentials(format!(
                    "Expected a service_account key, got {}",
                    kind
                )));
            }
        }
        if key.private_key.trim().is_empty() || key.client_email.trim().is_empty() {
            return Err(SheetsError::Credentials(
                "Key file is missing private_key or client_email".into(),
            ));
        }
        Ok(key)
    }
}

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use salesdesk::{AppendReceipt, TabularBackend};

use crate::auth::{AccessTokenProvider, ServiceAccountAuth};
use crate::config::SheetsConfig;
use crate::credentials::ServiceAccountKey;
use crate::error::{Result, SheetsError};

#[derive(Deserialize)]
struct AppendResponse {
    #[serde(default)]
    updates: AppendReceipt,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Google Sheets v4 `values` client bound to one spreadsheet range.
pub struct SheetsClient {
    http_client: reqwest::Client,
    api_base: String,
    spreadsheet_id: String,
    range: String,
    auth: Arc<dyn AccessTokenProvider>,
}

impl SheetsClient {
    pub fn new(config: &SheetsConfig, auth: Arc<dyn AccessTokenProvider>) -> Result<Self> {
        let spreadsheet_id = config
            .spreadsheet_id()
            .ok_or_else(|| SheetsError::Config("No spreadsheet id configured".into()))?
            .to_string();

        Ok(Self {
            http_client: build_http_client(config),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            spreadsheet_id,
            range: config.range.clone(),
            auth,
        })
    }

    /// Load the service-account key and build an authenticated client.
    ///
    /// No network call is made; the first token is fetched on first use.
    pub fn from_config(config: &SheetsConfig) -> Result<Self> {
        if config.spreadsheet_id().is_none() {
            return Err(SheetsError::Config("No spreadsheet id configured".into()));
        }
        if !config.credentials_file_exists() {
            return Err(SheetsError::Credentials(format!(
                "Credentials file {} not found",
                config.credentials_file.display()
            )));
        }
        let key = ServiceAccountKey::from_file(&config.credentials_file)?;
        let auth = ServiceAccountAuth::new(key, build_http_client(config))?;
        Self::new(config, Arc::new(auth))
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    pub fn range(&self) -> &str {
        &self.range
    }

    fn values_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.api_base,
            urlencoding::encode(&self.spreadsheet_id),
            urlencoding::encode(&self.range)
        )
    }

    /// `values.append` with `valueInputOption=RAW`.
    pub async fn append_values(&self, row: Vec<serde_json::Value>) -> Result<AppendReceipt> {
        let token = self.auth.access_token().await?;
        let url = format!("{}:append", self.values_url());

        let response = self
            .http_client
            .post(&url)
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(token)
            .json(&serde_json::json!({ "values": [row] }))
            .send()
            .await?;

        let response = check_status(response).await?;
        let body: AppendResponse = response
            .json()
            .await
            .map_err(|e| SheetsError::Response(format!("append: {}", e)))?;

        tracing::info!(
            "Row appended successfully: {} rows updated",
            body.updates.updated_rows
        );
        Ok(body.updates)
    }

    /// `values.get` over the configured range. Cells come back as display strings.
    pub async fn get_values(&self) -> Result<Vec<Vec<String>>> {
        let token = self.auth.access_token().await?;

        let response = self
            .http_client
            .get(self.values_url())
            .bearer_auth(token)
            .send()
            .await?;

        let response = check_status(response).await?;
        let body: ValueRange = response
            .json()
            .await
            .map_err(|e| SheetsError::Response(format!("get: {}", e)))?;

        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }
}

#[async_trait]
impl TabularBackend for SheetsClient {
    async fn append_row(&self, row: Vec<serde_json::Value>) -> salesdesk::Result<AppendReceipt> {
        self.append_values(row).await.map_err(|e| {
            tracing::error!("Failed to append row: {}", e);
            e.into()
        })
    }

    async fn read_rows(&self) -> salesdesk::Result<Vec<Vec<String>>> {
        self.get_values().await.map_err(|e| {
            tracing::error!("Failed to get data: {}", e);
            e.into()
        })
    }
}

fn build_http_client(config: &SheetsConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SheetsError::Status {
        status: status.as_u16(),
        body,
    })
}

fn cell_to_string(cell: serde_json::Value) -> String {
    match cell {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

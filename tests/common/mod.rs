use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;

use salesdesk::{StoreConfig, TabularBackend};
use salesdesk_http::ServerConfig;
use salesdesk_sheets::{SheetsClient, SheetsConfig, StaticToken};

pub struct TestServer {
    pub addr: String,
    pub backup_file: PathBuf,
    _temp_dir: TempDir,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Parsed backup file, or `None` when nothing has been written yet.
    #[allow(dead_code)]
    pub fn backup_entries(&self) -> Option<Vec<serde_json::Value>> {
        let raw = std::fs::read_to_string(&self.backup_file).ok()?;
        Some(serde_json::from_str(&raw).unwrap())
    }
}

/// Server with no spreadsheet configured: every write goes to the backup file.
#[allow(dead_code)]
pub async fn spawn_server() -> TestServer {
    spawn_with(None, |config| config).await
}

/// Server whose spreadsheet backend talks to `api_base` (usually a wiremock).
#[allow(dead_code)]
pub async fn spawn_server_with_sheet(api_base: &str) -> TestServer {
    let api_base = api_base.to_string();
    spawn_with(Some(api_base), |config| config).await
}

#[allow(dead_code)]
pub async fn spawn_strict_server(backup_file: PathBuf) -> TestServer {
    spawn_with(None, move |mut config| {
        config.store = config.store.with_backup_file(backup_file).strict(true);
        config
    })
    .await
}

async fn spawn_with(
    api_base: Option<String>,
    customize: impl FnOnce(ServerConfig) -> ServerConfig,
) -> TestServer {
    let temp_dir = TempDir::new().unwrap();
    let backup_file = temp_dir.path().join("sales_data_backup.json");

    let sheets = SheetsConfig {
        credentials_file: temp_dir.path().join("credentials.json"),
        spreadsheet_id: api_base.as_ref().map(|_| "sheet-123".to_string()),
        api_base: api_base.unwrap_or_else(|| "http://127.0.0.1:9".to_string()),
        request_timeout_secs: 5,
        ..Default::default()
    };
    let config = customize(ServerConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        max_body_kb: 64,
        store: StoreConfig::default().with_backup_file(&backup_file),
        sheets,
    });

    let remote: Option<Arc<dyn TabularBackend>> = if config.sheets.spreadsheet_id().is_some() {
        let client =
            SheetsClient::new(&config.sheets, Arc::new(StaticToken("test-token".into()))).unwrap();
        Some(Arc::new(client) as Arc<dyn TabularBackend>)
    } else {
        None
    };

    let state = salesdesk_http::build_state(&config, remote);
    let app = salesdesk_http::build_router(state, config.max_body_kb);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    TestServer {
        addr,
        backup_file: config.store.backup_file.clone(),
        _temp_dir: temp_dir,
    }
}

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{health, index, list_sales, submit_sale, AppState};
use crate::openapi::ApiDoc;
use salesdesk::{SalesError, StoreConfig, TabularBackend};
use salesdesk_sheets::SheetsConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub max_body_kb: usize,
    pub store: StoreConfig,
    pub sheets: SheetsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            max_body_kb: 64,
            store: StoreConfig::default(),
            sheets: SheetsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Parse `bind_addr`; a malformed address is a startup configuration error.
    pub fn socket_addr(&self) -> salesdesk::Result<SocketAddr> {
        self.bind_addr.parse().map_err(|e| {
            SalesError::Config(format!("Invalid bind address '{}': {}", self.bind_addr, e))
        })
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Wire the record store for `config`, with `remote` as the spreadsheet backend.
pub fn build_state(
    config: &ServerConfig,
    remote: Option<Arc<dyn TabularBackend>>,
) -> Arc<AppState> {
    let store = salesdesk::build_record_store(&config.store, remote);
    Arc::new(AppState {
        store: Arc::new(store),
        sheets: config.sheets.clone(),
        backup_file: config.store.backup_file.clone(),
    })
}

pub fn build_router(state: Arc<AppState>, max_body_kb: usize) -> Router {
    let swagger = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());

    let api = Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/sales", get(list_sales).post(submit_sale))
        .with_state(state);

    Router::new()
        .merge(api)
        .merge(swagger)
        .layer(DefaultBodyLimit::max(max_body_kb * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive().max_age(std::time::Duration::from_secs(86400)))
}

pub async fn serve(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let addr = config.socket_addr()?;

    tracing::info!(
        credentials_file = %config.sheets.credentials_file.display(),
        credentials_file_exists = config.sheets.credentials_file_exists(),
        spreadsheet_id = config.sheets.spreadsheet_id().unwrap_or("<unset>"),
        backup_file = %config.store.backup_file.display(),
        backup_capacity = config.store.backup_capacity,
        "Starting sales dashboard backend"
    );

    let remote = salesdesk_sheets::connect(&config.sheets)
        .map(|client| client as Arc<dyn TabularBackend>);
    if remote.is_none() {
        tracing::warn!("Running in local-backup-only mode");
    }

    let state = build_state(&config, remote);
    let app = build_router(state, config.max_body_kb);

    tracing::info!("Server starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_addr_parses() {
        let addr = ServerConfig::default().socket_addr().unwrap();
        assert_eq!(addr.port(), 5000);
        assert!(addr.ip().is_unspecified());
    }

    #[test]
    fn test_malformed_bind_addr_is_config_error() {
        let config = ServerConfig {
            bind_addr: "localhost:not-a-port".to_string(),
            ..Default::default()
        };
        match config.socket_addr() {
            Err(SalesError::Config(msg)) => assert!(msg.contains("localhost:not-a-port")),
            other => panic!("expected Config error, got {:?}", other),
        }
    }
}

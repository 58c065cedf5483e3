//! # Salesdesk
//!
//! Record store behind the sales-entry intake service. Records submitted by
//! the front-end form are appended to a spreadsheet; when the spreadsheet is
//! not configured or a call to it fails, they go to a bounded JSON backup file
//! instead.
//!
//! The HTTP surface lives in `salesdesk-http`, the Google Sheets client in
//! `salesdesk-sheets`, and the binary in `salesdesk-server`.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use salesdesk::store::{LocalBackupStore, LocalPersistence, RecordStore};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # async fn run() -> salesdesk::Result<()> {
//! let backup = Arc::new(LocalBackupStore::new("./sales_data_backup.json", 100));
//! let store = RecordStore::new(None, Arc::new(LocalPersistence::new(backup)));
//!
//! let outcome = store
//!     .submit(&json!({
//!         "employeeName": "Alice",
//!         "boxesSold": "12",
//!         "category": "Antibiotics",
//!         "weekDate": "2024-W03"
//!     }))
//!     .await?;
//! assert_eq!(outcome.record.boxes_sold, 12);
//!
//! let listed = store.list().await;
//! println!("{} records from {}", listed.records.len(), listed.source);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature flags
//!
//! | Feature | Dependencies | Use case |
//! |---------|-------------|----------|
//! | `axum-support` | axum | [`SalesError`] implements `IntoResponse` |
//! | `openapi` | utoipa | OpenAPI schema generation |

pub mod config;
pub mod error;
pub mod store;
pub mod types;

use std::sync::Arc;

pub use config::StoreConfig;
pub use error::{Result, SalesError};
pub use store::{
    AppendReceipt, Backend, ListOutcome, LocalBackupStore, LocalPersistence, Persistence,
    RecordStore, RemotePersistence, StoredIn, SubmitOutcome, TabularBackend,
};
pub use types::{SalesRecord, SalesSubmission};

/// Build the facade from config: local backup always, remote when supplied.
pub fn build_record_store(
    config: &StoreConfig,
    remote: Option<Arc<dyn TabularBackend>>,
) -> RecordStore {
    let backup = Arc::new(LocalBackupStore::from_config(config));
    let local: Arc<dyn Persistence> = Arc::new(LocalPersistence::new(backup));
    let remote = remote
        .map(|backend| Arc::new(RemotePersistence::new(backend)) as Arc<dyn Persistence>);
    RecordStore::new(remote, local).with_strict_backup(config.strict_backup)
}

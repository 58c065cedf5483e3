//! Record persistence.
//!
//! Two [`Persistence`] implementations sit behind the [`RecordStore`] facade:
//! [`RemotePersistence`] maps records onto rows of any [`TabularBackend`]
//! (the spreadsheet in production), and [`LocalPersistence`] wraps the
//! bounded [`LocalBackupStore`] file. The facade owns the fallback policy.

pub mod facade;
pub mod local;
pub mod remote;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::SalesRecord;

pub use facade::{FallbackReason, ListOutcome, RecordStore, StoredIn, SubmitOutcome};
pub use local::{LocalBackupStore, LocalPersistence};
pub use remote::{record_from_row, record_to_row, RemotePersistence};

/// Which backend served an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Remote,
    Local,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Remote => "remote",
            Backend::Local => "local",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of a successful append, as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AppendReceipt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_range: Option<String>,
    #[serde(default)]
    pub updated_rows: u64,
}

/// Raw tabular storage: append one row, read every row back.
///
/// Cells are written as JSON values so integers stay integers in the sheet;
/// they come back as display strings.
#[async_trait]
pub trait TabularBackend: Send + Sync {
    async fn append_row(&self, row: Vec<serde_json::Value>) -> Result<AppendReceipt>;

    /// All rows in the configured range, header row included.
    async fn read_rows(&self) -> Result<Vec<Vec<String>>>;
}

#[async_trait]
pub trait Persistence: Send + Sync {
    fn backend(&self) -> Backend;

    async fn append(&self, record: &SalesRecord) -> Result<AppendReceipt>;

    /// Every stored record, newest first where the backend keeps an order.
    ///
    /// `Ok(None)` means the backend holds no data at all (not even a header),
    /// which callers treat the same as an unavailable backend.
    async fn read_all(&self) -> Result<Option<Vec<SalesRecord>>>;
}

use std::sync::Arc;

use super::{AppendReceipt, Backend, Persistence};
use crate::error::{Result, SalesError};
use crate::types::{creation_timestamp, SalesRecord, SalesSubmission};

/// Why a record went to the local backup instead of the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No remote backend was configured at startup.
    Unavailable,
    /// The remote call failed; carries the error text returned as a warning.
    CallFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredIn {
    Remote(AppendReceipt),
    Local {
        reason: FallbackReason,
        /// False when the local write itself failed and was swallowed.
        persisted: bool,
    },
}

#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub timestamp: String,
    pub record: SalesRecord,
    pub stored_in: StoredIn,
}

impl SubmitOutcome {
    pub fn backend(&self) -> Backend {
        match self.stored_in {
            StoredIn::Remote(_) => Backend::Remote,
            StoredIn::Local { .. } => Backend::Local,
        }
    }

    pub fn message(&self) -> &'static str {
        match &self.stored_in {
            StoredIn::Remote(_) => "Sales entry saved successfully",
            StoredIn::Local {
                reason: FallbackReason::Unavailable,
                ..
            } => "Sales entry saved locally (Google Sheets not configured)",
            StoredIn::Local {
                reason: FallbackReason::CallFailed(_),
                ..
            } => "Sales entry saved locally (Google Sheets error)",
        }
    }

    pub fn warning(&self) -> Option<&str> {
        match &self.stored_in {
            StoredIn::Local {
                reason: FallbackReason::CallFailed(msg),
                ..
            } => Some(msg.as_str()),
            _ => None,
        }
    }

    pub fn receipt(&self) -> Option<&AppendReceipt> {
        match &self.stored_in {
            StoredIn::Remote(receipt) => Some(receipt),
            StoredIn::Local { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListOutcome {
    pub records: Vec<SalesRecord>,
    pub source: Backend,
}

/// Single decision point for where records are written and read.
///
/// The remote backend is tried first; the local backup is touched only when
/// the remote is absent or its call fails. A record is never written to both.
pub struct RecordStore {
    remote: Option<Arc<dyn Persistence>>,
    local: Arc<dyn Persistence>,
    strict_backup: bool,
}

impl RecordStore {
    pub fn new(remote: Option<Arc<dyn Persistence>>, local: Arc<dyn Persistence>) -> Self {
        Self {
            remote,
            local,
            strict_backup: false,
        }
    }

    /// Fail the submit when the fallback write cannot be persisted.
    pub fn with_strict_backup(mut self, strict: bool) -> Self {
        self.strict_backup = strict;
        self
    }

    pub fn remote_configured(&self) -> bool {
        self.remote.is_some()
    }

    /// Validate and persist a raw submit body.
    ///
    /// Only validation failures (and, in strict mode, a failed local write)
    /// are returned as errors. Remote failures turn into a local write.
    pub async fn submit(&self, raw: &serde_json::Value) -> Result<SubmitOutcome> {
        let submission = SalesSubmission::from_json(raw)?;
        self.submit_validated(submission).await
    }

    pub async fn submit_validated(&self, submission: SalesSubmission) -> Result<SubmitOutcome> {
        let timestamp = creation_timestamp();
        let record = submission.into_record(timestamp.clone());

        let reason = match &self.remote {
            Some(remote) => match remote.append(&record).await {
                Ok(receipt) => {
                    tracing::info!(employee = %record.employee_name, "Sales entry saved to remote sheet");
                    return Ok(SubmitOutcome {
                        timestamp,
                        record,
                        stored_in: StoredIn::Remote(receipt),
                    });
                }
                Err(e) => {
                    tracing::error!("Failed to save to remote sheet: {}", e);
                    FallbackReason::CallFailed(e.to_string())
                }
            },
            None => FallbackReason::Unavailable,
        };

        let persisted = match self.local.append(&record).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("Failed to save to local backup: {}", e);
                if self.strict_backup {
                    return Err(match e {
                        SalesError::LocalStore(_) => e,
                        other => SalesError::LocalStore(other.to_string()),
                    });
                }
                false
            }
        };

        Ok(SubmitOutcome {
            timestamp,
            record,
            stored_in: StoredIn::Local { reason, persisted },
        })
    }

    /// Every stored record, from the remote sheet when it answers, else the backup.
    pub async fn list(&self) -> ListOutcome {
        if let Some(remote) = &self.remote {
            match remote.read_all().await {
                Ok(Some(records)) => {
                    return ListOutcome {
                        records,
                        source: remote.backend(),
                    }
                }
                Ok(None) => tracing::info!("Remote sheet is empty, reading local backup"),
                Err(e) => tracing::error!("Failed to get data from remote sheet: {}", e),
            }
        }

        let records = match self.local.read_all().await {
            Ok(records) => records.unwrap_or_default(),
            Err(e) => {
                tracing::error!("Failed to read from local backup: {}", e);
                Vec::new()
            }
        };
        ListOutcome {
            records,
            source: self.local.backend(),
        }
    }
}

use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{AppendReceipt, Backend, Persistence};
use crate::config::StoreConfig;
use crate::error::{Result, SalesError};
use crate::types::SalesRecord;

/// Bounded, newest-first list of records kept in a single JSON file.
///
/// Every append rewrites the whole file. Writes land in a sibling temp file
/// that is renamed over the target, so readers see either the old or the new
/// list. Concurrent appends are not serialized: the last rename wins.
#[derive(Debug, Clone)]
pub struct LocalBackupStore {
    path: PathBuf,
    capacity: usize,
}

impl LocalBackupStore {
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity: capacity.max(1),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(&config.backup_file, config.backup_capacity)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Insert `record` at the front and trim to capacity. Returns the new length.
    pub fn append(&self, record: &SalesRecord) -> Result<usize> {
        let mut records = self.read_all();
        records.insert(0, record.clone());
        records.truncate(self.capacity);
        self.write_all(&records)?;
        tracing::info!(
            path = %self.path.display(),
            entries = records.len(),
            "Record saved to local backup"
        );
        Ok(records.len())
    }

    /// The stored list, or empty if the file is missing or unparseable.
    pub fn read_all(&self) -> Vec<SalesRecord> {
        match self.try_read_all() {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(path = %self.path.display(), "Failed to read local backup: {}", e);
                Vec::new()
            }
        }
    }

    /// Like [`read_all`](Self::read_all) but reports why the file could not be used.
    pub fn try_read_all(&self) -> Result<Vec<SalesRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| SalesError::LocalStore(format!("read {}: {}", self.path.display(), e)))?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&contents)
            .map_err(|e| SalesError::LocalStore(format!("parse {}: {}", self.path.display(), e)))
    }

    pub fn len(&self) -> usize {
        self.read_all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the backup directory accepts new files. Used by setup checks.
    pub fn check_writable(&self) -> Result<()> {
        let dir = self.parent_dir();
        std::fs::create_dir_all(&dir)
            .map_err(|e| SalesError::LocalStore(format!("create {}: {}", dir.display(), e)))?;
        tempfile::NamedTempFile::new_in(&dir)
            .map(|_| ())
            .map_err(|e| SalesError::LocalStore(format!("write in {}: {}", dir.display(), e)))
    }

    fn write_all(&self, records: &[SalesRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        let dir = self.parent_dir();
        std::fs::create_dir_all(&dir)
            .map_err(|e| SalesError::LocalStore(format!("create {}: {}", dir.display(), e)))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)
            .map_err(|e| SalesError::LocalStore(format!("temp file in {}: {}", dir.display(), e)))?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .map_err(|e| SalesError::LocalStore(format!("replace {}: {}", self.path.display(), e)))?;
        Ok(())
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

/// [`Persistence`] over a [`LocalBackupStore`]; file I/O runs on the blocking pool.
pub struct LocalPersistence {
    store: Arc<LocalBackupStore>,
}

impl LocalPersistence {
    pub fn new(store: Arc<LocalBackupStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<LocalBackupStore> {
        &self.store
    }
}

#[async_trait]
impl Persistence for LocalPersistence {
    fn backend(&self) -> Backend {
        Backend::Local
    }

    async fn append(&self, record: &SalesRecord) -> Result<AppendReceipt> {
        let store = Arc::clone(&self.store);
        let record = record.clone();
        tokio::task::spawn_blocking(move || store.append(&record))
            .await
            .map_err(|e| SalesError::LocalStore(format!("spawn_blocking join error: {}", e)))??;
        Ok(AppendReceipt {
            updated_range: None,
            updated_rows: 1,
        })
    }

    async fn read_all(&self) -> Result<Option<Vec<SalesRecord>>> {
        let store = Arc::clone(&self.store);
        let records = tokio::task::spawn_blocking(move || store.read_all())
            .await
            .map_err(|e| SalesError::LocalStore(format!("spawn_blocking join error: {}", e)))?;
        Ok(Some(records))
    }
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default number of records the local backup keeps.
pub const DEFAULT_BACKUP_CAPACITY: usize = 100;

/// Default backup file name, relative to the working directory.
pub const DEFAULT_BACKUP_FILE: &str = "sales_data_backup.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backup_file: PathBuf,
    pub backup_capacity: usize,
    /// Surface a failed local write as an error instead of logging and moving on.
    #[serde(default)]
    pub strict_backup: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backup_file: PathBuf::from(DEFAULT_BACKUP_FILE),
            backup_capacity: DEFAULT_BACKUP_CAPACITY,
            strict_backup: false,
        }
    }
}

impl StoreConfig {
    pub fn with_backup_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.backup_file = path.into();
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.backup_capacity = capacity.max(1);
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_backup = strict;
        self
    }
}

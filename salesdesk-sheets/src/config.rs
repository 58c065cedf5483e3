use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Value shipped in sample env files; treated as "not configured".
pub const PLACEHOLDER_SHEET_ID: &str = "your_sheet_id_here";

pub const DEFAULT_RANGE: &str = "Sheet1!A:F";
pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsConfig {
    pub credentials_file: PathBuf,
    pub spreadsheet_id: Option<String>,
    pub range: String,
    pub api_base: String,
    pub request_timeout_secs: u64,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            credentials_file: PathBuf::from("credentials.json"),
            spreadsheet_id: None,
            range: DEFAULT_RANGE.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl SheetsConfig {
    /// The configured spreadsheet id, ignoring blanks and the sample placeholder.
    pub fn spreadsheet_id(&self) -> Option<&str> {
        self.spreadsheet_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty() && *id != PLACEHOLDER_SHEET_ID)
    }

    pub fn credentials_file_exists(&self) -> bool {
        self.credentials_file.is_file()
    }
}

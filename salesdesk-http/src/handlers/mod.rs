use salesdesk::RecordStore;
use salesdesk_sheets::SheetsConfig;
use std::path::PathBuf;
use std::sync::Arc;

pub mod health;
pub mod index;
pub mod sales;

pub struct AppState {
    pub store: Arc<RecordStore>,
    /// Kept for health reporting; the client itself lives inside `store`.
    pub sheets: SheetsConfig,
    pub backup_file: PathBuf,
}

pub use health::health;
pub use index::index;
pub use sales::{list_sales, submit_sale};

use async_trait::async_trait;
use std::sync::Arc;

use super::{AppendReceipt, Backend, Persistence, TabularBackend};
use crate::error::Result;
use crate::types::SalesRecord;

/// Number of columns a stored row must carry to be read back.
pub const RECORD_COLUMNS: usize = 6;

/// Column order: timestamp, employeeName, boxesSold, category, weekDate, remarks.
pub fn record_to_row(record: &SalesRecord) -> Vec<serde_json::Value> {
    vec![
        serde_json::Value::String(record.timestamp.clone()),
        serde_json::Value::String(record.employee_name.clone()),
        serde_json::Value::Number(record.boxes_sold.into()),
        serde_json::Value::String(record.category.clone()),
        serde_json::Value::String(record.week_date.clone()),
        serde_json::Value::String(record.remarks.clone()),
    ]
}

/// Parse one data row. Short rows yield `None`; a non-numeric count becomes 0.
pub fn record_from_row(row: &[String]) -> Option<SalesRecord> {
    if row.len() < RECORD_COLUMNS {
        return None;
    }
    Some(SalesRecord {
        timestamp: row[0].clone(),
        employee_name: row[1].clone(),
        boxes_sold: parse_count_cell(&row[2]),
        category: row[3].clone(),
        week_date: row[4].clone(),
        remarks: row[5].clone(),
    })
}

fn parse_count_cell(cell: &str) -> u64 {
    if !cell.is_empty() && cell.bytes().all(|b| b.is_ascii_digit()) {
        cell.parse().unwrap_or(0)
    } else {
        0
    }
}

/// [`Persistence`] over a spreadsheet-like [`TabularBackend`].
///
/// The first row of the range is always treated as a header.
pub struct RemotePersistence {
    backend: Arc<dyn TabularBackend>,
}

impl RemotePersistence {
    pub fn new(backend: Arc<dyn TabularBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Persistence for RemotePersistence {
    fn backend(&self) -> Backend {
        Backend::Remote
    }

    async fn append(&self, record: &SalesRecord) -> Result<AppendReceipt> {
        let receipt = self.backend.append_row(record_to_row(record)).await?;
        tracing::info!(
            updated_rows = receipt.updated_rows,
            updated_range = receipt.updated_range.as_deref().unwrap_or(""),
            "Row appended to remote sheet"
        );
        Ok(receipt)
    }

    async fn read_all(&self) -> Result<Option<Vec<SalesRecord>>> {
        let rows = self.backend.read_rows().await?;
        tracing::info!("Retrieved {} rows from remote sheet", rows.len());
        if rows.is_empty() {
            return Ok(None);
        }

        let records: Vec<SalesRecord> = rows
            .iter()
            .skip(1)
            .filter_map(|row| record_from_row(row))
            .collect();
        let dropped = rows.len() - 1 - records.len();
        if dropped > 0 {
            tracing::debug!("Skipped {} short rows from remote sheet", dropped);
        }
        Ok(Some(records))
    }
}

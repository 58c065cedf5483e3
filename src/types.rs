use serde::{Deserialize, Serialize};

use crate::error::{Result, SalesError};

/// One stored sales entry.
///
/// Serialized with the camelCase field names the browser front-end uses, which
/// is also the on-disk format of the local backup file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    /// Server-assigned creation instant, ISO-8601.
    pub timestamp: String,
    pub employee_name: String,
    pub boxes_sold: u64,
    pub category: String,
    pub week_date: String,
    #[serde(default)]
    pub remarks: String,
}

/// A validated submit request, not yet timestamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesSubmission {
    pub employee_name: String,
    pub boxes_sold: u64,
    pub category: String,
    pub week_date: String,
    pub remarks: String,
}

impl SalesSubmission {
    /// Fields that must be present on every submit, in the order they are checked.
    pub const REQUIRED_FIELDS: [&'static str; 4] =
        ["employeeName", "boxesSold", "category", "weekDate"];

    /// Validate a raw JSON body from the front-end form.
    ///
    /// Presence of every required field is checked before any value is
    /// coerced, so a body missing `category` reports `category` even when
    /// `boxesSold` is also garbage.
    ///
    /// # Errors
    ///
    /// - [`SalesError::InvalidPayload`] if `raw` is not a JSON object.
    /// - [`SalesError::MissingField`] for the first absent required field.
    /// - [`SalesError::InvalidField`] if `boxesSold` is not a non-negative
    ///   integer, or a text field holds `null`, an array or an object.
    pub fn from_json(raw: &serde_json::Value) -> Result<Self> {
        let obj = raw
            .as_object()
            .ok_or_else(|| SalesError::InvalidPayload("Expected JSON object".to_string()))?;

        if let Some(missing) = Self::REQUIRED_FIELDS
            .iter()
            .find(|field| !obj.contains_key(**field))
        {
            return Err(SalesError::MissingField(missing.to_string()));
        }

        let remarks = match obj.get("remarks") {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(v) => coerce_text("remarks", v)?,
        };

        Ok(SalesSubmission {
            employee_name: coerce_text("employeeName", &obj["employeeName"])?,
            boxes_sold: coerce_count("boxesSold", &obj["boxesSold"])?,
            category: coerce_text("category", &obj["category"])?,
            week_date: coerce_text("weekDate", &obj["weekDate"])?,
            remarks,
        })
    }

    pub fn into_record(self, timestamp: String) -> SalesRecord {
        SalesRecord {
            timestamp,
            employee_name: self.employee_name,
            boxes_sold: self.boxes_sold,
            category: self.category,
            week_date: self.week_date,
            remarks: self.remarks,
        }
    }
}

/// Current local time in the `YYYY-MM-DDTHH:MM:SS.ffffff` form stored in the sheet.
pub fn creation_timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

fn coerce_text(field: &str, value: &serde_json::Value) -> Result<String> {
    match value {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(SalesError::InvalidField {
            field: field.to_string(),
            reason: format!("expected text, got {}", json_kind(other)),
        }),
    }
}

fn coerce_count(field: &str, value: &serde_json::Value) -> Result<u64> {
    let invalid = |reason: String| SalesError::InvalidField {
        field: field.to_string(),
        reason,
    };

    let signed: i128 = match value {
        serde_json::Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u as i128
            } else if let Some(i) = n.as_i64() {
                i as i128
            } else {
                // Fractional counts truncate toward zero, as integer casts do.
                match n.as_f64() {
                    Some(f) if f.is_finite() => f.trunc() as i128,
                    _ => return Err(invalid(format!("{} is not an integer", n))),
                }
            }
        }
        serde_json::Value::String(s) => s
            .trim()
            .parse::<i128>()
            .map_err(|_| invalid(format!("'{}' is not an integer", s)))?,
        other => {
            return Err(invalid(format!(
                "expected an integer, got {}",
                json_kind(other)
            )))
        }
    };

    if signed < 0 {
        return Err(invalid(format!("{} is negative", signed)));
    }
    u64::try_from(signed).map_err(|_| invalid(format!("{} is out of range", signed)))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

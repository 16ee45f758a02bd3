//! Data entry records as returned by the hosted backend

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A creation timestamp in whichever encoding the backend produced.
///
/// Strings always land in `Text`; `Instant` is only built in-process
/// (e.g. from an SDK date object) and never comes out of JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    /// Millisecond epoch instant
    Millis(f64),
    /// Any string encoding
    Text(String),
    /// Already-structured date value
    Instant(DateTime<FixedOffset>),
    /// Booleans, objects, arrays: never a date
    Other(serde_json::Value),
}

impl RawTimestamp {
    /// Runtime type name used in parse diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Millis(_) => "number",
            Self::Text(_) => "string",
            Self::Instant(_) => "date",
            Self::Other(value) => match value {
                serde_json::Value::Null => "null",
                serde_json::Value::Bool(_) => "boolean",
                serde_json::Value::Number(_) => "number",
                serde_json::Value::String(_) => "string",
                serde_json::Value::Array(_) => "array",
                serde_json::Value::Object(_) => "object",
            },
        }
    }

    /// Raw value as it would appear in a log line
    pub fn display_value(&self) -> String {
        match self {
            Self::Millis(ms) => ms.to_string(),
            Self::Text(s) => s.clone(),
            Self::Instant(dt) => dt.to_rfc3339(),
            Self::Other(value) => value.to_string(),
        }
    }
}

impl From<&str> for RawTimestamp {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RawTimestamp {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for RawTimestamp {
    fn from(ms: i64) -> Self {
        Self::Millis(ms as f64)
    }
}

impl<Tz: chrono::TimeZone> From<DateTime<Tz>> for RawTimestamp {
    fn from(dt: DateTime<Tz>) -> Self {
        Self::Instant(dt.fixed_offset())
    }
}

/// A single user-created data entry.
///
/// Field names follow the backend's `data_entries` columns; the camelCase
/// aliases cover payloads produced by the app's own serializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default, alias = "numericId")]
    pub numeric_id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<RawTimestamp>,
    #[serde(default, alias = "updatedAt")]
    pub updated_at: Option<RawTimestamp>,
    /// Monetary amount; absent counts as zero in totals
    #[serde(
        default,
        rename = "total_amount",
        alias = "amount",
        alias = "totalAmount"
    )]
    pub amount: Option<f64>,
    #[serde(default, alias = "ownerId")]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub deleted: Option<bool>,
}

impl Record {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            numeric_id: None,
            name: String::new(),
            description: None,
            created_at: None,
            updated_at: None,
            amount: None,
            owner_id: None,
            deleted: None,
        }
    }

    pub fn with_created_at(mut self, created_at: impl Into<RawTimestamp>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn amount_or_zero(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted.unwrap_or(false)
    }
}

//! Record sources: where fetched entry payloads come from

mod inline;
mod json_file;

pub use inline::InlineSource;
pub use json_file::{read_table, JsonFileSource};

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, warn};

use crate::services::normalizer::normalize_in;
use crate::types::{EntryTallyError, Record, Result};

/// Trait for anything that can hand over the backend's `data_entries` payload
pub trait RecordSource: Send + Sync {
    /// Source name (e.g., "json-file")
    fn name(&self) -> &str;

    /// Raw payload, exactly as the backend returned it
    fn fetch(&self) -> Result<Value>;

    /// Fetch, decode and filter down to the entries a view should show
    fn load(&self, query: &EntryQuery) -> Result<Vec<Record>> {
        let records = decode_records(self.fetch()?)?;
        let records = query.apply(records);
        debug!(source = self.name(), count = records.len(), "entries loaded");
        Ok(records)
    }
}

/// The owner/deleted filter the backend query applies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryQuery {
    pub owner_id: Option<String>,
    pub include_deleted: bool,
}

impl EntryQuery {
    /// Keep matching entries, newest creation time first.
    ///
    /// Times are compared on the UTC calendar so the order does not depend on
    /// the zone a view is drawn in. The sort is stable; entries whose date
    /// cannot be read keep their relative order at the end.
    pub fn apply(&self, records: Vec<Record>) -> Vec<Record> {
        let mut records: Vec<Record> = records
            .into_iter()
            .filter(|r| self.include_deleted || !r.is_deleted())
            .filter(|r| match &self.owner_id {
                Some(owner) => r.owner_id.as_deref() == Some(owner.as_str()),
                None => true,
            })
            .collect();

        records.sort_by_cached_key(|r| {
            std::cmp::Reverse(
                r.created_at
                    .as_ref()
                    .and_then(|raw| normalize_in(raw, &Utc).ok())
                    .map(|resolved| resolved.datetime),
            )
        });
        records
    }
}

/// Decode a `data_entries` payload into records.
///
/// Accepts a bare array, `null` (no rows), or a `{ "data": ..., "error": ... }`
/// response envelope. `null` array elements are skipped with a warning; any
/// other element that is not a record is a structural error.
pub fn decode_records(payload: Value) -> Result<Vec<Record>> {
    match payload {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| {
                if item.is_null() {
                    warn!(index, "entry at index is null");
                    return None;
                }
                Some(serde_json::from_value::<Record>(item).map_err(|e| {
                    EntryTallyError::Structure(format!("entry at index {}: {}", index, e))
                }))
            })
            .collect(),
        Value::Object(mut envelope) if envelope.contains_key("data") => {
            match envelope.remove("error") {
                None | Some(Value::Null) => {}
                Some(err) => {
                    return Err(EntryTallyError::Parse(format!(
                        "backend returned an error: {}",
                        err
                    )))
                }
            }
            decode_records(envelope.remove("data").unwrap_or(Value::Null))
        }
        other => Err(EntryTallyError::Structure(format!(
            "expected an array of entries, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//! Source over a payload that has already been fetched

use serde_json::Value;

use super::RecordSource;
use crate::types::Result;

/// Payload held in memory, e.g. handed over by a realtime subscription
pub struct InlineSource {
    payload: Value,
}

impl InlineSource {
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }
}

impl RecordSource for InlineSource {
    fn name(&self) -> &str {
        "inline"
    }

    fn fetch(&self) -> Result<Value> {
        Ok(self.payload.clone())
    }
}

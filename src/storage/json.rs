//! JSON array-of-objects format.

use crate::error::Result;
use crate::models::{Record, StorageFormat};
use crate::storage::RecordFormat;

/// Pretty-printed JSON array, one object per record.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl RecordFormat for JsonFormat {
    fn extension(&self) -> &'static str {
        StorageFormat::Json.extension()
    }

    fn encode(&self, records: &[Record]) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(records)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(bytes)?)
    }
}

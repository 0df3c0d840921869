//! CSV table format with fixed columns.

use serde_json::{Number, Value};

use crate::error::{AppError, Result};
use crate::models::{FIELDS, Record, StorageFormat};
use crate::storage::RecordFormat;

/// Columns holding numbers; everything else is text.
const NUMERIC_COLUMNS: [&str; 1] = ["salary"];

/// Header row plus one row per record, columns as in [`FIELDS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvFormat;

impl RecordFormat for CsvFormat {
    fn extension(&self) -> &'static str {
        StorageFormat::Csv.extension()
    }

    fn encode(&self, records: &[Record]) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(FIELDS)?;
        for record in records {
            writer.write_record(FIELDS.iter().map(|field| record.text(field)))?;
        }
        writer
            .into_inner()
            .map_err(|e| AppError::Io(e.into_error()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(bytes);
        let headers = reader.headers()?.clone();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let mut record = Record::new();
            for (column, cell) in headers.iter().zip(row.iter()) {
                record.insert(column, parse_cell(column, cell));
            }
            records.push(record);
        }
        Ok(records)
    }
}

/// Convert one table cell to a field value.
///
/// Numeric columns become numbers, or null when blank. Text that does not
/// parse as a number is kept as a string.
pub(crate) fn parse_cell(column: &str, cell: &str) -> Value {
    if !is_numeric_column(column) {
        return Value::String(cell.to_string());
    }
    let cell = cell.trim();
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(int) = cell.parse::<i64>() {
        return Value::from(int);
    }
    cell.parse::<f64>()
        .ok()
        .and_then(number_from_f64)
        .unwrap_or_else(|| Value::String(cell.to_string()))
}

pub(crate) fn is_numeric_column(column: &str) -> bool {
    NUMERIC_COLUMNS.contains(&column)
}

/// Whole floats become integers so `80000.0` equals `80000`.
pub(crate) fn number_from_f64(value: f64) -> Option<Value> {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        return Some(Value::from(value as i64));
    }
    Number::from_f64(value).map(Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Vacancy;
    use serde_json::json;

    #[test]
    fn test_encode_header_and_quoting() {
        let record = Record::from(&Vacancy::new(
            "Dev, Senior",
            "Москва",
            "https://example.com/dev",
            Some(80000),
            "Line \"quoted\"",
        ));
        let text = String::from_utf8(CsvFormat.encode(&[record]).unwrap()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("title,city,link,salary,description"));
        assert_eq!(
            lines.next(),
            Some("\"Dev, Senior\",Москва,https://example.com/dev,80000,\"Line \"\"quoted\"\"\"")
        );
    }

    #[test]
    fn test_decode_types() {
        let bytes = b"title,city,link,salary,description\nDev,,l,80000,\nQA,Kazan,q,,text\n";
        let records = CsvFormat.decode(bytes).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("salary"), Some(&json!(80000)));
        assert_eq!(records[0].get("city"), Some(&json!("")));
        assert_eq!(records[1].get("salary"), Some(&Value::Null));
        assert_eq!(records[1].get("description"), Some(&json!("text")));
    }

    #[test]
    fn test_decode_header_only_and_empty() {
        assert!(CsvFormat.decode(b"title,city,link,salary,description\n").unwrap().is_empty());
        assert!(CsvFormat.decode(b"").unwrap().is_empty());
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("salary", "80000.0"), json!(80000));
        assert_eq!(parse_cell("salary", "1.5"), json!(1.5));
        assert_eq!(parse_cell("salary", "n/a"), json!("n/a"));
        assert_eq!(parse_cell("city", "123"), json!("123"));
    }
}

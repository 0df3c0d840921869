//! XLSX workbook format with fixed columns.
//!
//! Written with `rust_xlsxwriter`, read back with `calamine`. The first
//! worksheet holds the data: row 0 is the header, each following row is a
//! record. A hidden `meta` sheet stores the record count, so records whose
//! cells are all blank survive a round trip.

use std::io::{Cursor, Read, Seek};

use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;
use serde_json::{Number, Value};

use crate::error::Result;
use crate::models::{FIELDS, Record, StorageFormat};
use crate::storage::RecordFormat;
use crate::storage::delimited::{is_numeric_column, number_from_f64, parse_cell};

const SHEET_NAME: &str = "vacancies";
const META_SHEET: &str = "meta";

/// Largest integer an f64 cell holds exactly (2^53).
const MAX_EXACT_INT: u64 = 1 << 53;

#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxFormat;

impl RecordFormat for XlsxFormat {
    fn extension(&self) -> &'static str {
        StorageFormat::Xlsx.extension()
    }

    fn encode(&self, records: &[Record]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        for (col, field) in FIELDS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *field)?;
        }

        for (idx, record) in records.iter().enumerate() {
            let row = (idx + 1) as u32;
            for (col, field) in FIELDS.iter().enumerate() {
                let col = col as u16;
                match record.get(field) {
                    // Blank cell
                    None | Some(Value::Null) => {}
                    Some(Value::Number(n)) => match exact_f64(n) {
                        Some(number) => {
                            worksheet.write_number(row, col, number)?;
                        }
                        None => {
                            worksheet.write_string(row, col, n.to_string())?;
                        }
                    },
                    Some(_) => {
                        worksheet.write_string(row, col, record.text(field))?;
                    }
                }
            }
        }

        let meta = workbook.add_worksheet();
        meta.set_name(META_SHEET)?;
        meta.write_string(0, 0, "records")?;
        meta.write_number(0, 1, records.len() as f64)?;
        meta.set_hidden(true);

        Ok(workbook.save_to_buffer()?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>> {
        if bytes.is_empty() {
            return Ok(Vec::new());
        }
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec()))?;
        let range = match workbook.worksheet_range_at(0) {
            Some(range) => range?,
            None => return Ok(Vec::new()),
        };

        let mut rows = range.rows();
        let headers: Vec<String> = match rows.next() {
            Some(row) => row.iter().map(|cell| cell.to_string()).collect(),
            None => return Ok(Vec::new()),
        };
        let body: Vec<&[Data]> = rows.collect();
        let blank = vec![Data::Empty; headers.len()];

        let rows: Vec<&[Data]> = match stored_count(&mut workbook)? {
            // Trailing blank rows fall outside the used range.
            Some(count) => (0..count)
                .map(|idx| body.get(idx).copied().unwrap_or(blank.as_slice()))
                .collect(),
            // Written elsewhere: blank rows cannot be told apart from padding.
            None => body
                .into_iter()
                .filter(|row| !row.iter().all(|cell| matches!(cell, Data::Empty)))
                .collect(),
        };

        Ok(rows
            .into_iter()
            .map(|row| {
                let mut record = Record::new();
                for (column, cell) in headers.iter().zip(row.iter()) {
                    record.insert(column.as_str(), cell_value(column, cell));
                }
                record
            })
            .collect())
    }
}

/// Record count from the `meta` sheet, if the workbook has one.
fn stored_count<RS: Read + Seek>(workbook: &mut Xlsx<RS>) -> Result<Option<usize>> {
    if !workbook.sheet_names().iter().any(|name| name == META_SHEET) {
        return Ok(None);
    }
    let meta = workbook.worksheet_range(META_SHEET)?;
    Ok(match meta.get_value((0, 1)) {
        Some(Data::Int(count)) => usize::try_from(*count).ok(),
        Some(Data::Float(count)) if *count >= 0.0 => Some(*count as usize),
        _ => None,
    })
}

/// The number as an f64, when the conversion is lossless.
fn exact_f64(number: &Number) -> Option<f64> {
    if let Some(int) = number.as_i64() {
        return (int.unsigned_abs() <= MAX_EXACT_INT).then_some(int as f64);
    }
    if let Some(int) = number.as_u64() {
        return (int <= MAX_EXACT_INT).then_some(int as f64);
    }
    number.as_f64()
}

/// Convert one worksheet cell to a field value.
fn cell_value(column: &str, cell: &Data) -> Value {
    if !is_numeric_column(column) {
        return match cell {
            Data::Empty => Value::String(String::new()),
            other => Value::String(other.to_string()),
        };
    }
    match cell {
        Data::Empty => Value::Null,
        Data::Int(int) => Value::from(*int),
        Data::Float(float) => number_from_f64(*float).unwrap_or(Value::Null),
        other => parse_cell(column, &other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::Vacancy;
    use serde_json::json;

    #[test]
    fn test_workbook_keeps_types() {
        let records = vec![
            Record::from(&Vacancy::new(
                "Менеджер",
                "Екатеринбург",
                "https://example.com/manager",
                Some(90000),
                "Project Manager",
            )),
            Record::from(&Vacancy::new("QA", "Казань", "https://example.com/qa", None, "Tests")),
        ];

        let bytes = XlsxFormat.encode(&records).unwrap();
        let decoded = XlsxFormat.decode(&bytes).unwrap();

        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].get("title"), Some(&json!("Менеджер")));
        assert_eq!(decoded[0].get("salary"), Some(&json!(90000)));
        assert_eq!(decoded[1].get("salary"), Some(&Value::Null));
        assert_eq!(decoded[1].get("description"), Some(&json!("Tests")));
    }

    #[test]
    fn test_header_only_workbook_is_empty() {
        let bytes = XlsxFormat.encode(&[]).unwrap();
        assert!(XlsxFormat.decode(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_cell_value() {
        assert_eq!(cell_value("salary", &Data::Float(120000.0)), json!(120000));
        assert_eq!(cell_value("salary", &Data::Empty), Value::Null);
        assert_eq!(cell_value("salary", &Data::String("5".into())), json!(5));
        assert_eq!(cell_value("city", &Data::Empty), json!(""));
        assert_eq!(cell_value("city", &Data::String("Москва".into())), json!("Москва"));
    }

    #[test]
    fn test_blank_records_survive() {
        let blank = Record::from(&Vacancy::new("", "", "", None, ""));
        let records = vec![
            Record::from(&Vacancy::new("A", "", "a", Some(1), "")),
            blank.clone(),
            Record::from(&Vacancy::new("B", "", "b", None, "")),
            blank.clone(),
        ];

        let decoded = XlsxFormat.decode(&XlsxFormat.encode(&records).unwrap()).unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn test_only_blank_record() {
        let records = vec![Record::from(&Vacancy::new("", "", "", None, ""))];
        let decoded = XlsxFormat.decode(&XlsxFormat.encode(&records).unwrap()).unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn test_large_salary_keeps_precision() {
        let huge = 9_007_199_254_740_993;
        let records = vec![Record::from(&Vacancy::new("Big", "", "b", Some(huge), ""))];
        let decoded = XlsxFormat.decode(&XlsxFormat.encode(&records).unwrap()).unwrap();
        assert_eq!(decoded[0].get("salary"), Some(&json!(huge)));
    }

    #[test]
    fn test_exact_f64() {
        assert_eq!(exact_f64(&Number::from(80000)), Some(80000.0));
        assert_eq!(exact_f64(&Number::from(1_i64 << 53)), Some(9_007_199_254_740_992.0));
        assert_eq!(exact_f64(&Number::from((1_i64 << 53) + 1)), None);
        assert_eq!(exact_f64(&Number::from(-(1_i64 << 53) - 1)), None);
    }

    #[test]
    fn test_corrupt_workbook_is_error() {
        let err = XlsxFormat.decode(b"definitely not a zip archive").unwrap_err();
        assert!(matches!(err, AppError::SpreadsheetRead(_)));
    }
}

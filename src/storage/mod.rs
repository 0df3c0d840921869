//! Storage abstractions for vacancy persistence.
//!
//! One file per format under the configured data directory:
//!
//! ```text
//! data/
//! ├── vacancies.json        # pretty-printed array of objects
//! ├── vacancies.csv         # header + rows
//! └── vacancies.xlsx        # first worksheet, header + rows
//! ```
//!
//! Every operation loads the whole file, changes it in memory and rewrites
//! it atomically. A missing file is an empty collection. Access is assumed
//! to be single-writer and synchronous.

pub mod delimited;
pub mod file;
pub mod json;
pub mod spreadsheet;

use crate::error::Result;
use crate::models::{Record, StorageConfig, StorageFormat, Vacancy};
use crate::query::Criteria;

// Re-export for convenience
pub use delimited::CsvFormat;
pub use file::FileStorage;
pub use json::JsonFormat;
pub use spreadsheet::XlsxFormat;

pub type JsonStorage = FileStorage<JsonFormat>;
pub type CsvStorage = FileStorage<CsvFormat>;
pub type XlsxStorage = FileStorage<XlsxFormat>;

/// Trait for vacancy storage backends.
pub trait VacancyStorage {
    /// Append one vacancy. Duplicates are allowed.
    fn add(&self, vacancy: &Vacancy) -> Result<()>;

    /// Append several vacancies in order.
    fn add_all(&self, vacancies: &[Vacancy]) -> Result<()> {
        for vacancy in vacancies {
            self.add(vacancy)?;
        }
        Ok(())
    }

    /// Remove every record with the same `(title, link)` as `vacancy`.
    ///
    /// Returns the number of removed records; zero is not an error.
    fn delete(&self, vacancy: &Vacancy) -> Result<usize>;

    /// Records matching all `criteria`, in persisted order. `None` returns all.
    fn query(&self, criteria: Option<&Criteria>) -> Result<Vec<Record>>;

    /// Remove every record.
    fn clear(&self) -> Result<()>;
}

/// Serialization of a whole collection to and from file bytes.
pub trait RecordFormat {
    /// File extension, without the dot.
    fn extension(&self) -> &'static str;

    fn encode(&self, records: &[Record]) -> Result<Vec<u8>>;

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>>;
}

/// Open the backend selected by `config`.
pub fn open_storage(config: &StorageConfig) -> Box<dyn VacancyStorage> {
    let path = config.path();
    log::debug!("Opening {} storage at {}", config.format, path.display());
    match config.format {
        StorageFormat::Json => Box::new(JsonStorage::new(path, JsonFormat)),
        StorageFormat::Csv => Box::new(CsvStorage::new(path, CsvFormat)),
        StorageFormat::Xlsx => Box::new(XlsxStorage::new(path, XlsxFormat)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_storage_uses_configured_path() {
        let tmp = TempDir::new().unwrap();
        for format in [StorageFormat::Json, StorageFormat::Csv, StorageFormat::Xlsx] {
            let config = StorageConfig::new(tmp.path(), format);
            let storage = open_storage(&config);
            storage
                .add(&Vacancy::new("Dev", "", "https://example.com/dev", None, ""))
                .unwrap();
            assert!(config.path().exists(), "{format} file not created");
            assert_eq!(storage.query(None).unwrap().len(), 1);
        }
    }

    #[test]
    fn test_format_extensions_match_config_paths() {
        let tmp = TempDir::new().unwrap();
        let formats: [(&dyn RecordFormat, StorageFormat); 3] = [
            (&JsonFormat, StorageFormat::Json),
            (&CsvFormat, StorageFormat::Csv),
            (&XlsxFormat, StorageFormat::Xlsx),
        ];
        for (codec, format) in formats {
            let path = StorageConfig::new(tmp.path(), format).path();
            assert_eq!(path.extension().and_then(|e| e.to_str()), Some(codec.extension()));
        }
    }
}

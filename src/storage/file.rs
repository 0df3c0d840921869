//! File-backed storage shared by all formats.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{Record, Vacancy};
use crate::query::{self, Criteria};
use crate::storage::{RecordFormat, VacancyStorage};
use crate::utils::fs;

/// A single storage file in one serialization format.
#[derive(Debug, Clone)]
pub struct FileStorage<F> {
    path: PathBuf,
    format: F,
}

impl<F: RecordFormat> FileStorage<F> {
    pub fn new(path: impl Into<PathBuf>, format: F) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the whole collection. A missing file is empty.
    pub fn load(&self) -> Result<Vec<Record>> {
        match fs::read_optional(&self.path)? {
            Some(bytes) => self.format.decode(&bytes),
            None => {
                log::debug!("No storage file at {}", self.path.display());
                Ok(Vec::new())
            }
        }
    }

    /// Rewrite the whole collection.
    fn save(&self, records: &[Record]) -> Result<()> {
        let bytes = self.format.encode(records)?;
        fs::write_atomic(&self.path, &bytes)?;
        log::debug!(
            "Saved {} records to {} ({})",
            records.len(),
            self.path.display(),
            self.format.extension()
        );
        Ok(())
    }
}

impl<F: RecordFormat> VacancyStorage for FileStorage<F> {
    fn add(&self, vacancy: &Vacancy) -> Result<()> {
        self.add_all(std::slice::from_ref(vacancy))
    }

    fn add_all(&self, vacancies: &[Vacancy]) -> Result<()> {
        if vacancies.is_empty() {
            return Ok(());
        }
        let mut records = self.load()?;
        records.extend(vacancies.iter().map(Record::from));
        self.save(&records)?;
        log::info!(
            "Added {} vacancies to {}",
            vacancies.len(),
            self.path.display()
        );
        Ok(())
    }

    fn delete(&self, vacancy: &Vacancy) -> Result<usize> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|record| !record.has_identity_of(vacancy));
        let removed = before - records.len();

        if removed > 0 {
            self.save(&records)?;
            log::info!("Deleted {} record(s) for '{}'", removed, vacancy.title);
        } else {
            log::info!("No record matched '{}' ({})", vacancy.title, vacancy.link);
        }
        Ok(removed)
    }

    fn query(&self, criteria: Option<&Criteria>) -> Result<Vec<Record>> {
        let records = self.load()?;
        Ok(query::apply(records, criteria))
    }

    fn clear(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.save(&[])?;
        log::info!("Cleared {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonFormat;
    use tempfile::TempDir;

    fn storage(tmp: &TempDir) -> FileStorage<JsonFormat> {
        FileStorage::new(tmp.path().join("data/vacancies.json"), JsonFormat)
    }

    #[test]
    fn test_query_does_not_create_file() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        assert!(storage.query(None).unwrap().is_empty());
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_clear_missing_file_is_noop() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        storage.clear().unwrap();
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_delete_without_match_leaves_file_untouched() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        assert_eq!(storage.delete(&Vacancy::identity("x", "y")).unwrap(), 0);
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_add_all_single_rewrite_keeps_order() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        let batch = vec![
            Vacancy::new("A", "", "a", Some(1), ""),
            Vacancy::new("B", "", "b", None, ""),
        ];
        storage.add_all(&batch).unwrap();
        storage.add_all(&[]).unwrap();

        let titles: Vec<_> = storage
            .load()
            .unwrap()
            .iter()
            .map(|r| r.text("title"))
            .collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn test_delete_removes_all_duplicates() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);
        let dup = Vacancy::new("Dev", "Москва", "https://example.com/dev", Some(10), "");

        storage.add(&dup).unwrap();
        storage.add(&dup).unwrap();
        storage
            .add(&Vacancy::new("Dev", "", "https://example.com/other", None, ""))
            .unwrap();

        let removed = storage
            .delete(&Vacancy::identity("Dev", "https://example.com/dev"))
            .unwrap();
        assert_eq!(removed, 2);

        let left = storage.query(None).unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].text("link"), "https://example.com/other");
    }
}

//! Vacancy data structure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::RawVacancy;

/// Persisted field names, in column order.
pub const FIELDS: [&str; 5] = ["title", "city", "link", "salary", "description"];

/// A normalized job vacancy.
///
/// Identity is the `(title, link)` pair; there is no generated id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vacancy {
    /// Vacancy title
    pub title: String,

    /// City name (empty string if the source had no area)
    pub city: String,

    /// Link to the vacancy
    pub link: String,

    /// Upper salary bound, if published
    pub salary: Option<i64>,

    /// Short requirements snippet
    pub description: String,
}

impl Vacancy {
    pub fn new(
        title: impl Into<String>,
        city: impl Into<String>,
        link: impl Into<String>,
        salary: Option<i64>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            city: city.into(),
            link: link.into(),
            salary,
            description: description.into(),
        }
    }

    /// A vacancy carrying only the identity pair, as used for deletion.
    pub fn identity(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self::new(title, "", link, None, "")
    }

    /// Check field values. A present salary must be strictly positive.
    pub fn validate(&self) -> Result<()> {
        match self.salary {
            Some(salary) if salary <= 0 => Err(AppError::validation(format!(
                "invalid salary {salary} for '{}'",
                self.title
            ))),
            _ => Ok(()),
        }
    }

    /// Build an unvalidated vacancy from one raw API item.
    pub fn from_raw(item: &Value) -> Result<Self> {
        let raw: RawVacancy = serde_json::from_value(item.clone()).map_err(AppError::malformed)?;
        raw.into_vacancy()
    }

    /// Construct and validate every item, keeping one result per item.
    pub fn cast_each(items: &[Value]) -> Vec<Result<Self>> {
        items
            .iter()
            .map(|item| {
                let vacancy = Self::from_raw(item)?;
                vacancy.validate()?;
                Ok(vacancy)
            })
            .collect()
    }

    /// Construct and validate every item, dropping the ones that fail.
    ///
    /// Failures are reported through the log and never abort the batch.
    pub fn cast_to_vacancies(items: &[Value]) -> Vec<Self> {
        let mut vacancies = Vec::with_capacity(items.len());
        for (idx, result) in Self::cast_each(items).into_iter().enumerate() {
            match result {
                Ok(vacancy) => vacancies.push(vacancy),
                Err(e) => log::warn!("Skipped vacancy #{}: {}", idx + 1, e),
            }
        }
        log::debug!("Cast {} of {} raw vacancies", vacancies.len(), items.len());
        vacancies
    }
}

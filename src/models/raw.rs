//! Raw vacancy shapes as returned by the HeadHunter search API.
//!
//! Every field is optional here so that a single odd item never fails
//! deserialization of the whole response. Presence checks happen in
//! [`RawVacancy::into_vacancy`].

use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::Vacancy;

/// One item from the `items` array of `GET /vacancies`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVacancy {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub salary: Option<RawSalary>,

    #[serde(default)]
    pub area: Option<RawArea>,

    #[serde(default)]
    pub snippet: Option<RawSnippet>,
}

/// Salary range; only the upper bound is kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSalary {
    #[serde(default)]
    pub from: Option<i64>,

    #[serde(default)]
    pub to: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArea {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSnippet {
    #[serde(default)]
    pub requirement: Option<String>,
}

impl RawVacancy {
    /// Convert into a [`Vacancy`] without validating it.
    ///
    /// Fails with [`AppError::MalformedRecord`] when `name`, `url` or
    /// `snippet` is absent.
    pub fn into_vacancy(self) -> Result<Vacancy> {
        let title = self.name.ok_or_else(|| AppError::malformed("missing `name`"))?;
        let link = self.url.ok_or_else(|| AppError::malformed("missing `url`"))?;
        let snippet = self
            .snippet
            .ok_or_else(|| AppError::malformed("missing `snippet`"))?;

        Ok(Vacancy {
            title,
            city: self.area.and_then(|a| a.name).unwrap_or_default(),
            link,
            salary: self.salary.and_then(|s| s.to),
            description: snippet.requirement.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> RawVacancy {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_full_item() {
        let raw = parse(json!({
            "name": "Python Developer",
            "url": "https://example.com/pd",
            "salary": {"from": 50000, "to": 80000, "currency": "RUR"},
            "area": {"id": "1", "name": "Москва"},
            "snippet": {"requirement": "Опыт от 3 лет", "responsibility": null}
        }));

        let vacancy = raw.into_vacancy().unwrap();
        assert_eq!(vacancy.title, "Python Developer");
        assert_eq!(vacancy.city, "Москва");
        assert_eq!(vacancy.link, "https://example.com/pd");
        assert_eq!(vacancy.salary, Some(80000));
        assert_eq!(vacancy.description, "Опыт от 3 лет");
    }

    #[test]
    fn test_optional_parts_default() {
        let raw = parse(json!({
            "name": "Tester",
            "url": "https://example.com/t",
            "salary": null,
            "snippet": {"requirement": null}
        }));

        let vacancy = raw.into_vacancy().unwrap();
        assert_eq!(vacancy.city, "");
        assert_eq!(vacancy.salary, None);
        assert_eq!(vacancy.description, "");
    }

    #[test]
    fn test_salary_without_upper_bound() {
        let raw = parse(json!({
            "name": "Tester",
            "url": "https://example.com/t",
            "salary": {"from": 70000, "to": null},
            "snippet": {}
        }));

        assert_eq!(raw.into_vacancy().unwrap().salary, None);
    }

    #[test]
    fn test_missing_snippet_is_malformed() {
        let raw = parse(json!({"name": "Incomplete", "url": "https://example.com/i"}));
        let err = raw.into_vacancy().unwrap_err();
        assert!(matches!(err, AppError::MalformedRecord(_)));
    }

    #[test]
    fn test_missing_name_is_malformed() {
        let raw = parse(json!({"url": "https://example.com/i", "snippet": {}}));
        assert!(raw.into_vacancy().is_err());
    }
}

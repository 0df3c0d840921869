//! Plain field map returned by storage queries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::Vacancy;

/// A persisted vacancy as plain data.
///
/// Records are whatever the storage file holds; they are not validated and
/// may miss fields or carry extra ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    /// Field value as display text. Missing and null render as empty.
    pub fn text(&self, field: &str) -> String {
        match self.0.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn salary(&self) -> Option<f64> {
        self.0.get("salary").and_then(Value::as_f64)
    }

    /// Whether this record has the `(title, link)` identity of `vacancy`.
    pub fn has_identity_of(&self, vacancy: &Vacancy) -> bool {
        self.get("title").and_then(Value::as_str) == Some(vacancy.title.as_str())
            && self.get("link").and_then(Value::as_str) == Some(vacancy.link.as_str())
    }
}

impl From<&Vacancy> for Record {
    fn from(vacancy: &Vacancy) -> Self {
        let mut record = Record::new();
        record.insert("title", Value::from(vacancy.title.as_str()));
        record.insert("city", Value::from(vacancy.city.as_str()));
        record.insert("link", Value::from(vacancy.link.as_str()));
        record.insert("salary", vacancy.salary.map_or(Value::Null, Value::from));
        record.insert("description", Value::from(vacancy.description.as_str()));
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_vacancy() {
        let vacancy = Vacancy::new("Dev", "Москва", "https://example.com/dev", None, "Rust");
        let record = Record::from(&vacancy);

        assert_eq!(record.get("title"), Some(&json!("Dev")));
        assert_eq!(record.get("salary"), Some(&Value::Null));
        assert_eq!(record.salary(), None);
        assert!(record.has_identity_of(&Vacancy::identity("Dev", "https://example.com/dev")));
        assert!(!record.has_identity_of(&Vacancy::identity("Dev", "https://example.com/other")));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let vacancy = Vacancy::new("Dev", "", "l", Some(100), "");
        let value = serde_json::to_value(Record::from(&vacancy)).unwrap();
        assert_eq!(
            value,
            json!({"title": "Dev", "city": "", "link": "l", "salary": 100, "description": ""})
        );
    }

    #[test]
    fn test_text_rendering() {
        let record: Record = serde_json::from_value(json!({"salary": 5, "city": null})).unwrap();
        assert_eq!(record.text("salary"), "5");
        assert_eq!(record.text("city"), "");
        assert_eq!(record.text("title"), "");
    }
}

// src/query/criteria.rs

use serde_json::Value;

use crate::models::Record;

/// Test applied to a single record field.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Field equals the value exactly, including its JSON type
    Equals(Value),

    /// Numeric field within `[low, high]`
    Between { low: f64, high: f64 },
}

impl Predicate {
    /// Evaluate against a field value; `None` means the field is absent.
    ///
    /// An absent field never matches. A range never matches null or
    /// non-numeric values.
    pub fn matches(&self, value: Option<&Value>) -> bool {
        match (self, value) {
            (_, None) => false,
            (Predicate::Equals(expected), Some(actual)) => actual == expected,
            (Predicate::Between { low, high }, Some(actual)) => actual
                .as_f64()
                .is_some_and(|v| *low <= v && v <= *high),
        }
    }
}

/// Field predicates ANDed together.
///
/// Keeps insertion order; setting a field again replaces its predicate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    predicates: Vec<(String, Predicate)>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the predicate for `field`.
    pub fn with(mut self, field: impl Into<String>, predicate: Predicate) -> Self {
        let field = field.into();
        match self.predicates.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = predicate,
            None => self.predicates.push((field, predicate)),
        }
        self
    }

    pub fn equals(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(field, Predicate::Equals(value.into()))
    }

    pub fn between(self, field: impl Into<String>, low: f64, high: f64) -> Self {
        self.with(field, Predicate::Between { low, high })
    }

    /// Inclusive salary range. Records without a salary are excluded.
    pub fn salary(self, low: f64, high: f64) -> Self {
        self.between("salary", low, high)
    }

    pub fn city(self, city: impl Into<String>) -> Self {
        self.equals("city", city.into())
    }

    pub fn region(self, region: impl Into<String>) -> Self {
        self.equals("region", region.into())
    }

    pub fn experience(self, level: impl Into<String>) -> Self {
        self.equals("experience", level.into())
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Whether `record` satisfies every predicate. Stops at the first failure.
    pub fn matches(&self, record: &Record) -> bool {
        self.predicates
            .iter()
            .all(|(field, predicate)| predicate.matches(record.get(field)))
    }
}

// src/services/mod.rs

//! External services used by the application.

pub mod headhunter;

use serde_json::Value;

use crate::error::Result;

pub use headhunter::HeadHunterApi;

/// A job board that can be searched for vacancies.
pub trait JobPlatformApi {
    /// Raw vacancy items for a free-text query, in API order.
    fn get_vacancies(&self, query: &str) -> Result<Vec<Value>>;
}

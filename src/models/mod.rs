// src/models/mod.rs

//! Domain models for the vacancies application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod raw;
mod record;
mod vacancy;

// Re-export all public types
pub use config::{ApiConfig, Config, StorageConfig, StorageFormat};
pub use raw::{RawArea, RawSalary, RawSnippet, RawVacancy};
pub use record::Record;
pub use vacancy::{FIELDS, Vacancy};

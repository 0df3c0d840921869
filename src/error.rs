// src/error.rs

//! Unified error handling for the vacancies application.

use std::fmt;

use thiserror::Error;

/// Result type alias for vacancy operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream API answered with a non-success status
    #[error("Remote request to {url} failed with status {status}")]
    RemoteRequest { status: u16, url: String },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSV reading/writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// XLSX workbook could not be read
    #[error("Spreadsheet read error: {0}")]
    SpreadsheetRead(#[from] calamine::XlsxError),

    /// XLSX workbook could not be written
    #[error("Spreadsheet write error: {0}")]
    SpreadsheetWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Raw vacancy from the API is missing required fields
    #[error("Malformed source record: {0}")]
    MalformedRecord(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a malformed source record error.
    pub fn malformed(message: impl fmt::Display) -> Self {
        Self::MalformedRecord(message.to_string())
    }

    /// Create a remote request error from a response status.
    pub fn remote(status: reqwest::StatusCode, url: impl Into<String>) -> Self {
        Self::RemoteRequest {
            status: status.as_u16(),
            url: url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_message() {
        let err = AppError::remote(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            "https://api.hh.ru/vacancies",
        );
        assert_eq!(
            err.to_string(),
            "Remote request to https://api.hh.ru/vacancies failed with status 500"
        );
    }
}

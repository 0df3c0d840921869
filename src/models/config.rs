//! Application configuration structures.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Job search API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Where and how vacancies are persisted
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::validation("api.base_url is empty"));
        }
        url::Url::parse(&self.api.base_url)?;
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.api.per_page == 0 {
            return Err(AppError::validation("api.per_page must be > 0"));
        }
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(AppError::validation("storage.data_dir is empty"));
        }
        if let Some(name) = &self.storage.file_name {
            if name.trim().is_empty() {
                return Err(AppError::validation("storage.file_name is empty"));
            }
        }
        Ok(())
    }
}

/// HeadHunter API client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root, `/vacancies` is resolved against it
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Number of vacancies requested per search
    #[serde(default = "defaults::per_page")]
    pub per_page: u32,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            per_page: defaults::per_page(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Serialization format of the storage file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    #[default]
    Json,
    Csv,
    Xlsx,
}

impl StorageFormat {
    /// File extension used for this format.
    pub fn extension(self) -> &'static str {
        match self {
            StorageFormat::Json => "json",
            StorageFormat::Csv => "csv",
            StorageFormat::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for StorageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Storage location. One file per format under `data_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the storage file; created on first write
    #[serde(default = "defaults::data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub format: StorageFormat,

    /// Overrides the default `vacancies.<ext>` file name
    #[serde(default)]
    pub file_name: Option<String>,
}

impl StorageConfig {
    pub fn new(data_dir: impl Into<PathBuf>, format: StorageFormat) -> Self {
        Self {
            data_dir: data_dir.into(),
            format,
            file_name: None,
        }
    }

    /// Full path of the storage file.
    pub fn path(&self) -> PathBuf {
        match &self.file_name {
            Some(name) => self.data_dir.join(name),
            None => self
                .data_dir
                .join(format!("{}.{}", defaults::FILE_STEM, self.format.extension())),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(defaults::data_dir(), StorageFormat::default())
    }
}

mod defaults {
    use std::path::PathBuf;

    pub const FILE_STEM: &str = "vacancies";

    // API defaults
    pub fn base_url() -> String {
        "https://api.hh.ru".into()
    }
    pub fn per_page() -> u32 {
        10
    }
    pub fn user_agent() -> String {
        "vacancies/0.1 (+https://github.com)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Storage defaults
    pub fn data_dir() -> PathBuf {
        PathBuf::from("data")
    }
}

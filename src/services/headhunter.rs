// src/services/headhunter.rs

//! HeadHunter vacancy search client.

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::ApiConfig;
use crate::services::JobPlatformApi;
use crate::utils::http;

/// Body of `GET /vacancies`; only `items` is used.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<Value>,
}

/// Client for the public hh.ru API.
pub struct HeadHunterApi {
    client: Client,
    endpoint: Url,
    per_page: u32,
}

impl HeadHunterApi {
    /// Create a new client with the given configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: http::create_client(config)?,
            endpoint: vacancies_endpoint(&config.base_url)?,
            per_page: config.per_page,
        })
    }
}

impl JobPlatformApi for HeadHunterApi {
    fn get_vacancies(&self, query: &str) -> Result<Vec<Value>> {
        log::info!("Searching vacancies for '{}'", query);

        let per_page = self.per_page.to_string();
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("text", query), ("per_page", per_page.as_str())])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            log::error!("Vacancy search failed with status {}", status);
            return Err(AppError::remote(status, response.url().as_str()));
        }

        let items = parse_search_response(&response.text()?)?;
        log::info!("Received {} vacancies", items.len());
        Ok(items)
    }
}

/// Resolve `vacancies` against the API root.
fn vacancies_endpoint(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join("vacancies")?)
}

/// Extract the `items` array from a search response body.
pub fn parse_search_response(body: &str) -> Result<Vec<Value>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.items)
}

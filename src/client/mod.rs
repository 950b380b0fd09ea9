//! Client for the remote crawl service
//!
//! The service performs the actual crawling, login and form
//! extraction; this crate only consumes its JSON envelope contract: a
//! boolean discriminant plus either a result payload or an error
//! string.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct CrawlRequest {
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginCrawlRequest {
    pub url: String,
    pub username_selector: String,
    pub password_selector: String,
    pub submit_selector: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormsCrawlRequest {
    pub url: String,
}

/// Shared response envelope for every crawl endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl CrawlResponse {
    /// Branch on the discriminant. Neither `data` nor `error` is
    /// meaningful before this check.
    pub fn into_result(self) -> Result<Value> {
        if self.success {
            Ok(self.data.unwrap_or(Value::Null))
        } else {
            anyhow::bail!(self
                .error
                .unwrap_or_else(|| "crawl service reported failure without detail".to_string()))
        }
    }
}

/// HTTP client for the crawl service
pub struct FacadeClient {
    base_url: String,
    http: reqwest::Client,
}

impl FacadeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// POST /crawl
    pub async fn crawl(&self, request: &CrawlRequest) -> Result<CrawlResponse> {
        self.post("/crawl", request).await
    }

    /// POST /crawl/login
    pub async fn crawl_login(&self, request: &LoginCrawlRequest) -> Result<CrawlResponse> {
        self.post("/crawl/login", request).await
    }

    /// POST /crawl/forms
    pub async fn crawl_forms(&self, request: &FormsCrawlRequest) -> Result<CrawlResponse> {
        self.post("/crawl/forms", request).await
    }

    async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<CrawlResponse> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("POST {url}");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to reach crawl service at {url}"))?;

        response
            .json::<CrawlResponse>()
            .await
            .with_context(|| format!("Invalid response envelope from {url}"))
    }
}

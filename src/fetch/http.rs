// src/fetch/http.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use super::{Page, PageSource};
use crate::error::{Result, ScrapeError};

const USER_AGENT: &str = concat!("capkscraper/", env!("CARGO_PKG_VERSION"));

/// Single GET with reqwest. No retries: a failed request fails the run.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ScrapeError::Config(format!("building HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpSource {
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, url: &str) -> Result<Page> {
        debug!("Fetching text from {}", url);
        let html = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::navigation(url, format!("GET failed: {}", e)))?
            .error_for_status()
            .map_err(|e| ScrapeError::navigation(url, format!("non-success status: {}", e)))?
            .text()
            .await
            .map_err(|e| ScrapeError::navigation(url, format!("reading body: {}", e)))?;
        debug!(bytes = html.len(), "fetched page");

        Ok(Page {
            url: url.to_string(),
            html,
        })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

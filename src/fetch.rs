use reqwest::Client;
use std::time::Duration;

use crate::error::ImportError;

/// Browser-like user agent. Many recipe sites refuse the reqwest default.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Downloads recipe pages as raw HTML.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Fetches the page body, treating any non-2xx status as an error.
    pub async fn fetch(&self, url: &str) -> Result<String, ImportError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ImportError::HttpStatus(response.status()));
        }
        let html = response.text().await?;
        Ok(html)
    }
}

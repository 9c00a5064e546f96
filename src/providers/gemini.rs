use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::providers::LlmProvider;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Talks to the hosted Gemini API.
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider from configuration
    pub fn new(config: &ImportConfig) -> Result<Self, ImportError> {
        let api_key = config
            .gemini
            .api_key
            .clone()
            .ok_or_else(|| ImportError::MissingApiKey("gemini".to_string()))?;

        Ok(GeminiProvider {
            client: Client::builder()
                .timeout(Duration::from_secs(config.llm_timeout))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: config
                .gemini
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key,
            model: config.gemini.model.clone(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String, model: String, api_key: String) -> Self {
        GeminiProvider {
            client: Client::new(),
            base_url,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn provider_name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ImportError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&json!({
                "contents": [{
                    "parts": [{
                        "text": prompt
                    }]
                }]
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ImportError::HttpStatus(response.status()));
        }

        let response_body: Value = response.json().await?;
        debug!("Gemini response: {:?}", response_body);

        let content = response_body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                ImportError::ParseError("Failed to extract content from Gemini response".to_string())
            })?
            .trim()
            .to_string();
        if content.is_empty() {
            return Err(ImportError::EmptyResponse("gemini".to_string()));
        }

        Ok(content)
    }
}

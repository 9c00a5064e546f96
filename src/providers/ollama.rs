use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::providers::{LlmProvider, EXTRACTION_SYSTEM_PROMPT};

/// Talks to a local Ollama server over its native chat API.
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider from configuration
    pub fn new(config: &ImportConfig) -> Self {
        OllamaProvider {
            client: build_client(config.llm_timeout),
            base_url: config.ollama.host.clone(),
            model: config.ollama.model.clone(),
        }
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String, model: String) -> Self {
        OllamaProvider {
            client: Client::new(),
            base_url,
            model,
        }
    }
}

fn build_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .expect("Failed to create HTTP client")
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ImportError> {
        // "format": "json" makes Ollama constrain decoding to valid JSON
        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": EXTRACTION_SYSTEM_PROMPT},
                    {"role": "user", "content": prompt}
                ],
                "stream": false,
                "format": "json"
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ImportError::HttpStatus(response.status()));
        }

        let response_body: Value = response.json().await?;
        debug!("Ollama response: {:?}", response_body);

        let content = response_body["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .trim()
            .to_string();
        if content.is_empty() {
            return Err(ImportError::EmptyResponse("ollama".to_string()));
        }

        Ok(content)
    }
}

use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::providers::{GeminiProvider, LlmProvider, OllamaProvider};

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ImportConfig,
    ) -> Result<Box<dyn LlmProvider>, ImportError> {
        match provider_name {
            "ollama" => Ok(Box::new(OllamaProvider::new(config))),
            "gemini" => Ok(Box::new(GeminiProvider::new(config)?)),
            _ => Err(ImportError::UnknownProvider(provider_name.to_string())),
        }
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["ollama", "gemini"]
    }
}

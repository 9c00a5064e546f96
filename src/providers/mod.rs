mod factory;
mod gemini;
mod ollama;
mod prompt;

pub use factory::ProviderFactory;
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;
pub use prompt::{build_extraction_prompt, EXTRACTION_SYSTEM_PROMPT};

use async_trait::async_trait;

use crate::error::ImportError;

/// Unified trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "ollama", "gemini")
    fn provider_name(&self) -> &str;

    /// Send a prompt and return the model's raw text reply
    async fn complete(&self, prompt: &str) -> Result<String, ImportError>;
}

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Main import configuration structure
///
/// Everything the pipeline needs is read once at load time; nothing deeper
/// in the crate consults the process environment on its own.
#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    /// Provider to try first when structured extraction fails
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Local Ollama server settings
    #[serde(default)]
    pub ollama: OllamaConfig,
    /// Gemini API settings
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Page fetch timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: u64,
    /// Model request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub llm_timeout: u64,
}

/// Configuration for the local Ollama backend
#[derive(Debug, Deserialize, Clone)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server
    #[serde(default = "default_ollama_host")]
    pub host: String,
    /// Model identifier (e.g., "llama3.2")
    #[serde(default = "default_ollama_model")]
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_ollama_host(),
            model: default_ollama_model(),
        }
    }
}

/// Configuration for the hosted Gemini backend
#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    /// API key for authentication (can also be set via GEMINI_API_KEY)
    pub api_key: Option<String>,
    /// Model identifier (e.g., "gemini-pro")
    #[serde(default = "default_gemini_model")]
    pub model: String,
    /// Override for the API base URL (for proxies and tests)
    pub base_url: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_gemini_model(),
            base_url: None,
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "ollama".to_string()
}

fn default_ollama_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2".to_string()
}

fn default_gemini_model() -> String {
    "gemini-pro".to_string()
}

fn default_fetch_timeout() -> u64 {
    15
}

fn default_llm_timeout() -> u64 {
    60
}

impl ImportConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_IMPORT__ prefix
    /// 2. config.toml file in current directory
    /// 3. Bare OLLAMA_HOST / OLLAMA_MODEL / GEMINI_API_KEY variables
    /// 4. Default values
    ///
    /// Environment variable format: RECIPE_IMPORT__GEMINI__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// The provider name the fallback chain tries after `provider`.
    ///
    /// Only two backends exist, so the secondary is simply the other one.
    pub fn secondary_provider(&self) -> &str {
        if self.provider == "gemini" {
            "ollama"
        } else {
            "gemini"
        }
    }

    // Bare variable names predate the prefixed scheme and only fill fields
    // that are still at their built-in defaults.
    fn absorb_plain_env(&mut self) {
        if self.ollama.host == default_ollama_host() {
            if let Ok(host) = env::var("OLLAMA_HOST") {
                self.ollama.host = host;
            }
        }
        if self.ollama.model == default_ollama_model() {
            if let Ok(model) = env::var("OLLAMA_MODEL") {
                self.ollama.model = model;
            }
        }
        if self.gemini.api_key.is_none() {
            if let Ok(key) = env::var("GEMINI_API_KEY") {
                self.gemini.api_key = Some(key);
            }
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            ollama: OllamaConfig::default(),
            gemini: GeminiConfig::default(),
            fetch_timeout: default_fetch_timeout(),
            llm_timeout: default_llm_timeout(),
        }
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<ImportConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_IMPORT__OLLAMA__HOST
        .add_source(
            Environment::with_prefix("RECIPE_IMPORT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut config: ImportConfig = settings.try_deserialize()?;
    config.absorb_plain_env();
    Ok(config)
}

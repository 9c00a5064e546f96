use thiserror::Error;

/// Errors that can occur during recipe import operations
#[derive(Error, Debug)]
pub enum ImportError {
    /// Failed to fetch the page or reach a provider endpoint
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The server answered with a non-success status code
    #[error("Request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    /// The page carries no schema.org Recipe markup
    #[error("No structured recipe data found on page")]
    NoStructuredData,

    /// Failed to parse extracted data into a recipe
    #[error("Failed to parse recipe: {0}")]
    ParseError(String),

    /// A provider answered but the reply carried no usable text
    #[error("Empty response from {0}")]
    EmptyResponse(String),

    /// The provider needs an API key and none was configured
    #[error("Missing API key for {0}")]
    MissingApiKey(String),

    /// The configured provider name is not recognized
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

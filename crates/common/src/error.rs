//! Error types for Storycase

use thiserror::Error;

/// Result type alias using Storycase Error
pub type Result<T> = std::result::Result<T, Error>;

/// Storycase error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Failed to parse model JSON. Last error: {0}")]
    Generation(String),

    #[error("No completion client available. Set OPENAI_API_KEY in .env.")]
    MissingApiKey,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::InvalidConfig(e.to_string())
    }
}

use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for the finterms pipeline
#[derive(Debug, Error)]
pub enum FintermsError {
    #[error("{what} not found: {path}")]
    MissingPath { what: &'static str, path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("OpenAI API key required. Set OPENAI_API_KEY or add api_key to the config file")]
    MissingApiKey,

    #[error("Prompt file not found: {0}")]
    PromptNotFound(PathBuf),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse model response as JSON: {0}")]
    Parse(String),

    #[error("Model response does not match the extraction schema: {0}")]
    SchemaValidation(String),

    #[error("Extraction violates pricing-rule invariants ({} issues)", .0.len())]
    InvariantViolations(Vec<String>),

    #[error("Container runtime error during {operation}: {message}")]
    Container { operation: String, message: String },

    #[error("Database did not become ready after {attempts} attempts")]
    ReadinessTimeout { attempts: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type specific to finterms operations
pub type FintermsResult<T> = Result<T, FintermsError>;

impl FintermsError {
    /// Whether another extraction attempt could plausibly produce a valid
    /// response. Missing files and configuration problems never will.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FintermsError::Parse(_)
                | FintermsError::SchemaValidation(_)
                | FintermsError::Network(_)
                | FintermsError::Api(_)
                | FintermsError::Http { .. }
        )
    }
}

//! Error types for fxquote

use thiserror::Error;

/// Main error type for fxquote
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Fetch failed: {0}")]
    FetchError(String),

    #[error("Currency pair not found: {0}")]
    PairNotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("No rate available for {0}")]
    RateUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Result type alias for fxquote operations
pub type Result<T> = std::result::Result<T, QuoteError>;

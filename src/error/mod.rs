//! Error types for Cora.

use thiserror::Error;

/// Primary error type for all Cora operations.
#[derive(Error, Debug)]
pub enum CoraError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CoraError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::RateLimited { .. } => ErrorCategory::RateLimit,
            Self::Network(_) => ErrorCategory::Network,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::NotFound(_) => ErrorCategory::NotFound,
            Self::InvalidArgument(_) => ErrorCategory::InvalidInput,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                404 => ErrorCategory::NotFound,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
            Self::Io(_) => ErrorCategory::Unknown,
        }
    }

    /// Whether the failed request could succeed if the caller tried again.
    ///
    /// Cora never retries on its own; this only informs callers.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::RateLimit | ErrorCategory::Network | ErrorCategory::Server
        )
    }
}

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Network,
    Server,
    Api,
    NotFound,
    Configuration,
    Serialization,
    InvalidInput,
    Unknown,
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, CoraError>;

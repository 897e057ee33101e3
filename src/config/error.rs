//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid AI provider timeout")]
    InvalidAiTimeout,

    #[error("AI provider timeout ({ai_secs}s) must be shorter than the request timeout ({request_secs}s)")]
    AiTimeoutNotBelowRequestTimeout { ai_secs: u64, request_secs: u64 },

    #[error("Reply delay exceeds maximum allowed (10000 ms)")]
    ReplyDelayTooLong,

    #[error("Session idle TTL must be positive")]
    InvalidSessionIdleTtl,

    #[error("Scenario catalog file not found: {0}")]
    CatalogNotFound(String),
}

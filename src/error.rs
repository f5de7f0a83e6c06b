//! Error types for the spread tracker

use reqwest::StatusCode;
use thiserror::Error;

/// Spread tracker errors
#[derive(Error, Debug)]
pub enum SpreadError {
    /// Non-2xx response or network failure talking to the upstream API
    #[error("REST API error: {message}")]
    Transport {
        status: Option<StatusCode>,
        message: String,
    },

    #[error("Market not found: {0}")]
    NotFound(String),

    #[error("Spread alert not found: {0}")]
    AlertNotFound(i64),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Metrics error: {0}")]
    MetricsError(String),
}

impl SpreadError {
    /// HTTP status of the upstream response, when the failure carried one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SpreadError::Transport { status, .. } => *status,
            _ => None,
        }
    }

    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        SpreadError::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for SpreadError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return SpreadError::ParseError(err.to_string());
        }
        SpreadError::Transport {
            status: err.status(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SpreadError {
    fn from(err: serde_json::Error) -> Self {
        SpreadError::ParseError(err.to_string())
    }
}

impl From<sqlx::Error> for SpreadError {
    fn from(err: sqlx::Error) -> Self {
        SpreadError::Storage(err.to_string())
    }
}

impl From<config::ConfigError> for SpreadError {
    fn from(err: config::ConfigError) -> Self {
        SpreadError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SpreadError>;

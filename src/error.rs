// src/error.rs

//! Unified error handling for the reporting engine.

use std::fmt;

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream API returned a non-success status
    #[error("API error for {context}: HTTP {status}")]
    Api { context: String, status: u16 },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Report assembly produced no rows
    #[error("Nothing to export for {0}")]
    NothingToExport(String),

    /// Export sink failure
    #[error("Export error for {context}: {message}")]
    Export { context: String, message: String },
}

impl AppError {
    /// Create an API error with request context.
    pub fn api(context: impl Into<String>, status: u16) -> Self {
        Self::Api {
            context: context.into(),
            status,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an export error with context.
    pub fn export(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Export {
            context: context.into(),
            message: message.to_string(),
        }
    }
}

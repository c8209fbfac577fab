//! Custom error types for tag tree translation

use thiserror::Error;

/// Translation-related errors
///
/// Injection rejections are not errors; see [`crate::core::injection::Rejection`].
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The translation oracle failed or returned an error
    #[error("Oracle error: {message}")]
    OracleError {
        message: String,
    },

    /// Inline markup could not be parsed
    #[error("Invalid markup at byte {position}: {message}")]
    InvalidMarkup {
        position: usize,
        message: String,
    },

    /// File operation error
    #[error("File error: {path} - {message}")]
    FileError {
        path: String,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// Invalid file format
    #[error("Invalid file format: {format}")]
    InvalidFormat {
        format: String,
    },

    /// Wrapper for anyhow errors
    #[error("Internal error: {0}")]
    InternalError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Layered configuration error
    #[error("Config source error: {0}")]
    ConfigSourceError(#[from] config::ConfigError),
}

impl TranslationError {
    /// Shorthand for an oracle failure
    pub fn oracle(message: impl Into<String>) -> Self {
        TranslationError::OracleError {
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for TranslationError {
    fn from(err: anyhow::Error) -> Self {
        TranslationError::InternalError(err.to_string())
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;

//! Centralized error handling for pfetch

use std::io;
use thiserror::Error;

/// Custom error type for pfetch operations
#[derive(Debug, Error)]
pub enum PfetchError {
    /// I/O errors (file reading, command execution, output stream)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Parsing errors (invalid data format)
    #[error("Parse error: {0}")]
    Parse(String),
    /// Extension file errors
    #[error("Config error: {0}")]
    Config(String),
    /// System detection errors
    #[error("Detection error: {0}")]
    Detection(String),
}

impl From<toml::de::Error> for PfetchError {
    fn from(error: toml::de::Error) -> Self {
        PfetchError::Config(error.to_string())
    }
}

/// Type alias for Results in pfetch
pub type Result<T> = std::result::Result<T, PfetchError>;

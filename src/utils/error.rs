// Error handling utilities
// Author: Gabriel Demetrios Lafis

use thiserror::Error;

use super::ConfigError;
use crate::data::LoadError;
use crate::storage::ExportError;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Error: {0}")]
    Other(String),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Other(err.to_string())
    }
}

/// Result type alias for AppError
pub type AppResult<T> = Result<T, AppError>;

use std::fmt;

use thiserror::Error;

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("schema mismatch: {0}")]
    Schema(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse failure category reported to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Configuration => f.write_str("configuration"),
            ErrorKind::Io => f.write_str("io"),
        }
    }
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::Configuration(_) | GenerationError::Schema(_) => {
                ErrorKind::Configuration
            }
            GenerationError::Io(_) | GenerationError::Csv(_) | GenerationError::Json(_) => {
                ErrorKind::Io
            }
        }
    }
}

impl From<regiondata_core::Error> for GenerationError {
    fn from(err: regiondata_core::Error) -> Self {
        match err {
            regiondata_core::Error::InvalidConfig(message) => {
                GenerationError::Configuration(message)
            }
            other => GenerationError::Configuration(other.to_string()),
        }
    }
}

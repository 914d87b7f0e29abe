use thiserror::Error;

/// Errors emitted by the evaluation engine.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),
    #[error("validation failed with {0} violation(s)")]
    Violations(u64),
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<regiondata_core::Error> for EvalError {
    fn from(err: regiondata_core::Error) -> Self {
        match err {
            regiondata_core::Error::InvalidConfig(message) => EvalError::Configuration(message),
            other => EvalError::Configuration(other.to_string()),
        }
    }
}

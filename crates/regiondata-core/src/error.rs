use thiserror::Error;

/// Core error type shared across regiondata crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The generator configuration violates an invariant.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Catch-all error for unexpected failures.
    #[error("other error: {0}")]
    Other(String),
}

/// Convenience alias for results returned by regiondata crates.
pub type Result<T> = std::result::Result<T, Error>;

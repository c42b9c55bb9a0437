//! Error types for hierlogit

use thiserror::Error;

/// hierlogit error type
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed fixed inputs or parameter vectors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Numerical failure inside a density or gradient evaluation
    #[error("Computation error: {0}")]
    Computation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

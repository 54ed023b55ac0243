//! Error types for viswal

use thiserror::Error;

/// Main error type for viswal operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed ring {ring}: {len} coordinate(s), at least 2 required")]
    MalformedRing { ring: usize, len: usize },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Algorithm error: {0}")]
    Algorithm(String),
}

/// Result type alias for viswal operations
pub type Result<T> = std::result::Result<T, Error>;

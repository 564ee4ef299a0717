//! Error types for the drape engine.
//!
//! Crates return `DrapeResult<T>` from fallible operations. Stepping the
//! simulation is not fallible; degraded states are reported through
//! diagnostics instead.

use thiserror::Error;

/// Unified error type for the drape engine.
#[derive(Debug, Error)]
pub enum DrapeError {
    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Buffer sizes passed to a compute dispatch do not line up.
    #[error("Compute error: {0}")]
    Compute(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, DrapeError>`.
pub type DrapeResult<T> = Result<T, DrapeError>;

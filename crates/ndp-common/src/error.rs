//! Error types shared across the NDP workspace

use thiserror::Error;

/// Result type alias for common NDP operations
pub type Result<T> = std::result::Result<T, NdpError>;

/// Error type for the common layer
#[derive(Error, Debug)]
pub enum NdpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

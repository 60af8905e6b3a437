//! Error types for fencematch

use thiserror::Error;

/// Result type alias for fencematch operations
pub type Result<T> = std::result::Result<T, FenceError>;

/// Fence matching and host error types
#[derive(Error, Debug)]
pub enum FenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cursor offset outside `0..=len` - a caller contract violation
    #[error("Cursor offset {offset} is outside buffer of length {len}")]
    InvalidOffset { offset: usize, len: usize },

    #[error("Invalid settings file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("{0}")]
    Message(String),
}

//! Error types for userdir
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using DirectoryError
pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Unified error type for userdir operations
#[derive(Debug, Error)]
pub enum DirectoryError {
    // -------------------------------------------------------------------------
    // Query Errors (the only kinds the directory store produces)
    // -------------------------------------------------------------------------
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Network error: {0}")]
    Network(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Internal failure reported by the server in an ERROR response
    #[error("Remote error: {0}")]
    Remote(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DirectoryError {
    /// Shorthand for `InvalidArgument`
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        DirectoryError::InvalidArgument(message.into())
    }

    /// Shorthand for `NotFound`
    pub fn not_found(message: impl Into<String>) -> Self {
        DirectoryError::NotFound(message.into())
    }

    /// The message without the kind prefix, as carried on the wire
    pub fn message(&self) -> String {
        match self {
            DirectoryError::InvalidArgument(msg)
            | DirectoryError::NotFound(msg)
            | DirectoryError::Serialization(msg)
            | DirectoryError::Network(msg)
            | DirectoryError::Protocol(msg)
            | DirectoryError::Remote(msg)
            | DirectoryError::Config(msg) => msg.clone(),
            DirectoryError::Io(e) => e.to_string(),
        }
    }
}

impl From<bincode::Error> for DirectoryError {
    fn from(err: bincode::Error) -> Self {
        DirectoryError::Serialization(err.to_string())
    }
}

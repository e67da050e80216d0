//! Error types for source adapters.

use thiserror::Error;

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Errors that can occur while reading source documents.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CIK with no digits in it
    #[error("Invalid CIK: {0:?}")]
    InvalidCik(String),

    /// Filing not found
    #[error("Filing not found: {0}")]
    FilingNotFound(String),

    /// Missing data
    #[error("Missing data for {subject}: {reason}")]
    MissingData {
        /// What was being processed
        subject: String,
        /// Reason for missing data
        reason: String,
    },
}

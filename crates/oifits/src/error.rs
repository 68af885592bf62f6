//! Error types for the oifits library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for oifits operations.
///
/// Checking, filtering and merging never fail; errors only arise while
/// loading configuration, reading or writing datasets, and building records
/// whose channel vectors disagree with their table.
#[derive(Debug, Error)]
pub enum OiError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A per-channel vector does not match the table's channel count.
    #[error("{table}: expected {expected} channels, found {found}")]
    ChannelCount {
        table: String,
        expected: usize,
        found: usize,
    },

    /// Failed to save or load a dataset.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Name pattern compilation error.
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type alias for oifits operations.
pub type Result<T> = std::result::Result<T, OiError>;

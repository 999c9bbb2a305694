//! Error types for context store operations.

use std::path::PathBuf;

/// Error type for context store operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The context file exists but could not be read.
    #[error("failed to read context file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The context file is not a well-formed list of turns.
    #[error("failed to parse context file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The conversation could not be serialized.
    #[error("failed to serialize conversation: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The context file could not be written.
    #[error("failed to write context file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The context file could not be removed.
    #[error("failed to remove context file '{}': {source}", path.display())]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Error from a non-file store.
    #[error("store error: {0}")]
    Other(String),
}

/// Result type for context store operations.
pub type Result<T> = std::result::Result<T, Error>;

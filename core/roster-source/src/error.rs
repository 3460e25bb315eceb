//! FILENAME: core/roster-source/src/error.rs

use std::path::PathBuf;

use thiserror::Error;

/// Transport or shape failure. Field-level problems never end up here.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    #[error("Invalid JSON payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Data is not in expected format (expected an array, got {found})")]
    NotAnArray { found: &'static str },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid source URL: {0}")]
    InvalidUrl(String),
}

impl SourceError {
    /// Whether retrying with the same window could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            SourceError::Transport(_) | SourceError::Io { .. } => true,
            SourceError::Status { status } => *status >= 500 || *status == 429,
            SourceError::Decode(_) | SourceError::NotAnArray { .. } | SourceError::InvalidUrl(_) => false,
        }
    }
}

//! Error types shared across clipsift crates.

use std::path::PathBuf;

/// Top-level error type for clipsift operations.
#[derive(Debug, thiserror::Error)]
pub enum ClipsiftError {
    #[error("Metadata error: {message}")]
    Metadata { message: String },

    #[error("Sampling error: {message}")]
    Sampling { message: String },

    #[error("Fetch error: {message}")]
    Fetch { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Missing columns in metadata: {columns:?}")]
    MissingColumns { columns: Vec<String> },

    #[error("No rows left after {stage}")]
    EmptyCandidates { stage: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ClipsiftError.
pub type ClipsiftResult<T> = Result<T, ClipsiftError>;

impl ClipsiftError {
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata {
            message: msg.into(),
        }
    }

    pub fn sampling(msg: impl Into<String>) -> Self {
        Self::Sampling {
            message: msg.into(),
        }
    }

    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch {
            message: msg.into(),
        }
    }

    pub fn empty_candidates(stage: impl Into<String>) -> Self {
        Self::EmptyCandidates {
            stage: stage.into(),
        }
    }
}

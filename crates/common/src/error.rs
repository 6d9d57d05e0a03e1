//! Error types shared across tracksync crates.
//!
//! Per-cell data problems never surface here: they degrade to gaps inside
//! the data model. These variants cover whole-source failures only.

use std::path::PathBuf;

/// Top-level error type for tracksync operations.
#[derive(Debug, thiserror::Error)]
pub enum TracksyncError {
    #[error("Data error: {message}")]
    Data { message: String },

    #[error("Media error: {message}")]
    Media { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using TracksyncError.
pub type TracksyncResult<T> = Result<T, TracksyncError>;

impl TracksyncError {
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data {
            message: msg.into(),
        }
    }

    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }

    /// Map an I/O error on `path` to `FileNotFound` when that is what happened.
    pub fn from_io_at(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path: path.into() }
        } else {
            Self::Io(err)
        }
    }
}

//! Errors surfaced by report generation

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Directory creation, file read or file write failed
    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot or wire message could not be decoded
    #[error("Unable to decode execution result: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("Unable to encode search index: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Theme directory not found: {}", .0.display())]
    ThemeNotFound(PathBuf),

    #[error("Message of {size} bytes exceeds the {limit} byte limit")]
    FrameTooLarge { size: u64, limit: u64 },

    #[error("Listener error: {0}")]
    Listener(String),
}

impl ReportError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

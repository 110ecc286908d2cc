//! Typed errors for translation persistence

use crate::status::StringStatus;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the translation store and its on-disk format
#[derive(Debug, Error)]
pub enum StoreError {
    /// A persisted JSON file exists but does not match the expected format
    #[error("invalid translation data in {path}: {source}")]
    Validation {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("a translation named '{0}' already exists")]
    DuplicateName(String),

    #[error("translation '{0}' not found")]
    NotFound(String),

    #[error("the base game translation is read-only")]
    ReadOnly,

    #[error("cannot change string status from {} to {}", .from.as_str(), .to.as_str())]
    InvalidTransition {
        from: StringStatus,
        to: StringStatus,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

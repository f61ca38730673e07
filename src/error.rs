//! Error taxonomy for content access and migration
//!
//! Nothing here escapes the public accessor API: callers of
//! [`crate::content::loader::ContentLoader`] get empty lists or `None`.
//! The variants exist so the recovery sites can log what went wrong.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for content operations
pub type Result<T> = std::result::Result<T, ContentError>;

/// Errors raised while reading or rewriting content files
#[derive(Error, Debug)]
pub enum ContentError {
    /// A directory or file that should exist does not
    #[error("Not found: {path:?}")]
    Missing { path: PathBuf },

    /// A file exists but its contents could not be understood
    #[error("Malformed content in {path:?}: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContentError {
    pub fn missing(path: impl Into<PathBuf>) -> Self {
        Self::Missing { path: path.into() }
    }

    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            message: message.into(),
        }
    }
}

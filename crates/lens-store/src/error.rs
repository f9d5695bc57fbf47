//! Signal store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from archive reads and writes.
///
/// A corrupt archive is not an error: it reads as empty. Only filesystem
/// failures and serialization failures surface here.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("archive I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Archive contents could not be serialized.
    #[error("archive serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

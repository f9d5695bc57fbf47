//! Harmonization error types.

use std::path::PathBuf;

/// Errors from building a company-grounded feature vector.
#[derive(Debug, thiserror::Error)]
pub enum HarmonizeError {
    /// No dataset row matches the company name (case-insensitive).
    #[error("company not found in reference dataset: {company}")]
    NotFound { company: String },

    /// `DuckDB` failed to read or query the reference dataset.
    #[error("DuckDB error: {0}")]
    Dataset(#[from] duckdb::Error),

    /// The dataset is missing, lacks a required column, or holds an
    /// unusable value.
    #[error("invalid reference dataset {}: {reason}", path.display())]
    InvalidDataset { path: PathBuf, reason: String },

    /// A signal archive could not be read.
    #[error("signal archive error: {0}")]
    Archive(#[from] lens_store::StoreError),
}

impl HarmonizeError {
    pub(crate) fn invalid(path: &std::path::Path, reason: impl Into<String>) -> Self {
        Self::InvalidDataset {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

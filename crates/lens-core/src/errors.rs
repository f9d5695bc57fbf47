//! Errors raised while constructing core domain values.
//!
//! Store, provider, harmonization and scoring errors live in their own
//! crates; the binary converges everything into `anyhow`.

use thiserror::Error;

/// A value failed the checks of a core constructor.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Audit request field out of range or blank.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A ticker with no characters usable in an archive file name.
    #[error("ticker '{0}' has no letters or digits")]
    InvalidTicker(String),
}

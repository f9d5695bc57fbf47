//! Provider error types.

use thiserror::Error;

/// Errors that can occur when pulling a signal from an external provider.
///
/// These never leave the fetcher boundary as failures of a harvest: callers
/// log them and carry on with the next provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP transport error. The request URL is stripped because it carries
    /// the API credential.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Provider returned a non-success status code or an error body.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The provider returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The provider answered 200 with a throttling notice instead of data.
    #[error("throttled: {0}")]
    Throttled(String),

    /// No credential configured for this provider.
    #[error("missing credential for {0}")]
    MissingCredential(&'static str),

    /// Failed to parse a provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The response parsed but held nothing to sample.
    #[error("empty series: {0}")]
    EmptySeries(String),

    /// The filing search matched nothing.
    #[error("no filings found for {0}")]
    NoFilings(String),

    /// The requested ticker cannot name an archive.
    #[error(transparent)]
    InvalidTicker(#[from] lens_core::CoreError),

    /// The signal was fetched but could not be archived.
    #[error("archive write failed: {0}")]
    Store(#[from] lens_store::StoreError),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        Self::Http(error.without_url())
    }
}

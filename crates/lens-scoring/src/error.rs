//! Scoring and audit error types.

/// Errors from invoking the scoring model.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    /// No model command is configured.
    #[error("scoring model is not configured (set scoring.model_command)")]
    NotConfigured,

    /// The model process could not be started or its pipes failed.
    #[error("failed to run scoring model '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("scoring model timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The model exited unsuccessfully.
    #[error("scoring model exited with {status}: {stderr}")]
    ModelFailed { status: String, stderr: String },

    /// The model's stdout is not a model output document.
    #[error("unreadable scoring model output: {0}")]
    Parse(#[from] serde_json::Error),

    /// A feature is NaN or infinite; the model is not called.
    #[error("feature vector for the {path} path has a non-finite value")]
    NonFiniteFeatures { path: &'static str },

    /// The output parsed but violates the contract.
    #[error("invalid scoring model output: {0}")]
    InvalidOutput(String),
}

/// Errors surfaced to the caller of an audit.
///
/// [`AuditError::Failed`] carries no cause. The cause is logged with the
/// project or company identifier and is never returned to the caller.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// The request is malformed or out of range.
    #[error("invalid audit request: {0}")]
    Validation(String),

    #[error("company not found: {company}")]
    NotFound { company: String },

    #[error("audit failed")]
    Failed,
}

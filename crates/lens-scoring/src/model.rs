//! The scoring model seam.
//!
//! The pretrained model is opaque: a [`FeatureVector`] goes in, a
//! [`ModelOutput`] comes out. [`ProcessModel`] runs it as a child process
//! speaking JSON over stdin/stdout.

use std::process::Stdio;
use std::time::Duration;

use lens_config::ScoringConfig;
use lens_core::{FeatureVector, ModelOutput};
use tokio::io::AsyncWriteExt;

use crate::ScoringError;

/// Anything that can score a feature vector.
#[allow(async_fn_in_trait)]
pub trait ScoringModel {
    /// Score one vector. Failures are not retried.
    async fn predict(&self, features: &FeatureVector) -> Result<ModelOutput, ScoringError>;
}

/// Model run as an external command.
///
/// stdin receives `{"path": "company"|"input", "features": {...}}`; stdout
/// must be `{"viability_score": <number>, "confidence": <string>}`.
#[derive(Debug, Clone)]
pub struct ProcessModel {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ProcessModel {
    #[must_use]
    pub fn new(command: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            args,
            timeout,
        }
    }

    #[must_use]
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(
            config.model_command.trim(),
            config.model_args.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn spawn_error(&self, source: std::io::Error) -> ScoringError {
        ScoringError::Spawn {
            command: self.command.clone(),
            source,
        }
    }
}

impl ProcessModel {
    /// Spawn the model, feed it `input` and collect its output.
    ///
    /// The timeout covers the whole exchange, stdin included: a model that
    /// never drains its input cannot stall the caller. The child is killed
    /// when the exchange is abandoned.
    async fn exchange(&self, input: &[u8]) -> Result<std::process::Output, ScoringError> {
        let mut child = tokio::process::Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let run = async move {
            if let Some(mut stdin) = child.stdin.take() {
                match stdin.write_all(input).await {
                    // A model that ignores its input may exit before reading it.
                    Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                    other => other?,
                }
            }
            child.wait_with_output().await
        };

        tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| ScoringError::Timeout {
                secs: self.timeout.as_secs(),
            })?
            .map_err(|e| self.spawn_error(e))
    }
}

impl ScoringModel for ProcessModel {
    async fn predict(&self, features: &FeatureVector) -> Result<ModelOutput, ScoringError> {
        if self.command.is_empty() {
            return Err(ScoringError::NotConfigured);
        }

        let input = serde_json::to_vec(features)?;
        let output = self.exchange(&input).await?;

        if !output.status.success() {
            return Err(ScoringError::ModelFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let parsed: ModelOutput = serde_json::from_slice(&output.stdout)?;
        validate_output(&parsed)?;
        tracing::debug!(
            path = features.path(),
            score = parsed.viability_score,
            confidence = %parsed.confidence,
            "model scored features"
        );
        Ok(parsed)
    }
}

/// Reject outputs that would produce a meaningless response.
pub(crate) fn validate_output(output: &ModelOutput) -> Result<(), ScoringError> {
    if !output.viability_score.is_finite() {
        return Err(ScoringError::InvalidOutput(format!(
            "viability_score is not finite: {}",
            output.viability_score
        )));
    }
    if output.confidence.trim().is_empty() {
        return Err(ScoringError::InvalidOutput("confidence is blank".into()));
    }
    Ok(())
}

//! End-to-end audits: validate, harmonize, score, map.

use lens_core::{AuditInput, AuditRequest, AuditResponse, CoreError, FeatureVector};
use lens_harmonize::{FeatureHarmonizer, HarmonizeError};

use crate::{AuditError, ScoreMapper, ScoringError, ScoringModel};

/// Runs audits against one harmonizer, model and mapper.
#[derive(Debug, Clone)]
pub struct AuditService<M> {
    harmonizer: FeatureHarmonizer,
    model: M,
    mapper: ScoreMapper,
}

impl<M: ScoringModel> AuditService<M> {
    pub const fn new(harmonizer: FeatureHarmonizer, model: M, mapper: ScoreMapper) -> Self {
        Self {
            harmonizer,
            model,
            mapper,
        }
    }

    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Audit a startup idea from its request fields.
    ///
    /// # Errors
    ///
    /// [`AuditError::Validation`] for out-of-range fields (nothing is scored),
    /// [`AuditError::Failed`] if the model fails.
    pub async fn audit(&self, request: AuditRequest) -> Result<AuditResponse, AuditError> {
        let input = AuditInput::try_from(request).map_err(|e| match e {
            CoreError::Validation(message) => AuditError::Validation(message),
            other => AuditError::Validation(other.to_string()),
        })?;

        let project = input.project_name();
        let features = self.harmonizer.build_features_for_input(&input);
        let response = self
            .score(&FeatureVector::Input(features))
            .await
            .map_err(|e| {
                tracing::error!(project, error = %e, "scoring failed");
                AuditError::Failed
            })?;
        tracing::info!(project, score = response.fragility_score, risk = %response.risk_level, "audit scored");
        Ok(response)
    }

    /// Audit a company from the reference dataset and archived signals.
    ///
    /// # Errors
    ///
    /// [`AuditError::NotFound`] if the company is not in the dataset,
    /// [`AuditError::Failed`] for harmonization or model failures.
    pub async fn audit_company(&self, company: &str) -> Result<AuditResponse, AuditError> {
        let harmonizer = self.harmonizer.clone();
        let name = company.to_string();
        let built = tokio::task::spawn_blocking(move || harmonizer.build_features_for_company(&name))
            .await
            .map_err(|e| {
                tracing::error!(company, error = %e, "harmonization task panicked");
                AuditError::Failed
            })?;

        let features = match built {
            Ok(features) => features,
            Err(HarmonizeError::NotFound { company }) => {
                return Err(AuditError::NotFound { company });
            }
            Err(e) => {
                tracing::error!(company, error = %e, "company harmonization failed");
                return Err(AuditError::Failed);
            }
        };

        let response = self
            .score(&FeatureVector::Company(features))
            .await
            .map_err(|e| {
                tracing::error!(company, error = %e, "scoring failed");
                AuditError::Failed
            })?;
        tracing::info!(company, score = response.fragility_score, risk = %response.risk_level, "audit scored");
        Ok(response)
    }

    async fn score(&self, features: &FeatureVector) -> Result<AuditResponse, ScoringError> {
        if !features.is_finite() {
            return Err(ScoringError::NonFiniteFeatures {
                path: features.path(),
            });
        }
        let output = self.model.predict(features).await?;
        Ok(self.mapper.map(&output))
    }
}

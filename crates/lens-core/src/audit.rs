//! The audit contract.
//!
//! `AuditRequest` and `AuditResponse` are the wire shapes (camelCase keys).
//! `AuditInput` is the validated form consumed by the input-grounded
//! harmonization path.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Inbound audit request for a startup idea.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditRequest {
    pub project_name: String,
    pub elevator_pitch: String,
    pub assumptions: Vec<String>,
    /// Monthly cash burn in currency units.
    pub monthly_burn: f64,
    /// Target customer-acquisition cost in currency units.
    #[serde(rename = "targetCAC")]
    pub target_cac: f64,
}

/// Validated audit input. Only constructible through [`AuditInput::try_from`].
#[derive(Debug, Clone, PartialEq)]
pub struct AuditInput {
    project_name: String,
    elevator_pitch: String,
    assumptions: Vec<String>,
    monthly_burn: f64,
    target_cac: f64,
}

impl AuditInput {
    #[must_use]
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    #[must_use]
    pub fn elevator_pitch(&self) -> &str {
        &self.elevator_pitch
    }

    #[must_use]
    pub fn assumptions(&self) -> &[String] {
        &self.assumptions
    }

    #[must_use]
    pub const fn monthly_burn(&self) -> f64 {
        self.monthly_burn
    }

    #[must_use]
    pub const fn target_cac(&self) -> f64 {
        self.target_cac
    }
}

impl TryFrom<AuditRequest> for AuditInput {
    type Error = CoreError;

    /// Reject out-of-range fields before any harmonization happens.
    ///
    /// Rules: `projectName` is not blank; `monthlyBurn` and `targetCAC` are
    /// finite and non-negative.
    fn try_from(request: AuditRequest) -> Result<Self, Self::Error> {
        if request.project_name.trim().is_empty() {
            return Err(CoreError::Validation(
                "projectName must not be blank".to_string(),
            ));
        }
        check_amount("monthlyBurn", request.monthly_burn)?;
        check_amount("targetCAC", request.target_cac)?;

        Ok(Self {
            project_name: request.project_name,
            elevator_pitch: request.elevator_pitch,
            assumptions: request.assumptions,
            monthly_burn: request.monthly_burn,
            target_cac: request.target_cac,
        })
    }
}

fn check_amount(field: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::Validation(format!("{field} must be a finite number")));
    }
    if value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    Ok(())
}

/// Outbound audit response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditResponse {
    pub fragility_score: f64,
    pub risk_level: String,
    pub recommendation: String,
    /// Six points: fixed scaffolding followed by the derived score point.
    pub chart_data: Vec<i64>,
}

//! Model output to audit response.

use lens_config::ScoringConfig;
use lens_core::{AuditResponse, ModelOutput};

/// Number of points in `chart_data`.
pub const CHART_POINTS: usize = 6;

/// Maps raw model output onto the response contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreMapper {
    recommendation: String,
    chart_prefix: [i64; CHART_POINTS - 1],
}

impl ScoreMapper {
    #[must_use]
    pub fn new(recommendation: impl Into<String>, chart_prefix: [i64; CHART_POINTS - 1]) -> Self {
        Self {
            recommendation: recommendation.into(),
            chart_prefix,
        }
    }

    #[must_use]
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.recommendation.clone(), config.chart_prefix)
    }

    /// Score and label pass through unchanged. The chart is the fixed
    /// prefix followed by `round(viability_score * 100)`.
    #[must_use]
    pub fn map(&self, output: &ModelOutput) -> AuditResponse {
        let mut chart_data = Vec::with_capacity(CHART_POINTS);
        chart_data.extend_from_slice(&self.chart_prefix);
        chart_data.push(score_point(output.viability_score));

        AuditResponse {
            fragility_score: output.viability_score,
            risk_level: output.confidence.clone(),
            recommendation: self.recommendation.clone(),
            chart_data,
        }
    }
}

impl Default for ScoreMapper {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

// `as` saturates out-of-range floats and maps NaN to 0.
#[allow(clippy::cast_possible_truncation)]
fn score_point(score: f64) -> i64 {
    (score * 100.0).round() as i64
}

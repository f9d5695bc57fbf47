//! Feature vectors produced by the two harmonization paths.
//!
//! The company-grounded and input-grounded key sets never overlap in a single
//! response. They are kept as distinct variants of [`FeatureVector`] and the
//! scoring adapter handles each shape explicitly.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Features built from a reference company plus the latest archived signals.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CompanyFeatures {
    pub market_sentiment_index: f64,
    /// Total funding divided by average technical salary. Not normalized.
    pub burn_efficiency_score: f64,
    pub sec_transparency_score: f64,
    pub total_funding_usd: f64,
    pub funding_rounds: u32,
    pub founder_count: u32,
    pub founding_year: i32,
}

/// Features derived purely from an audit request. Every value is in `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct InputFeatures {
    pub burn_efficiency_score: f64,
    pub assumption_risk_score: f64,
    pub pitch_complexity_score: f64,
    pub estimated_runway_score: f64,
}

/// Model-ready feature vector, tagged by the path that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "path", content = "features", rename_all = "snake_case")]
pub enum FeatureVector {
    Company(CompanyFeatures),
    Input(InputFeatures),
}

impl FeatureVector {
    /// Name of the harmonization path.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Company(_) => "company",
            Self::Input(_) => "input",
        }
    }

    /// Feature name/value pairs in a stable order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        match self {
            Self::Company(f) => vec![
                ("market_sentiment_index", f.market_sentiment_index),
                ("burn_efficiency_score", f.burn_efficiency_score),
                ("sec_transparency_score", f.sec_transparency_score),
                ("total_funding_usd", f.total_funding_usd),
                ("funding_rounds", f64::from(f.funding_rounds)),
                ("founder_count", f64::from(f.founder_count)),
                ("founding_year", f64::from(f.founding_year)),
            ],
            Self::Input(f) => vec![
                ("burn_efficiency_score", f.burn_efficiency_score),
                ("assumption_risk_score", f.assumption_risk_score),
                ("pitch_complexity_score", f.pitch_complexity_score),
                ("estimated_runway_score", f.estimated_runway_score),
            ],
        }
    }

    /// `true` when no entry is NaN or infinite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.entries().iter().all(|(_, v)| v.is_finite())
    }
}

impl From<CompanyFeatures> for FeatureVector {
    fn from(features: CompanyFeatures) -> Self {
        Self::Company(features)
    }
}

impl From<InputFeatures> for FeatureVector {
    fn from(features: InputFeatures) -> Self {
        Self::Input(features)
    }
}

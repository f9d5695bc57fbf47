//! # lens-harmonize
//!
//! Turns archived signals and user input into model-ready features.
//!
//! Two paths that never share a key set:
//! - **Company-grounded**: a reference dataset row plus the latest market,
//!   labor and regulatory signals ([`FeatureHarmonizer::build_features_for_company`]).
//! - **Input-grounded**: pure arithmetic over a validated request
//!   ([`build_features_for_input`]).
//!
//! Harmonization only reads the signal archive.

mod dataset;
mod error;
mod input;
pub mod signals;

pub use dataset::ReferenceDataset;
pub use error::HarmonizeError;
pub use input::build_features_for_input;

use std::path::PathBuf;

use lens_config::LensConfig;
use lens_core::{AuditInput, CompanyFeatures, InputFeatures};
use lens_store::SignalStore;

/// Builds feature vectors from the reference dataset and signal archive.
#[derive(Debug, Clone)]
pub struct FeatureHarmonizer {
    dataset: ReferenceDataset,
    store: SignalStore,
    /// Ticker whose regulatory archive supplies the transparency score.
    ticker: String,
}

impl FeatureHarmonizer {
    #[must_use]
    pub fn new(dataset_path: impl Into<PathBuf>, store: SignalStore, ticker: impl Into<String>) -> Self {
        Self {
            dataset: ReferenceDataset::new(dataset_path),
            store,
            ticker: ticker.into(),
        }
    }

    /// Harmonizer over the configured dataset, signal directory and ticker.
    /// The signal directory is not created.
    #[must_use]
    pub fn from_config(config: &LensConfig) -> Self {
        Self::new(
            config.dataset.path.clone(),
            SignalStore::reader(config.harvest.signals_dir.clone()),
            config.harvest.ticker.clone(),
        )
    }

    /// Company-grounded features for `company_name` (case-insensitive).
    ///
    /// `burn_efficiency_score` is total funding over the latest average tech
    /// salary and is not normalized; it can exceed 1.
    ///
    /// # Errors
    ///
    /// Returns [`HarmonizeError::NotFound`] if the company is absent, and
    /// the other variants for dataset or archive failures.
    pub fn build_features_for_company(&self, company_name: &str) -> Result<CompanyFeatures, HarmonizeError> {
        let record = self
            .dataset
            .find(company_name)?
            .ok_or_else(|| HarmonizeError::NotFound {
                company: company_name.trim().to_string(),
            })?;

        let market_sentiment_index = signals::market_sentiment(&self.store)?;
        let salary = signals::tech_salary(&self.store)?;
        let sec_transparency_score = signals::transparency(&self.store, &self.ticker)?;

        let features = CompanyFeatures {
            market_sentiment_index,
            burn_efficiency_score: signals::burn_efficiency(record.total_funding_usd, salary),
            sec_transparency_score,
            total_funding_usd: record.total_funding_usd,
            funding_rounds: record.funding_rounds,
            founder_count: record.founders_or_default(),
            founding_year: record.founding_year,
        };
        tracing::info!(company = %record.company_name, "company features built");
        Ok(features)
    }

    /// Input-grounded features. No I/O.
    #[must_use]
    pub fn build_features_for_input(&self, input: &AuditInput) -> InputFeatures {
        let features = build_features_for_input(input);
        tracing::info!(project = input.project_name(), "input features built");
        features
    }
}

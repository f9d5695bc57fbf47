//! # lens-signals
//!
//! External signal fetchers for FounderLens.
//!
//! Three provider adapters feed the [`SignalStore`]:
//! - Alpha Vantage daily time series (market momentum)
//! - BLS public timeseries API (labor and price benchmarks)
//! - sec-api.io query and extractor APIs (regulatory forensics)
//!
//! Each fetch samples or extracts one observation and appends it to the
//! matching archive. Every fetch comes in two forms: `try_fetch_*` returns
//! the [`ProviderError`], `fetch_*` logs it and returns `None`. A failed fetch
//! never writes to the archive.
//!
//! [`SignalFetcher::run`] executes a [`HarvestPlan`] sequentially with a
//! throttle delay between provider calls.

pub mod harvest;
pub mod labor;
pub mod market;
pub mod regulatory;
pub mod sampling;

mod error;
mod http;

pub use error::ProviderError;
pub use harvest::{HarvestOutcome, HarvestPlan, HarvestReport, HarvestStatus, Provider};

use std::time::Duration;

use lens_config::{HarvestConfig, ProvidersConfig};
use lens_store::SignalStore;

const USER_AGENT: &str = "founderlens/0.1";

/// HTTP client for the three signal providers, bound to one archive.
#[derive(Debug, Clone)]
pub struct SignalFetcher {
    http: reqwest::Client,
    providers: ProvidersConfig,
    harvest: HarvestConfig,
    store: SignalStore,
}

impl SignalFetcher {
    /// Build a fetcher. Every request is bounded by
    /// `providers.timeout_secs`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn new(
        providers: ProvidersConfig,
        harvest: HarvestConfig,
        store: SignalStore,
    ) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(providers.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            providers,
            harvest,
            store,
        })
    }

    /// The archive this fetcher appends to.
    #[must_use]
    pub const fn store(&self) -> &SignalStore {
        &self.store
    }

    #[must_use]
    pub const fn harvest_config(&self) -> &HarvestConfig {
        &self.harvest
    }
}

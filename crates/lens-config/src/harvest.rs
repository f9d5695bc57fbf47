//! Signal harvesting configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_signals_dir() -> PathBuf {
    PathBuf::from("research/data/signals")
}

fn default_symbol() -> String {
    String::from("QQQ")
}

fn default_ticker() -> String {
    String::from("MSFT")
}

fn default_cik() -> String {
    String::from("789019")
}

fn default_form_type() -> String {
    String::from("10-K")
}

fn default_section() -> String {
    String::from("1A")
}

fn default_labor_series() -> Vec<String> {
    vec![String::from("CUUR0000SA0")]
}

const fn default_start_year() -> u16 {
    2015
}

const fn default_end_year() -> u16 {
    2025
}

const fn default_throttle_secs() -> u64 {
    2
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HarvestConfig {
    /// Directory holding one JSON archive per signal domain.
    #[serde(default = "default_signals_dir")]
    pub signals_dir: PathBuf,

    /// Market proxy symbol (tech sector ETF).
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Ticker the regulatory archive is keyed by.
    #[serde(default = "default_ticker")]
    pub ticker: String,

    /// SEC central index key the ticker resolves to.
    #[serde(default = "default_cik")]
    pub cik: String,

    #[serde(default = "default_form_type")]
    pub form_type: String,

    /// Filing section to preview (Item 1A, risk factors).
    #[serde(default = "default_section")]
    pub section: String,

    /// BLS series ids. The first series is sampled.
    #[serde(default = "default_labor_series")]
    pub labor_series: Vec<String>,

    #[serde(default = "default_start_year")]
    pub start_year: u16,

    #[serde(default = "default_end_year")]
    pub end_year: u16,

    /// Delay between provider calls in a harvest run.
    #[serde(default = "default_throttle_secs")]
    pub throttle_secs: u64,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            signals_dir: default_signals_dir(),
            symbol: default_symbol(),
            ticker: default_ticker(),
            cik: default_cik(),
            form_type: default_form_type(),
            section: default_section(),
            labor_series: default_labor_series(),
            start_year: default_start_year(),
            end_year: default_end_year(),
            throttle_secs: default_throttle_secs(),
        }
    }
}

impl HarvestConfig {
    /// Check cross-field constraints figment cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::YearRange`] for an inverted year window,
    /// [`ConfigError::NoLaborSeries`] for an empty series list and
    /// [`ConfigError::BlankTarget`] for a symbol, ticker or CIK with no
    /// letters or digits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_year > self.end_year {
            return Err(ConfigError::YearRange {
                start: self.start_year,
                end: self.end_year,
            });
        }
        if self.labor_series.iter().all(|s| s.trim().is_empty()) {
            return Err(ConfigError::NoLaborSeries);
        }
        for (field, value) in [("symbol", &self.symbol), ("ticker", &self.ticker), ("cik", &self.cik)] {
            if !value.chars().any(|c| c.is_ascii_alphanumeric()) {
                return Err(ConfigError::BlankTarget { field });
            }
        }
        Ok(())
    }
}

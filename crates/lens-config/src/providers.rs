//! External data provider credentials and endpoints.

use serde::{Deserialize, Serialize};

fn default_alpha_vantage_url() -> String {
    String::from("https://www.alphavantage.co/query")
}

fn default_bls_url() -> String {
    String::from("https://api.bls.gov/publicAPI/v2/timeseries/data/")
}

fn default_sec_api_url() -> String {
    String::from("https://api.sec-api.io")
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProvidersConfig {
    /// Alpha Vantage API key.
    #[serde(default)]
    pub alpha_vantage_key: String,

    /// BLS public API registration key.
    #[serde(default)]
    pub bls_key: String,

    /// sec-api.io token (query and extractor APIs).
    #[serde(default)]
    pub sec_api_token: String,

    #[serde(default = "default_alpha_vantage_url")]
    pub alpha_vantage_url: String,

    #[serde(default = "default_bls_url")]
    pub bls_url: String,

    /// Base URL. The extractor lives at `{sec_api_url}/extractor`.
    #[serde(default = "default_sec_api_url")]
    pub sec_api_url: String,

    /// Per-request timeout for every provider call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            alpha_vantage_key: String::new(),
            bls_key: String::new(),
            sec_api_token: String::new(),
            alpha_vantage_url: default_alpha_vantage_url(),
            bls_url: default_bls_url(),
            sec_api_url: default_sec_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProvidersConfig {
    #[must_use]
    pub fn alpha_vantage_configured(&self) -> bool {
        !self.alpha_vantage_key.trim().is_empty()
    }

    #[must_use]
    pub fn bls_configured(&self) -> bool {
        !self.bls_key.trim().is_empty()
    }

    #[must_use]
    pub fn sec_api_configured(&self) -> bool {
        !self.sec_api_token.trim().is_empty()
    }

    /// At least one provider has a credential.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.alpha_vantage_configured() || self.bls_configured() || self.sec_api_configured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = ProvidersConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.sec_api_url, "https://api.sec-api.io");
    }

    #[test]
    fn whitespace_key_is_not_configured() {
        let config = ProvidersConfig {
            bls_key: "   ".into(),
            ..Default::default()
        };
        assert!(!config.bls_configured());
    }

    #[test]
    fn single_key_configures_that_provider_only() {
        let config = ProvidersConfig {
            alpha_vantage_key: "demo".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
        assert!(config.alpha_vantage_configured());
        assert!(!config.bls_configured());
        assert!(!config.sec_api_configured());
    }
}

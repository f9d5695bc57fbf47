//! # lens-config
//!
//! Layered configuration loading for FounderLens using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LENS_*` prefix, `__` as separator)
//! 2. Project-level `.founderlens/config.toml`
//! 3. User-level `~/.config/founderlens/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LENS_PROVIDERS__BLS_KEY` -> `providers.bls_key`,
//! `LENS_HARVEST__SIGNALS_DIR` -> `harvest.signals_dir`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use lens_config::LensConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = LensConfig::load_with_dotenv().expect("config");
//!
//! if config.providers.bls_configured() {
//!     println!("BLS series: {:?}", config.harvest.labor_series);
//! }
//! ```

mod dataset;
mod error;
mod harvest;
mod providers;
mod scoring;

pub use dataset::DatasetConfig;
pub use error::ConfigError;
pub use harvest::HarvestConfig;
pub use providers::ProvidersConfig;
pub use scoring::ScoringConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LensConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub harvest: HarvestConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl LensConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed, or the
    /// [`HarvestConfig::validate`] error if cross-field checks fail.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.harvest.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` to load the `.env` file from the workspace root before
    /// building the figment. This is the typical entry point for the CLI.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".founderlens/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("LENS_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("founderlens").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

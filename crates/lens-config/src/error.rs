//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or `LENS_*` variable could not be read into the config.
    #[error("failed to load FounderLens configuration: {0}")]
    Figment(#[from] figment::Error),

    #[error("harvest.start_year {start} is after harvest.end_year {end}")]
    YearRange { start: u16, end: u16 },

    #[error("harvest.labor_series needs at least one series id")]
    NoLaborSeries,

    /// A harvest target has no letters or digits (`harvest.symbol`,
    /// `harvest.ticker` or `harvest.cik`).
    #[error("harvest.{field} is blank")]
    BlankTarget { field: &'static str },
}

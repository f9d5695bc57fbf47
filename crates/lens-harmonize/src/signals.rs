//! Readers for the latest archived signal values.
//!
//! An empty archive yields the absence default, never an error.

use lens_core::{SignalDomain, SignalEntry};
use lens_store::{SignalStore, StoreError};

pub const DEFAULT_SENTIMENT_INDEX: f64 = 1.0;
pub const DEFAULT_TECH_SALARY_USD: f64 = 100_000.0;
pub const DEFAULT_TRANSPARENCY_SCORE: f64 = 50.0;

/// Latest market sentiment.
///
/// Prefers an explicit `sentiment_index`, then the close/open ratio of the
/// sampled daily bar when it is finite.
///
/// # Errors
///
/// Returns [`StoreError`] if the archive exists but cannot be read.
pub fn market_sentiment(store: &SignalStore) -> Result<f64, StoreError> {
    let latest = store.latest(&SignalDomain::Market)?;
    Ok(latest
        .as_ref()
        .and_then(sentiment_from_entry)
        .unwrap_or(DEFAULT_SENTIMENT_INDEX))
}

/// Latest average tech salary in USD. Non-positive values fall back to the
/// default so the burn ratio never divides by zero.
///
/// # Errors
///
/// Returns [`StoreError`] if the archive exists but cannot be read.
pub fn tech_salary(store: &SignalStore) -> Result<f64, StoreError> {
    let latest = store.latest(&SignalDomain::Labor)?;
    Ok(latest
        .and_then(|e| e.payload_number("avg_tech_salary_usd"))
        .filter(|s| *s > 0.0)
        .unwrap_or(DEFAULT_TECH_SALARY_USD))
}

/// Latest regulatory transparency score for `ticker`.
///
/// # Errors
///
/// Returns [`StoreError`] if the archive exists but cannot be read.
pub fn transparency(store: &SignalStore, ticker: &str) -> Result<f64, StoreError> {
    let latest = store.latest(&SignalDomain::regulatory(ticker))?;
    Ok(latest
        .and_then(|e| e.payload_number("transparency_score"))
        .unwrap_or(DEFAULT_TRANSPARENCY_SCORE))
}

fn sentiment_from_entry(entry: &SignalEntry) -> Option<f64> {
    entry.payload_number("sentiment_index").or_else(|| {
        let open = entry.payload_number("1. open").filter(|o| *o > 0.0)?;
        let close = entry.payload_number("4. close")?;
        Some(close / open).filter(|ratio| ratio.is_finite())
    })
}

/// Total funding over average tech salary.
///
/// A salary small enough to overflow the ratio (a subnormal value in the
/// archive) is treated like a missing one.
#[must_use]
pub fn burn_efficiency(total_funding_usd: f64, salary: f64) -> f64 {
    let ratio = total_funding_usd / salary;
    if ratio.is_finite() {
        ratio
    } else {
        total_funding_usd / DEFAULT_TECH_SALARY_USD
    }
}

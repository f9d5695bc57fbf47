//! Signal archive types.
//!
//! Every harvested observation is stored as a `SignalEntry` inside a JSON
//! array file, one file per [`SignalDomain`]. The on-disk keys are
//! `captured_at`, `simulation_metadata` and `data`.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::CoreError;

/// Free-form mapping describing sampling conditions or raw provider fields.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// SignalDomain
// ---------------------------------------------------------------------------

/// Partition key of the signal archive.
///
/// Regulatory forensics are archived per ticker; market and labor signals
/// each have a single archive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignalDomain {
    Market,
    Labor,
    Regulatory { ticker: String },
}

impl SignalDomain {
    /// Build a regulatory domain for `ticker`.
    ///
    /// The ticker is upper-cased and stripped of anything that is not an
    /// ASCII alphanumeric, `.` or `-`, so it is always safe as a file name
    /// component.
    #[must_use]
    pub fn regulatory(ticker: &str) -> Self {
        let ticker = ticker
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'))
            .collect::<String>()
            .to_ascii_uppercase();
        Self::Regulatory { ticker }
    }

    /// Like [`Self::regulatory`], but rejects tickers that sanitize to
    /// nothing useful (`"  "`, `"///"`, `"..."`), which would otherwise all
    /// share one archive file.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTicker`] when no ASCII letter or digit
    /// survives sanitizing.
    pub fn try_regulatory(ticker: &str) -> Result<Self, CoreError> {
        let domain = Self::regulatory(ticker);
        if domain
            .ticker()
            .is_some_and(|t| t.chars().any(|c| c.is_ascii_alphanumeric()))
        {
            Ok(domain)
        } else {
            Err(CoreError::InvalidTicker(ticker.to_string()))
        }
    }

    /// Archive file name for this domain.
    #[must_use]
    pub fn file_name(&self) -> String {
        match self {
            Self::Market => String::from("market_momentum.json"),
            Self::Labor => String::from("labor_benchmarks.json"),
            Self::Regulatory { ticker } => format!("sec_forensics_{ticker}.json"),
        }
    }

    /// The sanitized ticker of a regulatory domain.
    #[must_use]
    pub fn ticker(&self) -> Option<&str> {
        match self {
            Self::Regulatory { ticker } => Some(ticker),
            Self::Market | Self::Labor => None,
        }
    }

    /// Short label used in logs and CLI output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Labor => "labor",
            Self::Regulatory { .. } => "regulatory",
        }
    }
}

impl fmt::Display for SignalDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regulatory { ticker } => write!(f, "regulatory:{ticker}"),
            other => f.write_str(other.kind()),
        }
    }
}

// ---------------------------------------------------------------------------
// SignalEntry
// ---------------------------------------------------------------------------

/// One archived observation. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SignalEntry {
    /// Archive-assigned capture time. Non-decreasing within a file.
    #[serde(deserialize_with = "deserialize_captured_at")]
    #[schemars(with = "DateTime<Utc>")]
    pub captured_at: DateTime<Utc>,

    /// Sampling conditions (sampled date, period, series id).
    #[serde(rename = "simulation_metadata", default)]
    pub source_metadata: Option<Metadata>,

    /// Raw provider fields.
    #[serde(rename = "data")]
    pub payload: Metadata,
}

impl SignalEntry {
    /// Read a numeric payload field, accepting numbers and numeric strings.
    ///
    /// Providers are inconsistent here: Alpha Vantage and BLS send prices as
    /// strings, derived fields are written as JSON numbers.
    #[must_use]
    pub fn payload_number(&self, key: &str) -> Option<f64> {
        let value = self.payload.get(key)?;
        let number = match value {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        number.is_finite().then_some(number)
    }
}

/// Accept RFC 3339 timestamps and naive ISO 8601 timestamps (read as UTC).
///
/// Older archives were written with local naive timestamps such as
/// `2026-02-08T12:00:00.123456`.
fn deserialize_captured_at<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

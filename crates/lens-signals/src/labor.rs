//! BLS labor and price index benchmarks.

use lens_core::{Metadata, SignalDomain, SignalEntry};
use rand::Rng;
use serde::Serialize;
use serde_json::Value;

use crate::error::ProviderError;
use crate::http::read_json;
use crate::sampling::pick;
use crate::SignalFetcher;

/// Body of the BLS v2 timeseries POST.
#[derive(Debug, Serialize)]
struct SeriesRequest<'a> {
    seriesid: &'a [String],
    startyear: String,
    endyear: String,
    registrationkey: &'a str,
}

/// One sampled period.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LaborSample {
    /// `YYYY-Mnn`, e.g. `2019-M07`.
    pub period: String,
    pub series_id: String,
    pub observation: Metadata,
}

/// Sample one period from the first series of a successful BLS response body.
pub(crate) fn sample_series<R>(body: &Value, rng: &mut R) -> Result<LaborSample, ProviderError>
where
    R: Rng + ?Sized,
{
    let series = body
        .pointer("/Results/series/0")
        .ok_or_else(|| ProviderError::Parse("response has no series".into()))?;
    let series_id = series
        .get("seriesID")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let data = series
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::Parse(format!("series {series_id} has no data")))?;

    let observation = pick(data, rng)
        .and_then(Value::as_object)
        .cloned()
        .ok_or_else(|| ProviderError::EmptySeries(series_id.clone()))?;

    let year = observation.get("year").and_then(Value::as_str).unwrap_or_default();
    let period = observation.get("period").and_then(Value::as_str).unwrap_or_default();

    Ok(LaborSample {
        period: format!("{year}-{period}"),
        series_id,
        observation,
    })
}

impl SignalFetcher {
    /// Fetch the configured year window of the labor series and archive one
    /// random period.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the registration key is missing, the
    /// request fails, BLS refuses the request, or the archive write fails.
    pub async fn try_fetch_labor_signal(&self) -> Result<SignalEntry, ProviderError> {
        if !self.providers.bls_configured() {
            return Err(ProviderError::MissingCredential("bls"));
        }

        let request = SeriesRequest {
            seriesid: &self.harvest.labor_series,
            startyear: self.harvest.start_year.to_string(),
            endyear: self.harvest.end_year.to_string(),
            registrationkey: &self.providers.bls_key,
        };
        tracing::debug!(
            series = ?self.harvest.labor_series,
            start = self.harvest.start_year,
            end = self.harvest.end_year,
            "requesting labor series window"
        );

        let resp = self
            .http
            .post(&self.providers.bls_url)
            .json(&request)
            .send()
            .await?;
        let body = read_json(resp).await?;
        let sample = sample_series(&body, &mut rand::rng())?;

        let mut metadata = Metadata::new();
        metadata.insert("source_period".into(), Value::String(sample.period));
        metadata.insert("series_id".into(), Value::String(sample.series_id));

        Ok(self
            .store
            .append(&SignalDomain::Labor, sample.observation, Some(metadata))?)
    }

    /// Best-effort variant of [`Self::try_fetch_labor_signal`].
    pub async fn fetch_labor_signal(&self) -> Option<SignalEntry> {
        self.try_fetch_labor_signal()
            .await
            .inspect_err(|e| tracing::warn!(provider = "bls", %e, "labor signal skipped"))
            .ok()
    }
}

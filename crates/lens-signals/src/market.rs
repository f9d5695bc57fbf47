//! Alpha Vantage market momentum.
//!
//! Pulls the full `TIME_SERIES_DAILY` history for a symbol and archives one
//! uniformly sampled trading day. In-body throttling notices are rejected by
//! `http::read_json` before sampling.

use lens_core::{Metadata, SignalDomain, SignalEntry};
use rand::Rng;
use serde_json::Value;

use crate::error::ProviderError;
use crate::http::read_json;
use crate::sampling::pick;
use crate::SignalFetcher;

const SERIES_KEY: &str = "Time Series (Daily)";

/// One sampled trading day.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MarketSample {
    pub date: String,
    pub bar: Metadata,
}

/// Sample one day from a `TIME_SERIES_DAILY` response body.
pub(crate) fn sample_daily_series<R>(body: &Value, rng: &mut R) -> Result<MarketSample, ProviderError>
where
    R: Rng + ?Sized,
{
    let series = body
        .get(SERIES_KEY)
        .and_then(Value::as_object)
        .ok_or_else(|| {
            let keys = body
                .as_object()
                .map(|m| m.keys().cloned().collect::<Vec<_>>().join(", "))
                .unwrap_or_default();
            ProviderError::Parse(format!("missing '{SERIES_KEY}' (keys: {keys})"))
        })?;

    let dates: Vec<&String> = series.keys().collect();
    let date = *pick(&dates, rng).ok_or_else(|| ProviderError::EmptySeries(SERIES_KEY.into()))?;
    let bar = series
        .get(date)
        .and_then(Value::as_object)
        .cloned()
        .ok_or_else(|| ProviderError::Parse(format!("bar for {date} is not an object")))?;

    Ok(MarketSample {
        date: date.clone(),
        bar,
    })
}

impl SignalFetcher {
    /// Fetch full daily history for `symbol`, archive one random day.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the key is missing, the request fails,
    /// the provider throttles, or the archive write fails. Nothing is
    /// written on error.
    pub async fn try_fetch_market_signal(&self, symbol: &str) -> Result<SignalEntry, ProviderError> {
        if !self.providers.alpha_vantage_configured() {
            return Err(ProviderError::MissingCredential("alpha_vantage"));
        }

        let url = format!(
            "{}?function=TIME_SERIES_DAILY&symbol={}&outputsize=full&apikey={}",
            self.providers.alpha_vantage_url,
            urlencoding::encode(symbol),
            urlencoding::encode(&self.providers.alpha_vantage_key),
        );
        tracing::debug!(symbol, "requesting full daily history");

        let resp = self.http.get(&url).send().await?;
        let body = read_json(resp).await?;
        let sample = sample_daily_series(&body, &mut rand::rng())?;

        let mut metadata = Metadata::new();
        metadata.insert("source_date".into(), Value::String(sample.date));
        metadata.insert("type".into(), Value::from("historical_random_sample"));
        metadata.insert("symbol".into(), Value::from(symbol));

        Ok(self
            .store
            .append(&SignalDomain::Market, sample.bar, Some(metadata))?)
    }

    /// Best-effort variant of [`Self::try_fetch_market_signal`]: failures are
    /// logged and yield `None`.
    pub async fn fetch_market_signal(&self, symbol: &str) -> Option<SignalEntry> {
        self.try_fetch_market_signal(symbol)
            .await
            .inspect_err(|e| tracing::warn!(provider = "alpha_vantage", symbol, %e, "market signal skipped"))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    const FIXTURE: &str = r#"{
        "Meta Data": {
            "1. Information": "Daily Prices (open, high, low, close) and Volumes",
            "2. Symbol": "QQQ",
            "3. Last Refreshed": "2026-02-06",
            "4. Output Size": "Full size",
            "5. Time Zone": "US/Eastern"
        },
        "Time Series (Daily)": {
            "2026-02-06": {
                "1. open": "520.1000",
                "2. high": "526.8800",
                "3. low": "519.0200",
                "4. close": "525.4100",
                "5. volume": "41223100"
            },
            "2011-03-14": {
                "1. open": "55.9100",
                "2. high": "56.2000",
                "3. low": "55.3100",
                "4. close": "55.8800",
                "5. volume": "61232300"
            }
        }
    }"#;

    #[test]
    fn samples_a_day_from_the_series() {
        let body: Value = serde_json::from_str(FIXTURE).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let sample = sample_daily_series(&body, &mut rng).unwrap();

        assert!(["2026-02-06", "2011-03-14"].contains(&sample.date.as_str()));
        assert_eq!(sample.bar.len(), 5);
        assert!(sample.bar.contains_key("4. close"));
    }

    #[test]
    fn sampled_bar_matches_its_date() {
        let body: Value = serde_json::from_str(FIXTURE).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..10 {
            let sample = sample_daily_series(&body, &mut rng).unwrap();
            let expected = &body[SERIES_KEY][&sample.date];
            assert_eq!(&Value::Object(sample.bar), expected);
        }
    }

    #[test]
    fn missing_series_lists_keys() {
        let body = json!({"Meta Data": {}});
        let err = sample_daily_series(&body, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(err.to_string().contains("Meta Data"));
    }

    #[test]
    fn empty_series_is_reported() {
        let body = json!({"Time Series (Daily)": {}});
        let err = sample_daily_series(&body, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, ProviderError::EmptySeries(_)));
    }
}

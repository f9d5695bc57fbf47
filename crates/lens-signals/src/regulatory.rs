//! SEC filing forensics via sec-api.io.
//!
//! Two calls: a full-text query resolving the configured CIK and form type to
//! the most recent filing, then the extractor API for one narrative section
//! of that filing. Only a bounded preview of the section is archived.

use chrono::{DateTime, FixedOffset};
use lens_core::{Metadata, SignalDomain, SignalEntry};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::ProviderError;
use crate::http::check_status;
use crate::SignalFetcher;

/// Characters of section text kept in the archived preview.
pub const PREVIEW_CHARS: usize = 500;

const TRUNCATION_MARKER: &str = "...";

#[derive(Debug, Serialize)]
struct FilingQuery {
    query: String,
    from: &'static str,
    size: &'static str,
    sort: Value,
}

#[derive(Debug, Deserialize)]
struct FilingQueryResponse {
    #[serde(default)]
    filings: Vec<Filing>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Filing {
    pub link_to_filing_html: String,
    pub filed_at: String,
}

impl Filing {
    fn filed_at_parsed(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.filed_at).ok()
    }
}

/// The most recent filing. Unparseable dates rank below any parseable one.
pub(crate) fn most_recent(filings: Vec<Filing>) -> Option<Filing> {
    filings
        .into_iter()
        .max_by_key(|f| f.filed_at_parsed())
}

/// First [`PREVIEW_CHARS`] characters of `text` followed by the truncation
/// marker. Counts characters, not bytes.
pub(crate) fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(PREVIEW_CHARS).collect();
    out.push_str(TRUNCATION_MARKER);
    out
}

impl SignalFetcher {
    /// Archive a risk-section preview of the newest filing under `ticker`.
    ///
    /// The filing is resolved by the configured CIK and form type; `ticker`
    /// only names the archive.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidTicker`] before any request if `ticker`
    /// has no letters or digits. Otherwise returns [`ProviderError`] if the
    /// token is missing, either call fails, no filing matches, or the archive
    /// write fails.
    pub async fn try_fetch_regulatory_signal(&self, ticker: &str) -> Result<SignalEntry, ProviderError> {
        let domain = SignalDomain::try_regulatory(ticker)?;
        let ticker = domain.ticker().unwrap_or_default().to_string();
        if !self.providers.sec_api_configured() {
            return Err(ProviderError::MissingCredential("sec_api"));
        }

        let filing = self.search_latest_filing().await?;
        tracing::debug!(%ticker, filing = %filing.link_to_filing_html, "extracting section");
        let section_text = self.extract_section(&filing.link_to_filing_html).await?;

        let mut payload = Metadata::new();
        payload.insert("ticker".into(), Value::String(ticker));
        payload.insert("risk_factors_preview".into(), Value::String(preview(&section_text)));
        payload.insert("filed_at".into(), Value::String(filing.filed_at));
        payload.insert("source".into(), Value::String(filing.link_to_filing_html));

        let mut metadata = Metadata::new();
        metadata.insert("cik".into(), Value::from(self.harvest.cik.as_str()));
        metadata.insert("form_type".into(), Value::from(self.harvest.form_type.as_str()));
        metadata.insert("section".into(), Value::from(self.harvest.section.as_str()));

        Ok(self.store.append(&domain, payload, Some(metadata))?)
    }

    /// Best-effort variant of [`Self::try_fetch_regulatory_signal`].
    pub async fn fetch_regulatory_signal(&self, ticker: &str) -> Option<SignalEntry> {
        self.try_fetch_regulatory_signal(ticker)
            .await
            .inspect_err(|e| tracing::warn!(provider = "sec_api", ticker, %e, "regulatory signal skipped"))
            .ok()
    }

    async fn search_latest_filing(&self) -> Result<Filing, ProviderError> {
        let url = format!(
            "{}?token={}",
            self.providers.sec_api_url.trim_end_matches('/'),
            urlencoding::encode(&self.providers.sec_api_token),
        );
        let query = FilingQuery {
            query: format!(
                "cik:{} AND formType:\"{}\"",
                self.harvest.cik, self.harvest.form_type
            ),
            from: "0",
            size: "1",
            sort: json!([{"filedAt": {"order": "desc"}}]),
        };

        let resp = self.http.post(&url).json(&query).send().await?;
        let body: FilingQueryResponse = check_status(resp)
            .await?
            .json()
            .await?;

        most_recent(body.filings).ok_or_else(|| {
            ProviderError::NoFilings(format!(
                "cik {} form {}",
                self.harvest.cik, self.harvest.form_type
            ))
        })
    }

    async fn extract_section(&self, filing_url: &str) -> Result<String, ProviderError> {
        let url = format!(
            "{}/extractor?url={}&item={}&type=text&token={}",
            self.providers.sec_api_url.trim_end_matches('/'),
            urlencoding::encode(filing_url),
            urlencoding::encode(&self.harvest.section),
            urlencoding::encode(&self.providers.sec_api_token),
        );
        let resp = self.http.get(&url).send().await?;
        Ok(check_status(resp).await?.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filing(link: &str, filed_at: &str) -> Filing {
        Filing {
            link_to_filing_html: link.into(),
            filed_at: filed_at.into(),
        }
    }

    #[test]
    fn preview_truncates_to_limit_with_marker() {
        let text = "x".repeat(2_000);
        let out = preview(&text);
        assert_eq!(out.chars().count(), PREVIEW_CHARS + TRUNCATION_MARKER.len());
        assert!(out.ends_with("..."));
    }

    #[test]
    fn preview_of_short_text_still_gets_marker() {
        assert_eq!(preview("Item 1A. Risk Factors"), "Item 1A. Risk Factors...");
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let text = "é".repeat(600);
        let out = preview(&text);
        assert_eq!(out.chars().filter(|c| *c == 'é').count(), PREVIEW_CHARS);
    }

    #[test]
    fn most_recent_compares_instants_across_offsets() {
        let picked = most_recent(vec![
            filing("a", "2024-07-30T16:06:13-04:00"),
            filing("b", "2025-07-30T16:06:13-04:00"),
            filing("c", "2025-07-30T21:00:00+00:00"),
        ])
        .unwrap();
        assert_eq!(picked.link_to_filing_html, "c");
    }

    #[test]
    fn unparseable_dates_rank_last() {
        let picked = most_recent(vec![
            filing("bad", "yesterday"),
            filing("good", "2019-08-01T16:00:00-04:00"),
        ])
        .unwrap();
        assert_eq!(picked.link_to_filing_html, "good");
    }

    #[test]
    fn no_filings_yields_none() {
        assert!(most_recent(Vec::new()).is_none());
    }

    #[test]
    fn query_response_parses_sec_api_shape() {
        let body = r#"{
            "total": {"value": 1, "relation": "eq"},
            "query": {"from": 0, "size": 1},
            "filings": [{
                "id": "f1",
                "accessionNo": "0000950170-25-100235",
                "cik": "789019",
                "ticker": "MSFT",
                "formType": "10-K",
                "filedAt": "2025-07-30T16:06:13-04:00",
                "linkToFilingHtml": "https://www.sec.gov/Archives/edgar/data/789019/000095017025100235/msft-20250630.htm"
            }]
        }"#;
        let parsed: FilingQueryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.filings.len(), 1);
        assert_eq!(parsed.filings[0].filed_at, "2025-07-30T16:06:13-04:00");
    }

    #[test]
    fn query_response_without_filings_is_empty() {
        let parsed: FilingQueryResponse = serde_json::from_str(r#"{"total": {"value": 0}}"#).unwrap();
        assert!(parsed.filings.is_empty());
    }
}

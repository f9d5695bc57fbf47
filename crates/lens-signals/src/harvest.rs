//! Batch harvest runs.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use lens_config::HarvestConfig;
use serde::Serialize;

use crate::SignalFetcher;

/// One of the three signal providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Market,
    Labor,
    Regulatory,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Market => "market",
            Self::Labor => "labor",
            Self::Regulatory => "regulatory",
        })
    }
}

/// Which fetches a run performs, in order: market, labor, regulatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestPlan {
    /// Market symbol to sample, if the market fetch runs.
    pub market: Option<String>,
    pub labor: bool,
    /// Ticker to archive forensics under, if the regulatory fetch runs.
    pub regulatory: Option<String>,
    /// Delay between consecutive provider calls.
    pub throttle: Duration,
}

impl HarvestPlan {
    /// All three fetches with the configured symbol, ticker and throttle.
    #[must_use]
    pub fn full(config: &HarvestConfig) -> Self {
        Self {
            market: Some(config.symbol.clone()),
            labor: true,
            regulatory: Some(config.ticker.clone()),
            throttle: Duration::from_secs(config.throttle_secs),
        }
    }

    /// A single fetch.
    #[must_use]
    pub fn only(provider: Provider, config: &HarvestConfig) -> Self {
        let full = Self::full(config);
        Self {
            market: full.market.filter(|_| provider == Provider::Market),
            labor: provider == Provider::Labor,
            regulatory: full.regulatory.filter(|_| provider == Provider::Regulatory),
            throttle: full.throttle,
        }
    }

    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        if self.market.is_some() {
            self.market = Some(symbol.into());
        }
        self
    }

    #[must_use]
    pub fn with_ticker(mut self, ticker: impl Into<String>) -> Self {
        if self.regulatory.is_some() {
            self.regulatory = Some(ticker.into());
        }
        self
    }

    /// Number of provider calls this plan makes.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.market.is_some()) + usize::from(self.labor) + usize::from(self.regulatory.is_some())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HarvestStatus {
    Captured { captured_at: DateTime<Utc> },
    Skipped { error: String },
}

/// Result of one provider call within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HarvestOutcome {
    pub provider: Provider,
    /// Symbol or ticker, when the provider takes one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(flatten)]
    pub status: HarvestStatus,
}

impl HarvestOutcome {
    #[must_use]
    pub const fn is_captured(&self) -> bool {
        matches!(self.status, HarvestStatus::Captured { .. })
    }
}

/// Per-provider outcomes of a run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HarvestReport {
    pub outcomes: Vec<HarvestOutcome>,
}

impl HarvestReport {
    #[must_use]
    pub fn captured(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_captured()).count()
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.captured()
    }
}

impl SignalFetcher {
    /// Run the planned fetches sequentially.
    ///
    /// A failing provider is recorded as skipped and the run continues. The
    /// throttle delay is applied between calls, never before the first or
    /// after the last.
    pub async fn run(&self, plan: &HarvestPlan) -> HarvestReport {
        let mut report = HarvestReport::default();
        tracing::info!(calls = plan.len(), throttle_ms = plan.throttle.as_millis(), "harvest started");

        if let Some(symbol) = &plan.market {
            let result = self.try_fetch_market_signal(symbol).await;
            report.push(Provider::Market, Some(symbol.clone()), result);
        }

        if plan.labor {
            throttle(plan, &report).await;
            let result = self.try_fetch_labor_signal().await;
            report.push(Provider::Labor, None, result);
        }

        if let Some(ticker) = &plan.regulatory {
            throttle(plan, &report).await;
            let result = self.try_fetch_regulatory_signal(ticker).await;
            report.push(Provider::Regulatory, Some(ticker.clone()), result);
        }

        tracing::info!(
            captured = report.captured(),
            skipped = report.skipped(),
            "harvest finished"
        );
        report
    }
}

/// Sleep for the plan's throttle unless this is the first call of the run.
async fn throttle(plan: &HarvestPlan, report: &HarvestReport) {
    if !report.outcomes.is_empty() && !plan.throttle.is_zero() {
        tokio::time::sleep(plan.throttle).await;
    }
}

impl HarvestReport {
    fn push(
        &mut self,
        provider: Provider,
        target: Option<String>,
        result: Result<lens_core::SignalEntry, crate::ProviderError>,
    ) {
        let status = match result {
            Ok(entry) => HarvestStatus::Captured {
                captured_at: entry.captured_at,
            },
            Err(e) => {
                tracing::warn!(%provider, target = target.as_deref(), %e, "provider skipped");
                HarvestStatus::Skipped {
                    error: e.to_string(),
                }
            }
        };
        self.outcomes.push(HarvestOutcome {
            provider,
            target,
            status,
        });
    }
}

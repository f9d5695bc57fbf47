use anyhow::Context;
use lens_config::LensConfig;
use lens_core::SignalDomain;
use lens_signals::{HarvestPlan, SignalFetcher};
use lens_store::SignalStore;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::HarvestArgs;
use crate::harvest_lock::HarvestLock;
use crate::output::output;

/// Handle `lens harvest`.
pub async fn handle(args: &HarvestArgs, config: LensConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let plan = plan_for(args, &config)?;

    let signals_dir = config.harvest.signals_dir.clone();
    let lock = HarvestLock::acquire(&signals_dir).await?;

    let store = SignalStore::open(&signals_dir)
        .with_context(|| format!("failed to open signal directory {}", signals_dir.display()))?;
    let fetcher = SignalFetcher::new(config.providers, config.harvest, store)
        .context("failed to build provider client")?;

    let report = fetcher.run(&plan).await;
    tracing::debug!(lock = %lock.path().display(), "releasing harvest lock");
    drop(lock);

    output(&report, flags.format)
}

/// The configured plan narrowed by `--only` and overridden by `--symbol` /
/// `--ticker`.
fn plan_for(args: &HarvestArgs, config: &LensConfig) -> anyhow::Result<HarvestPlan> {
    let mut plan = args.only.map_or_else(
        || HarvestPlan::full(&config.harvest),
        |only| HarvestPlan::only(only.into(), &config.harvest),
    );
    if let Some(symbol) = &args.symbol {
        anyhow::ensure!(
            symbol.chars().any(|c| c.is_ascii_alphanumeric()),
            "--symbol '{symbol}' has no letters or digits"
        );
        plan = plan.with_symbol(symbol.trim());
    }
    if let Some(ticker) = &args.ticker {
        SignalDomain::try_regulatory(ticker)?;
        plan = plan.with_ticker(ticker.trim());
    }
    Ok(plan)
}

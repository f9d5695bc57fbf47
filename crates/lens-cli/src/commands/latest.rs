use lens_config::LensConfig;
use lens_core::SignalDomain;
use lens_store::SignalStore;

use crate::cli::root_commands::LatestArgs;
use crate::cli::{GlobalFlags, ProviderArg};
use crate::output::output;

/// Handle `lens latest`. Prints `null` for an empty archive.
pub fn handle(args: &LatestArgs, config: &LensConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let domain = match args.domain {
        ProviderArg::Market => SignalDomain::Market,
        ProviderArg::Labor => SignalDomain::Labor,
        ProviderArg::Regulatory => {
            SignalDomain::try_regulatory(args.ticker.as_deref().unwrap_or(&config.harvest.ticker))?
        }
    };

    let store = SignalStore::reader(config.harvest.signals_dir.clone());
    let latest = store.latest(&domain)?;
    output(&latest, flags.format)
}

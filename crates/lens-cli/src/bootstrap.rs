use std::io::Read;
use std::path::Path;

use anyhow::Context;
use lens_config::LensConfig;

/// Load `.env`, then layered configuration.
pub fn load_config() -> anyhow::Result<LensConfig> {
    let config = LensConfig::load_with_dotenv().context("failed to load founderlens configuration")?;
    warn_unconfigured(&config);
    Ok(config)
}

fn warn_unconfigured(config: &LensConfig) {
    if !config.providers.is_configured() {
        tracing::debug!("no provider credentials configured; harvests will skip every provider");
    }
    if !config.scoring.is_configured() {
        tracing::debug!("scoring.model_command is not set; audits will fail");
    }
}

/// Request JSON from `file`, or stdin when `None`.
pub fn read_request(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read request file {}", path.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read request from stdin")?;
            Ok(raw)
        }
    }
}

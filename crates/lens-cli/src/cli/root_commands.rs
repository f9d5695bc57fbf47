use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use lens_signals::Provider;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Pull market, labor and regulatory signals into the archive.
    Harvest(HarvestArgs),
    /// Show the most recent archived signal for a domain.
    Latest(LatestArgs),
    /// Build a feature vector without scoring it.
    Features {
        #[command(subcommand)]
        action: FeaturesCommands,
    },
    /// Score a startup idea or a known company.
    Audit(AuditArgs),
    /// Print a JSON Schema, or list the available schemas.
    Schema(SchemaArgs),
}

/// Signal provider selector.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ProviderArg {
    Market,
    Labor,
    Regulatory,
}

impl From<ProviderArg> for Provider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Market => Self::Market,
            ProviderArg::Labor => Self::Labor,
            ProviderArg::Regulatory => Self::Regulatory,
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct HarvestArgs {
    /// Run a single provider instead of all three.
    #[arg(long, value_enum)]
    pub only: Option<ProviderArg>,

    /// Market symbol (overrides harvest.symbol).
    #[arg(long)]
    pub symbol: Option<String>,

    /// Ticker to archive forensics under (overrides harvest.ticker).
    #[arg(long)]
    pub ticker: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct LatestArgs {
    #[arg(value_enum)]
    pub domain: ProviderArg,

    /// Ticker for the regulatory domain (defaults to harvest.ticker).
    #[arg(long)]
    pub ticker: Option<String>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum FeaturesCommands {
    /// Company-grounded features from the reference dataset.
    Company {
        /// Company name (case-insensitive).
        name: String,
    },
    /// Input-grounded features from an audit request.
    Input {
        /// Request JSON file. Reads stdin when omitted.
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    /// Request JSON file. Reads stdin when neither this nor --company is set.
    #[arg(long, conflicts_with = "company")]
    pub file: Option<PathBuf>,

    /// Audit a company from the reference dataset instead of a request.
    #[arg(long)]
    pub company: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name, e.g. `audit_request`. Lists names when omitted.
    pub name: Option<String>,
}

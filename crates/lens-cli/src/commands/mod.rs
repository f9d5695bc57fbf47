pub mod audit;
pub mod features;
pub mod harvest;
pub mod latest;
pub mod schema;

use lens_config::LensConfig;

use crate::cli::{Commands, GlobalFlags};

/// Route a parsed command to its handler.
pub async fn dispatch(command: Commands, config: LensConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Harvest(args) => harvest::handle(&args, config, flags).await,
        Commands::Latest(args) => latest::handle(&args, &config, flags),
        Commands::Features { action } => features::handle(&action, &config, flags),
        Commands::Audit(args) => audit::handle(&args, &config, flags).await,
        Commands::Schema(args) => schema::handle(&args, flags),
    }
}

use lens_config::LensConfig;
use lens_core::{AuditInput, FeatureVector};
use lens_harmonize::FeatureHarmonizer;
use lens_schema::SchemaRegistry;

use crate::bootstrap::read_request;
use crate::cli::{FeaturesCommands, GlobalFlags};
use crate::output::output;

/// Handle `lens features company|input`.
pub fn handle(action: &FeaturesCommands, config: &LensConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let harmonizer = FeatureHarmonizer::from_config(config);

    let vector = match action {
        FeaturesCommands::Company { name } => {
            FeatureVector::Company(harmonizer.build_features_for_company(name)?)
        }
        FeaturesCommands::Input { file } => {
            let raw = read_request(file.as_deref())?;
            let request = lens_schema::parse_audit_request(&SchemaRegistry::new(), &raw)?;
            let input = AuditInput::try_from(request)?;
            FeatureVector::Input(harmonizer.build_features_for_input(&input))
        }
    };

    output(&vector, flags.format)
}

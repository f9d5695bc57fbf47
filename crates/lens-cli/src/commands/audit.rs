use lens_config::LensConfig;
use lens_harmonize::FeatureHarmonizer;
use lens_schema::SchemaRegistry;
use lens_scoring::{AuditService, ProcessModel, ScoreMapper};

use crate::bootstrap::read_request;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::AuditArgs;
use crate::output::output;

/// Handle `lens audit`.
pub async fn handle(args: &AuditArgs, config: &LensConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let service = AuditService::new(
        FeatureHarmonizer::from_config(config),
        ProcessModel::from_config(&config.scoring),
        ScoreMapper::from_config(&config.scoring),
    );

    let response = if let Some(company) = &args.company {
        service.audit_company(company).await?
    } else {
        let raw = read_request(args.file.as_deref())?;
        let request = lens_schema::parse_audit_request(&SchemaRegistry::new(), &raw)?;
        service.audit(request).await?
    };

    output(&response, flags.format)
}

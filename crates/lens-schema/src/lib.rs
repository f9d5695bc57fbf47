//! # lens-schema
//!
//! JSON Schema generation, validation, and registry for FounderLens.
//!
//! This crate provides:
//! - `SchemaRegistry`: central store of the JSON Schemas for wire and archive types
//! - Boundary validation of inbound audit requests (`parse_audit_request`)
//! - Schema export for external tooling (`lens schema` command)
//!
//! Types are defined in `lens-core` with `#[derive(JsonSchema)]`. This crate
//! imports those types and provides the registry and validation layer.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;

use lens_core::AuditRequest;

/// Validate raw request JSON against the `audit_request` schema, then
/// deserialize it.
///
/// Non-numeric `monthlyBurn`/`targetCAC` and missing fields are rejected
/// here, before any harmonization runs. Range checks live in
/// `AuditInput::try_from`.
///
/// # Errors
///
/// Returns [`SchemaError::Malformed`] for unparseable JSON and
/// [`SchemaError::ValidationFailed`] for schema violations.
pub fn parse_audit_request(
    registry: &SchemaRegistry,
    raw: &str,
) -> Result<AuditRequest, SchemaError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    registry.validate("audit_request", &value)?;
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_valid_request() {
        let registry = SchemaRegistry::new();
        let raw = r#"{
            "projectName": "Gnomes",
            "elevatorPitch": "ten simple words here for a short pitch test case",
            "assumptions": ["a", "b"],
            "monthlyBurn": 10000,
            "targetCAC": 50
        }"#;

        let request = parse_audit_request(&registry, raw).unwrap();
        assert_eq!(request.project_name, "Gnomes");
        assert_eq!(request.assumptions, vec!["a", "b"]);
    }

    #[test]
    fn rejects_non_numeric_burn() {
        let registry = SchemaRegistry::new();
        let raw = r#"{
            "projectName": "Gnomes",
            "elevatorPitch": "pitch",
            "assumptions": [],
            "monthlyBurn": "a lot",
            "targetCAC": 50
        }"#;

        let err = parse_audit_request(&registry, raw).unwrap_err();
        assert!(matches!(err, SchemaError::ValidationFailed { .. }));
    }

    #[test]
    fn rejects_missing_field() {
        let registry = SchemaRegistry::new();
        let raw = r#"{"projectName":"Gnomes","elevatorPitch":"pitch","assumptions":[],"monthlyBurn":1}"#;

        let err = parse_audit_request(&registry, raw).unwrap_err();
        match err {
            SchemaError::ValidationFailed { errors } => {
                assert!(errors.iter().any(|e| e.contains("targetCAC")), "{errors:?}");
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn rejects_truncated_json() {
        let registry = SchemaRegistry::new();
        let err = parse_audit_request(&registry, r#"{"projectName": "Gn"#).unwrap_err();
        assert!(matches!(err, SchemaError::Malformed(_)));
    }
}

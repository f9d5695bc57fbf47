//! Serde roundtrip and JsonSchema validation tests for wire and archive types.

use chrono::Utc;
use lens_core::*;
use schemars::schema_for;
use serde_json::json;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn payload(value: serde_json::Value) -> Metadata {
    value.as_object().cloned().unwrap_or_default()
}

roundtrip_and_validate!(
    market_entry_roundtrip,
    SignalEntry,
    SignalEntry {
        captured_at: Utc::now(),
        source_metadata: Some(payload(json!({
            "source_date": "2011-03-14",
            "type": "historical_random_sample"
        }))),
        payload: payload(json!({
            "1. open": "53.9100",
            "2. high": "54.2000",
            "3. low": "53.6100",
            "4. close": "54.0800",
            "5. volume": "61232300"
        })),
    }
);

roundtrip_and_validate!(
    regulatory_entry_roundtrip,
    SignalEntry,
    SignalEntry {
        captured_at: Utc::now(),
        source_metadata: None,
        payload: payload(json!({
            "ticker": "MSFT",
            "risk_factors_preview": "Our operations and financial results are subject...",
            "filed_at": "2025-07-30T16:06:27-04:00",
            "source": "https://www.sec.gov/Archives/edgar/data/789019/0000950170-25-100235.htm"
        })),
    }
);

roundtrip_and_validate!(
    company_record_roundtrip,
    CompanyRecord,
    CompanyRecord {
        company_name: "Acme".into(),
        total_funding_usd: 2_500_000.0,
        funding_rounds: 2,
        founder_count: None,
        founding_year: 2019,
    }
);

roundtrip_and_validate!(
    audit_request_roundtrip,
    AuditRequest,
    AuditRequest {
        project_name: "Gnomes".into(),
        elevator_pitch: "ten simple words here for a short pitch test case".into(),
        assumptions: vec!["a".into(), "b".into()],
        monthly_burn: 10_000.0,
        target_cac: 50.0,
    }
);

roundtrip_and_validate!(
    audit_response_roundtrip,
    AuditResponse,
    AuditResponse {
        fragility_score: 0.73,
        risk_level: "Medium".into(),
        recommendation: "Validate the riskiest assumption first.".into(),
        chart_data: vec![10, 20, 35, 50, 45, 73],
    }
);

roundtrip_and_validate!(
    company_feature_vector_roundtrip,
    FeatureVector,
    FeatureVector::Company(CompanyFeatures {
        market_sentiment_index: 1.0,
        burn_efficiency_score: 25.0,
        sec_transparency_score: 50.0,
        total_funding_usd: 2_500_000.0,
        funding_rounds: 2,
        founder_count: 1,
        founding_year: 2019,
    })
);

roundtrip_and_validate!(
    input_feature_vector_roundtrip,
    FeatureVector,
    FeatureVector::Input(InputFeatures {
        burn_efficiency_score: 1.0,
        assumption_risk_score: 0.2,
        pitch_complexity_score: 0.1,
        estimated_runway_score: 0.005,
    })
);

roundtrip_and_validate!(
    model_output_roundtrip,
    ModelOutput,
    ModelOutput {
        viability_score: 0.61,
        confidence: "High".into(),
    }
);

roundtrip_and_validate!(
    regulatory_domain_roundtrip,
    SignalDomain,
    SignalDomain::regulatory("uber")
);

//! Input-grounded features. Pure arithmetic over a validated request.

use lens_core::{AuditInput, InputFeatures};

/// Build the four input features. Every value lies in `[0, 1]` for input
/// that passed validation (finite, non-negative amounts).
#[must_use]
pub fn build_features_for_input(input: &AuditInput) -> InputFeatures {
    let burn = input.monthly_burn();
    let cac = input.target_cac();

    InputFeatures {
        burn_efficiency_score: (burn / cac.max(1.0) / 100.0).min(1.0),
        assumption_risk_score: (count(input.assumptions().len()) * 0.1).min(1.0),
        pitch_complexity_score: (count(input.elevator_pitch().split_whitespace().count()) / 100.0)
            .min(1.0),
        estimated_runway_score: (cac / burn.max(1.0)).min(1.0),
    }
}

fn count(n: usize) -> f64 {
    f64::from(u32::try_from(n).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lens_core::AuditRequest;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn input(burn: f64, cac: f64, assumptions: usize, pitch_words: usize) -> AuditInput {
        AuditInput::try_from(AuditRequest {
            project_name: "Test".into(),
            elevator_pitch: vec!["word"; pitch_words].join(" "),
            assumptions: (0..assumptions).map(|i| format!("a{i}")).collect(),
            monthly_burn: burn,
            target_cac: cac,
        })
        .unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn reference_scenario() {
        let features = build_features_for_input(&input(10_000.0, 50.0, 2, 10));
        assert!(close(features.burn_efficiency_score, 1.0));
        assert!(close(features.assumption_risk_score, 0.2));
        assert!(close(features.pitch_complexity_score, 0.1));
        assert!(close(features.estimated_runway_score, 0.005));
    }

    #[test]
    fn zero_burn_does_not_divide_by_zero() {
        let features = build_features_for_input(&input(0.0, 40.0, 0, 0));
        assert_eq!(features.burn_efficiency_score, 0.0);
        assert_eq!(features.estimated_runway_score, 1.0);
        assert!(features.pitch_complexity_score.abs() < f64::EPSILON);
    }

    #[test]
    fn zero_cac_uses_floor_of_one() {
        let features = build_features_for_input(&input(50.0, 0.0, 0, 0));
        assert!(close(features.burn_efficiency_score, 0.5));
        assert_eq!(features.estimated_runway_score, 0.0);
    }

    #[rstest]
    #[case(0, 0.0)]
    #[case(1, 0.1)]
    #[case(5, 0.5)]
    #[case(10, 1.0)]
    #[case(25, 1.0)]
    fn assumption_risk_saturates(#[case] n: usize, #[case] expected: f64) {
        let features = build_features_for_input(&input(1.0, 1.0, n, 1));
        assert!(close(features.assumption_risk_score, expected), "{n} -> {}", features.assumption_risk_score);
    }

    #[test]
    fn assumption_risk_is_monotone() {
        let scores: Vec<f64> = (0..20)
            .map(|n| build_features_for_input(&input(1.0, 1.0, n, 1)).assumption_risk_score)
            .collect();
        assert!(scores.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn pitch_words_split_on_any_whitespace() {
        let request = AuditRequest {
            project_name: "Test".into(),
            elevator_pitch: "  uber\tfor\n\ndog   walkers ".into(),
            assumptions: vec![],
            monthly_burn: 1.0,
            target_cac: 1.0,
        };
        let features = build_features_for_input(&AuditInput::try_from(request).unwrap());
        assert!(close(features.pitch_complexity_score, 0.04));
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(1e12, 0.5)]
    #[case(0.5, 1e12)]
    #[case(12_345.0, 678.0)]
    #[case(1.0, 1.0)]
    fn every_feature_is_unit_bounded(#[case] burn: f64, #[case] cac: f64) {
        let features = build_features_for_input(&input(burn, cac, 40, 400));
        for value in [
            features.burn_efficiency_score,
            features.assumption_risk_score,
            features.pitch_complexity_score,
            features.estimated_runway_score,
        ] {
            assert!((0.0..=1.0).contains(&value), "{value} out of range");
        }
    }
}

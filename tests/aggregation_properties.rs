//! Property-based tests for the aggregation engine invariants.

use proptest::prelude::*;
use serde_json::json;

use leadgate::domain::models::{SignalBundle, SignalReport};
use leadgate::services::AggregationEngine;

/// Arbitrary-ish report: any score (the engine must clamp), plus optional
/// metadata drawn from the vocabulary the risk/bonus rules inspect.
fn arb_report() -> impl Strategy<Value = SignalReport> {
    (
        -2.0f64..3.0,
        prop::option::of(prop::sample::select(vec![
            "business", "personal", "disposable", "spammy", "bot", "invalid", "unknown", "voip",
            "mobile",
        ])),
        prop::option::of(any::<bool>()),
        prop::option::of(prop::sample::select(vec![
            "buying", "interested", "spam", "irrelevant", "unclear", "support",
        ])),
    )
        .prop_map(|(score, type_field, is_valid, intent)| {
            let mut body = serde_json::Map::new();
            body.insert("score".to_string(), json!(score));
            if let Some(t) = type_field {
                body.insert("type".to_string(), json!(t));
            }
            if let Some(v) = is_valid {
                body.insert("is_valid".to_string(), json!(v));
                body.insert("is_likely_genuine".to_string(), json!(v));
                body.insert("exists".to_string(), json!(v));
            }
            if let Some(i) = intent {
                body.insert("intent".to_string(), json!(i));
            }
            SignalReport::from_response(serde_json::Value::Object(body))
        })
}

fn arb_bundle() -> impl Strategy<Value = SignalBundle> {
    (
        arb_report(),
        arb_report(),
        arb_report(),
        arb_report(),
        arb_report(),
    )
        .prop_map(|(email, phone, name, company, message)| SignalBundle {
            lead_id: 1,
            email,
            phone,
            name,
            company,
            message,
        })
}

proptest! {
    /// Clamp invariant: whatever the inputs, score and confidence land in
    /// [0, 1] at 2-decimal precision.
    #[test]
    fn prop_total_and_confidence_clamped(bundle in arb_bundle()) {
        let result = AggregationEngine::new().aggregate(&bundle);

        prop_assert!((0.0..=1.0).contains(&result.total_score));
        prop_assert!((0.0..=1.0).contains(&result.confidence));
        prop_assert_eq!(result.total_score, (result.total_score * 100.0).round() / 100.0);
        prop_assert_eq!(result.confidence, (result.confidence * 100.0).round() / 100.0);
    }

    /// Determinism: identical bundles produce bit-identical results.
    #[test]
    fn prop_aggregation_is_deterministic(bundle in arb_bundle()) {
        let engine = AggregationEngine::new();
        let first = engine.aggregate(&bundle);
        let second = engine.aggregate(&bundle);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    /// Raising one signal score with all metadata fixed never lowers the
    /// decision tier (risk flags, and hence the critical count, depend only
    /// on metadata).
    #[test]
    fn prop_decision_monotonic_in_score(
        bundle in arb_bundle(),
        bump in 0.0f64..1.0,
        which in 0usize..5,
    ) {
        let engine = AggregationEngine::new();
        let low = engine.aggregate(&bundle);

        let mut raised = bundle.clone();
        let report = match which {
            0 => &mut raised.email,
            1 => &mut raised.phone,
            2 => &mut raised.name,
            3 => &mut raised.company,
            _ => &mut raised.message,
        };
        report.score = (report.score + bump).clamp(0.0, 1.0);

        let high = engine.aggregate(&raised);

        prop_assert_eq!(&low.risk_flags, &high.risk_flags);
        prop_assert!(high.decision >= low.decision);
    }

    /// Round-trip: the stored raw scores reproduce the weighted base within
    /// rounding tolerance.
    #[test]
    fn prop_weighted_base_round_trip(bundle in arb_bundle()) {
        let engine = AggregationEngine::new();
        let result = engine.aggregate(&bundle);

        let expected = result.signal_scores.email * 0.28
            + result.signal_scores.phone * 0.12
            + result.signal_scores.name * 0.08
            + result.signal_scores.company * 0.32
            + result.signal_scores.message * 0.20;
        let actual = engine.weighted_base(&result.signal_scores);

        prop_assert!((actual - expected).abs() < 1e-9);
    }
}

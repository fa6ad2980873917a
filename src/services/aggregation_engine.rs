//! Aggregation engine: reduces a signal bundle to one qualification result.
//!
//! Pure and deterministic. Identical bundles produce bit-identical results,
//! and nothing here touches I/O, so the engine is never a concurrency
//! bottleneck. Steps, in order: risk-flag detection, confidence, weighted
//! base score, contextual bonuses, risk penalty, clamp/round, tiering.

use std::collections::BTreeSet;

use crate::domain::models::{
    is_critical, AggregationResult, Decision, SignalBundle, SignalReport, SignalScores, SignalType,
};

/// Fixed per-signal weights. They sum to 1.0 and are not renormalized when
/// a signal carries the neutral default: a missing signal still contributes
/// its full weighted share at score 0.5.
const WEIGHTS: [(SignalType, f64); 5] = [
    (SignalType::Email, 0.28),
    (SignalType::Phone, 0.12),
    (SignalType::Name, 0.08),
    (SignalType::Company, 0.32),
    (SignalType::Message, 0.20),
];

/// Email classifications that raise a risk flag.
const RISKY_EMAIL_TYPES: [&str; 4] = ["disposable", "spammy", "bot", "invalid"];

/// Message intents that raise a risk flag.
const RISKY_MESSAGE_INTENTS: [&str; 3] = ["spam", "irrelevant", "unclear"];

/// Industries that earn the full industry bonus (case-insensitive
/// substring match against the reported industry).
const HIGH_VALUE_INDUSTRIES: [&str; 9] = [
    "technology",
    "software",
    "saas",
    "fintech",
    "finance",
    "healthcare",
    "insurance",
    "manufacturing",
    "logistics",
];

const URGENCY_KEYWORDS: [&str; 6] = [
    "asap",
    "urgent",
    "immediately",
    "right away",
    "this week",
    "today",
];

const BUYING_KEYWORDS: [&str; 9] = [
    "buy",
    "purchase",
    "pricing",
    "quote",
    "demo",
    "budget",
    "implement",
    "evaluate",
    "contract",
];

/// Declared message intents that earn the declared-intent bonus.
const DECLARED_BUYING_INTENTS: [&str; 4] = ["interested", "buying", "qualified", "hot"];

const CRITICAL_PENALTY: f64 = 0.08;
const MINOR_PENALTY: f64 = 0.03;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// The scoring authority: turns heterogeneous per-signal reports into one
/// score, confidence value, risk-flag set and decision tier.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregationEngine;

impl AggregationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate one bundle. Infallible by construction; if scoring itself
    /// breaks that is a panic, not a recoverable error.
    pub fn aggregate(&self, bundle: &SignalBundle) -> AggregationResult {
        let signal_scores = SignalScores::from_bundle(bundle);
        let risk_flags = detect_risk_flags(bundle);
        let critical = risk_flags.iter().filter(|f| is_critical(f)).count();
        let minor = risk_flags.len() - critical;

        let confidence = self.confidence(bundle, risk_flags.len());

        let base = self.weighted_base(&signal_scores);
        let bonuses = self.contextual_bonuses(bundle);
        let penalty = critical as f64 * CRITICAL_PENALTY + minor as f64 * MINOR_PENALTY;

        let total_score = round2(clamp01(base + bonuses.total() - penalty));
        let decision = decide(total_score, critical);

        // Legacy qualifier rule kept for form-driven leads: an explicit
        // no-budget, just-browsing combination short-circuits to NURTURE.
        if let Some((total_score, decision, confidence)) = legacy_browsing_override(bundle) {
            return AggregationResult {
                lead_id: bundle.lead_id,
                total_score,
                decision,
                confidence,
                risk_flags,
                signal_scores,
            };
        }

        AggregationResult {
            lead_id: bundle.lead_id,
            total_score,
            decision,
            confidence,
            risk_flags,
            signal_scores,
        }
    }

    /// Weighted base score, before bonuses and penalties. Exposed so stored
    /// results can be audited against the raw per-signal scores.
    pub fn weighted_base(&self, scores: &SignalScores) -> f64 {
        WEIGHTS
            .iter()
            .map(|(signal, weight)| scores.get(*signal) * weight)
            .sum()
    }

    /// Confidence starts at 1.0 and degrades with incomplete data and risk
    /// flags. A signal counts as missing when its score is zero or its
    /// report is the absent-equivalent neutral default (which is what a
    /// failed evaluator leg settles as); name is never penalized.
    fn confidence(&self, bundle: &SignalBundle, flag_count: usize) -> f64 {
        let missing = |report: &SignalReport| report.score == 0.0 || report.is_neutral();

        let mut confidence = 1.0;
        if missing(&bundle.email) {
            confidence -= 0.15;
        }
        if missing(&bundle.phone) {
            confidence -= 0.10;
        }
        if missing(&bundle.company) {
            confidence -= 0.15;
        }
        if missing(&bundle.message) {
            confidence -= 0.10;
        }
        confidence -= 0.08 * flag_count as f64;
        round2(clamp01(confidence))
    }

    fn contextual_bonuses(&self, bundle: &SignalBundle) -> Bonuses {
        let company = &bundle.company;
        let email = &bundle.email;
        let message = &bundle.message;

        let industry = match company.meta_str("industry") {
            Some(ind) if HIGH_VALUE_INDUSTRIES.iter().any(|k| ind.contains(k)) => 0.10,
            Some(ind) if ind != "unknown" => 0.05,
            _ => 0.0,
        };

        let company_size = match company.meta_str("size").as_deref() {
            Some("large") => 0.10,
            Some("medium") => 0.07,
            Some("small") => 0.03,
            _ => 0.0,
        };

        let text = message.meta_str("text").unwrap_or_default();
        let urgency_hits = URGENCY_KEYWORDS.iter().filter(|k| text.contains(*k)).count();
        let urgency = (urgency_hits as f64 * 0.03).min(0.08);

        let buying_hits = BUYING_KEYWORDS.iter().filter(|k| text.contains(*k)).count();
        let mut buying = (buying_hits as f64 * 0.04).min(0.10);
        if let Some(intent) = message.meta_str("intent") {
            if DECLARED_BUYING_INTENTS.contains(&intent.as_str()) {
                buying += 0.05;
            }
        }

        let business_email =
            if email.meta_str("type").as_deref() == Some("business") && email.score >= 0.7 {
                0.05
            } else {
                0.0
            };

        let has_website = company
            .meta_str("website")
            .map_or(false, |w| !w.is_empty());
        let company_verified = if company.meta_bool("exists") == Some(true) && has_website {
            0.04
        } else {
            0.0
        };

        // Mutually exclusive tiers; the higher one wins.
        let strong_combo = if email.score >= 0.85 && company.score >= 0.85 {
            0.06
        } else if email.score >= 0.75 && company.score >= 0.75 {
            0.03
        } else {
            0.0
        };

        let intent_company = if message.score >= 0.80 && company.score >= 0.75 {
            0.04
        } else {
            0.0
        };

        // Lets strong personal-email leads still qualify on intent alone.
        let high_intent = if urgency >= 0.04 && buying >= 0.04 {
            0.08
        } else {
            0.0
        };

        Bonuses {
            industry,
            company_size,
            urgency,
            buying,
            business_email,
            company_verified,
            strong_combo,
            intent_company,
            high_intent,
        }
    }
}

/// Individual bonus components, kept separate because the high-intent
/// override keys off the urgency and buying values.
#[derive(Debug, Clone, Copy)]
struct Bonuses {
    industry: f64,
    company_size: f64,
    urgency: f64,
    buying: f64,
    business_email: f64,
    company_verified: f64,
    strong_combo: f64,
    intent_company: f64,
    high_intent: f64,
}

impl Bonuses {
    fn total(&self) -> f64 {
        self.industry
            + self.company_size
            + self.urgency
            + self.buying
            + self.business_email
            + self.company_verified
            + self.strong_combo
            + self.intent_company
            + self.high_intent
    }
}

/// Risk flags derived from report metadata. Critical/minor partition is not
/// stored; it is re-derived from the flag text wherever needed.
fn detect_risk_flags(bundle: &SignalBundle) -> BTreeSet<String> {
    let mut flags = BTreeSet::new();

    if let Some(email_type) = bundle.email.meta_str("type") {
        if RISKY_EMAIL_TYPES.contains(&email_type.as_str()) {
            flags.insert(format!("email_{email_type}"));
        }
    }
    if bundle.email.meta_bool("is_likely_genuine") == Some(false) {
        flags.insert("email_not_genuine".to_string());
    }

    if bundle.phone.meta_bool("is_valid") == Some(false) {
        flags.insert("phone_invalid".to_string());
    }
    if bundle.phone.meta_str("type").as_deref() == Some("voip") {
        flags.insert("phone_voip".to_string());
    }

    if bundle.name.meta_bool("is_valid") == Some(false) {
        flags.insert("name_suspicious".to_string());
    }

    if bundle.company.meta_bool("exists") == Some(false) {
        flags.insert("company_not_found".to_string());
    }

    if let Some(intent) = bundle.message.meta_str("intent") {
        if RISKY_MESSAGE_INTENTS.contains(&intent.as_str()) {
            flags.insert(format!("message_{intent}"));
        }
    }

    flags
}

/// Decision tiering, evaluated top-down; first match wins.
fn decide(total: f64, critical: usize) -> Decision {
    if total >= 0.85 && critical == 0 {
        Decision::Hot
    } else if total >= 0.70 && critical == 0 {
        Decision::Qualified
    } else if total >= 0.55 && critical <= 1 {
        Decision::Warm
    } else if total >= 0.45 {
        Decision::Nurture
    } else if total >= 0.35 {
        Decision::Review
    } else {
        Decision::NotQualified
    }
}

/// Superseded qualifier rule still honored for form narratives: a message
/// declaring both "no budget" and "just browsing" forces NURTURE with score
/// 0.10 and confidence 0.90.
fn legacy_browsing_override(bundle: &SignalBundle) -> Option<(f64, Decision, f64)> {
    let text = bundle.message.meta_str("text")?;
    if text.contains("no budget") && text.contains("just browsing") {
        Some((0.10, Decision::Nurture, 0.90))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(score: f64, metadata: serde_json::Value) -> SignalReport {
        let mut body = metadata;
        body["score"] = json!(score);
        SignalReport::from_response(body)
    }

    /// Scenario: five strong signals with every bonus firing.
    fn hot_bundle() -> SignalBundle {
        let mut bundle = SignalBundle::neutral(1);
        bundle.email = report(0.9, json!({"type": "business", "is_likely_genuine": true}));
        bundle.phone = report(0.9, json!({"is_valid": true, "type": "mobile"}));
        bundle.name = report(0.9, json!({"is_valid": true}));
        bundle.company = report(
            0.9,
            json!({"exists": true, "industry": "Technology", "size": "large", "website": "https://example.com"}),
        );
        bundle.message = report(0.9, json!({"intent": "buying", "text": "We want a demo"}));
        bundle
    }

    #[test]
    fn test_all_strong_signals_decide_hot() {
        let result = AggregationEngine::new().aggregate(&hot_bundle());
        assert_eq!(result.decision, Decision::Hot);
        assert!(result.total_score >= 0.85);
        assert!(result.risk_flags.is_empty());
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_disposable_email_caps_below_qualified() {
        let mut bundle = SignalBundle::neutral(2);
        bundle.email = report(0.0, json!({"type": "disposable"}));

        let result = AggregationEngine::new().aggregate(&bundle);
        assert!(result.risk_flags.contains("email_disposable"));
        assert!(result.critical_count() >= 1);
        assert!(result.decision < Decision::Qualified);
    }

    #[test]
    fn test_disposable_email_caps_even_with_high_base() {
        // Everything else maxed out: critical flag still blocks HOT/QUALIFIED.
        let mut bundle = hot_bundle();
        bundle.email = report(1.0, json!({"type": "disposable"}));

        let result = AggregationEngine::new().aggregate(&bundle);
        assert!(result.critical_count() >= 1);
        assert!(result.decision < Decision::Qualified);
    }

    #[test]
    fn test_legacy_browsing_override_forces_nurture() {
        let mut bundle = hot_bundle();
        bundle.message = report(
            0.9,
            json!({"intent": "buying", "text": "No Budget right now, Just Browsing"}),
        );

        let result = AggregationEngine::new().aggregate(&bundle);
        assert_eq!(result.decision, Decision::Nurture);
        assert_eq!(result.total_score, 0.10);
        assert_eq!(result.confidence, 0.90);
    }

    #[test]
    fn test_neutral_bundle_scores_midrange_with_degraded_confidence() {
        let result = AggregationEngine::new().aggregate(&SignalBundle::neutral(3));
        // 0.5 across the board, no metadata: base 0.5, no bonuses, no flags.
        assert_eq!(result.total_score, 0.50);
        assert_eq!(result.decision, Decision::Nurture);
        assert!(result.risk_flags.is_empty());
        // Four absent-equivalent signals (name is never penalized):
        // 1.0 - 0.15 - 0.10 - 0.15 - 0.10
        assert_eq!(result.confidence, 0.50);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let sum: f64 = WEIGHTS.iter().map(|(_, w)| w).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_base_round_trip() {
        let engine = AggregationEngine::new();
        let result = engine.aggregate(&hot_bundle());
        let base = engine.weighted_base(&result.signal_scores);
        assert!((base - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_degrades_with_zero_scores_and_flags() {
        let mut bundle = hot_bundle();
        bundle.email = report(0.0, json!({"type": "invalid"}));
        bundle.company = report(0.0, json!({"exists": false}));

        let result = AggregationEngine::new().aggregate(&bundle);
        // 1.0 - 0.15 (email) - 0.15 (company) - 0.08 * 2 flags = 0.54
        assert_eq!(result.confidence, 0.54);
    }

    #[test]
    fn test_confidence_never_penalizes_name() {
        let mut bundle = hot_bundle();
        bundle.name = report(0.0, json!({}));

        let result = AggregationEngine::new().aggregate(&bundle);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_failed_legs_degrade_confidence_not_the_request() {
        // Email and phone legs failed and settled as neutral defaults.
        let mut bundle = hot_bundle();
        bundle.email = SignalReport::neutral();
        bundle.phone = SignalReport::neutral();

        let result = AggregationEngine::new().aggregate(&bundle);
        assert_eq!(result.confidence, 0.75);
    }

    #[test]
    fn test_confidence_clamps_at_zero() {
        let mut bundle = SignalBundle::neutral(6);
        bundle.email = report(0.0, json!({"type": "disposable", "is_likely_genuine": false}));
        bundle.phone = report(0.0, json!({"is_valid": false, "type": "voip"}));
        bundle.name = report(0.0, json!({"is_valid": false}));
        bundle.company = report(0.0, json!({"exists": false}));
        bundle.message = report(0.0, json!({"intent": "spam"}));

        let result = AggregationEngine::new().aggregate(&bundle);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.decision, Decision::NotQualified);
    }

    #[test]
    fn test_urgency_bonus_caps() {
        let mut bundle = SignalBundle::neutral(7);
        bundle.message = report(
            0.5,
            json!({"text": "urgent, need this asap, immediately, today"}),
        );

        let engine = AggregationEngine::new();
        let bonuses = engine.contextual_bonuses(&bundle);
        assert_eq!(bonuses.urgency, 0.08);
    }

    #[test]
    fn test_buying_bonus_caps_and_declared_intent_stacks() {
        let mut bundle = SignalBundle::neutral(8);
        bundle.message = report(
            0.5,
            json!({"intent": "interested", "text": "budget approved, send pricing and a quote to purchase"}),
        );

        let engine = AggregationEngine::new();
        let bonuses = engine.contextual_bonuses(&bundle);
        // keyword part capped at 0.10, declared intent adds 0.05
        assert!((bonuses.buying - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_high_intent_override_requires_both() {
        let mut bundle = SignalBundle::neutral(9);
        bundle.message = report(0.5, json!({"text": "urgent asap demo pricing"}));

        let engine = AggregationEngine::new();
        let bonuses = engine.contextual_bonuses(&bundle);
        assert!(bonuses.urgency >= 0.04);
        assert!(bonuses.buying >= 0.04);
        assert_eq!(bonuses.high_intent, 0.08);

        bundle.message = report(0.5, json!({"text": "demo pricing please"}));
        let bonuses = engine.contextual_bonuses(&bundle);
        assert_eq!(bonuses.high_intent, 0.0);
    }

    #[test]
    fn test_strong_combo_tiers_are_exclusive() {
        let engine = AggregationEngine::new();

        let mut bundle = SignalBundle::neutral(10);
        bundle.email = report(0.86, json!({}));
        bundle.company = report(0.9, json!({}));
        assert_eq!(engine.contextual_bonuses(&bundle).strong_combo, 0.06);

        bundle.email = report(0.78, json!({}));
        bundle.company = report(0.76, json!({}));
        assert_eq!(engine.contextual_bonuses(&bundle).strong_combo, 0.03);

        bundle.email = report(0.78, json!({}));
        bundle.company = report(0.5, json!({}));
        assert_eq!(engine.contextual_bonuses(&bundle).strong_combo, 0.0);
    }

    #[test]
    fn test_known_industry_gets_partial_bonus() {
        let engine = AggregationEngine::new();

        let mut bundle = SignalBundle::neutral(11);
        bundle.company = report(0.5, json!({"industry": "Hospitality"}));
        assert_eq!(engine.contextual_bonuses(&bundle).industry, 0.05);

        bundle.company = report(0.5, json!({"industry": "unknown"}));
        assert_eq!(engine.contextual_bonuses(&bundle).industry, 0.0);

        bundle.company = report(0.5, json!({"industry": "Enterprise SaaS"}));
        assert_eq!(engine.contextual_bonuses(&bundle).industry, 0.10);
    }

    #[test]
    fn test_voip_phone_is_minor_not_critical() {
        let mut bundle = SignalBundle::neutral(12);
        bundle.phone = report(0.6, json!({"is_valid": true, "type": "voip"}));

        let result = AggregationEngine::new().aggregate(&bundle);
        assert!(result.risk_flags.contains("phone_voip"));
        assert_eq!(result.critical_count(), 0);
        assert_eq!(result.minor_count(), 1);
    }

    #[test]
    fn test_spammy_email_counts_critical() {
        let mut bundle = SignalBundle::neutral(13);
        bundle.email = report(0.3, json!({"type": "spammy"}));

        let result = AggregationEngine::new().aggregate(&bundle);
        assert!(result.risk_flags.contains("email_spammy"));
        assert_eq!(result.critical_count(), 1);
    }

    #[test]
    fn test_single_critical_flag_still_allows_warm() {
        // WARM tolerates one critical flag when the total clears 0.55.
        let mut bundle = hot_bundle();
        bundle.message = report(0.9, json!({"intent": "spam", "text": "We want a demo"}));

        let result = AggregationEngine::new().aggregate(&bundle);
        assert_eq!(result.critical_count(), 1);
        assert!(result.total_score >= 0.55);
        assert_eq!(result.decision, Decision::Warm);
    }

    #[test]
    fn test_decide_tier_boundaries() {
        assert_eq!(decide(0.85, 0), Decision::Hot);
        assert_eq!(decide(0.84, 0), Decision::Qualified);
        assert_eq!(decide(0.70, 0), Decision::Qualified);
        assert_eq!(decide(0.69, 0), Decision::Warm);
        assert_eq!(decide(0.55, 1), Decision::Warm);
        assert_eq!(decide(0.90, 1), Decision::Warm);
        assert_eq!(decide(0.90, 2), Decision::Nurture);
        assert_eq!(decide(0.45, 3), Decision::Nurture);
        assert_eq!(decide(0.44, 0), Decision::Review);
        assert_eq!(decide(0.35, 0), Decision::Review);
        assert_eq!(decide(0.34, 0), Decision::NotQualified);
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let engine = AggregationEngine::new();
        let bundle = hot_bundle();
        let a = engine.aggregate(&bundle);
        let b = engine.aggregate(&bundle);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_total_score_clamped_and_rounded() {
        let result = AggregationEngine::new().aggregate(&hot_bundle());
        assert!(result.total_score <= 1.0);
        assert_eq!(result.total_score, round2(result.total_score));
    }
}

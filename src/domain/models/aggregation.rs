//! Aggregation output models.
//!
//! The aggregation engine reduces a `SignalBundle` to one immutable
//! `AggregationResult`: total score, decision tier, confidence, risk flags
//! and the raw per-signal scores kept for auditability.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::signal::{SignalBundle, SignalType};

/// Qualification decision tier, ordered by contact priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    NotQualified,
    Review,
    Nurture,
    Warm,
    Qualified,
    Hot,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hot => "HOT",
            Self::Qualified => "QUALIFIED",
            Self::Warm => "WARM",
            Self::Nurture => "NURTURE",
            Self::Review => "REVIEW",
            Self::NotQualified => "NOT_QUALIFIED",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "HOT" => Some(Self::Hot),
            "QUALIFIED" => Some(Self::Qualified),
            "WARM" => Some(Self::Warm),
            "NURTURE" => Some(Self::Nurture),
            "REVIEW" => Some(Self::Review),
            "NOT_QUALIFIED" => Some(Self::NotQualified),
            _ => None,
        }
    }

    /// Whether this tier triggers an immediate follow-up action.
    pub fn triggers_followup(&self) -> bool {
        matches!(self, Self::Hot | Self::Qualified | Self::Warm)
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five raw per-signal scores, kept on the result for auditing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalScores {
    #[serde(rename = "email_score")]
    pub email: f64,
    #[serde(rename = "phone_score")]
    pub phone: f64,
    #[serde(rename = "name_score")]
    pub name: f64,
    #[serde(rename = "company_score")]
    pub company: f64,
    #[serde(rename = "message_score")]
    pub message: f64,
}

impl SignalScores {
    pub fn from_bundle(bundle: &SignalBundle) -> Self {
        Self {
            email: bundle.email.score,
            phone: bundle.phone.score,
            name: bundle.name.score,
            company: bundle.company.score,
            message: bundle.message.score,
        }
    }

    pub fn get(&self, signal: SignalType) -> f64 {
        match signal {
            SignalType::Email => self.email,
            SignalType::Phone => self.phone,
            SignalType::Name => self.name,
            SignalType::Company => self.company,
            SignalType::Message => self.message,
        }
    }
}

/// Immutable outcome of one aggregation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub lead_id: i64,

    /// Bonus-adjusted, penalty-adjusted total in [0, 1], 2-decimal precision.
    pub total_score: f64,

    pub decision: Decision,

    /// How much the score should be trusted, in [0, 1], 2-decimal precision.
    /// Driven by data completeness and risk-flag count, distinct from the
    /// score itself.
    pub confidence: f64,

    /// Ordered so identical inputs serialize identically.
    pub risk_flags: BTreeSet<String>,

    /// Raw per-signal scores before weighting.
    #[serde(flatten)]
    pub signal_scores: SignalScores,
}

impl AggregationResult {
    /// Count of flags whose text marks them critical (contains one of
    /// `invalid`, `disposable`, `bot`, `spam`). The partition is re-derived
    /// from the flag string, not stored.
    pub fn critical_count(&self) -> usize {
        self.risk_flags.iter().filter(|f| is_critical(f)).count()
    }

    pub fn minor_count(&self) -> usize {
        self.risk_flags.len() - self.critical_count()
    }
}

/// Markers that make a risk flag critical enough to cap the decision tier.
const CRITICAL_MARKERS: [&str; 4] = ["invalid", "disposable", "bot", "spam"];

/// Whether a risk flag is critical, judged from its text alone.
pub fn is_critical(flag: &str) -> bool {
    CRITICAL_MARKERS.iter().any(|marker| flag.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_round_trip() {
        for decision in [
            Decision::Hot,
            Decision::Qualified,
            Decision::Warm,
            Decision::Nurture,
            Decision::Review,
            Decision::NotQualified,
        ] {
            assert_eq!(Decision::from_str(decision.as_str()), Some(decision));
        }
        assert_eq!(Decision::from_str("hot"), Some(Decision::Hot));
        assert_eq!(Decision::from_str("MAYBE"), None);
    }

    #[test]
    fn test_decision_ordering_matches_contact_priority() {
        assert!(Decision::Hot > Decision::Qualified);
        assert!(Decision::Qualified > Decision::Warm);
        assert!(Decision::Warm > Decision::Nurture);
        assert!(Decision::Nurture > Decision::Review);
        assert!(Decision::Review > Decision::NotQualified);
    }

    #[test]
    fn test_followup_trigger_tiers() {
        assert!(Decision::Hot.triggers_followup());
        assert!(Decision::Qualified.triggers_followup());
        assert!(Decision::Warm.triggers_followup());
        assert!(!Decision::Nurture.triggers_followup());
        assert!(!Decision::Review.triggers_followup());
        assert!(!Decision::NotQualified.triggers_followup());
    }

    #[test]
    fn test_critical_partition_from_flag_text() {
        assert!(is_critical("email_disposable"));
        assert!(is_critical("email_spammy"));
        assert!(is_critical("email_bot"));
        assert!(is_critical("phone_invalid"));
        assert!(is_critical("message_spam"));
        assert!(!is_critical("phone_voip"));
        assert!(!is_critical("email_not_genuine"));
        assert!(!is_critical("name_suspicious"));
        assert!(!is_critical("company_not_found"));
        assert!(!is_critical("message_unclear"));
    }
}

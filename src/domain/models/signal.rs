//! Signal domain models.
//!
//! A signal is one dimension of lead quality (email, phone, name, company,
//! message). Each evaluator produces a `SignalReport`; the five reports for
//! one lead form a `SignalBundle`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One dimension of lead quality evaluated by an external service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    Email,
    Phone,
    Name,
    Company,
    Message,
}

impl SignalType {
    /// All signal types, in aggregation weight order.
    pub const ALL: [SignalType; 5] = [
        Self::Email,
        Self::Phone,
        Self::Name,
        Self::Company,
        Self::Message,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Name => "name",
            Self::Company => "company",
            Self::Message => "message",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "email" => Some(Self::Email),
            "phone" => Some(Self::Phone),
            "name" => Some(Self::Name),
            "company" => Some(Self::Company),
            "message" => Some(Self::Message),
            _ => None,
        }
    }
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a raw score value into [0, 1].
///
/// Non-numeric and non-finite values clamp to 0.0 rather than erroring, so
/// a malformed evaluator response degrades the score instead of aborting
/// the qualification request.
pub fn safe_score(value: Option<&Value>) -> f64 {
    let score = match value {
        Some(v) => v.as_f64().unwrap_or(0.0),
        None => 0.0,
    };
    if !score.is_finite() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

/// Normalized output of one signal evaluator.
///
/// The score is always present and clamped to [0, 1]. A report that could
/// not be produced is replaced by [`SignalReport::neutral`], never by
/// absence, so the aggregation engine never sees a missing signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReport {
    /// Trust/relevance score in [0, 1].
    pub score: f64,

    /// Type-specific fields consumed by risk-flag and bonus logic
    /// (e.g. email `type`, phone `is_valid`, company `industry`).
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl SignalReport {
    /// Build a report from a raw score and metadata, normalizing the score.
    pub fn new(score: f64, metadata: Map<String, Value>) -> Self {
        Self {
            score: safe_score(Some(&Value::from(score))),
            metadata,
        }
    }

    /// The default substitute for a failed or missing evaluation:
    /// score 0.5, no metadata.
    pub fn neutral() -> Self {
        Self {
            score: 0.5,
            metadata: Map::new(),
        }
    }

    /// Whether this report is indistinguishable from the neutral default,
    /// i.e. absent-equivalent: the evaluation contributed no information.
    pub fn is_neutral(&self) -> bool {
        self.score == 0.5 && self.metadata.is_empty()
    }

    /// Build a report from an arbitrary evaluator response body.
    ///
    /// A missing `score` field falls back to the neutral 0.5; a present but
    /// non-numeric one clamps to 0.0 via [`safe_score`]. Remaining fields
    /// are carried as metadata.
    pub fn from_response(body: Value) -> Self {
        match body {
            Value::Object(mut map) => {
                let score = match map.remove("score") {
                    Some(raw) => safe_score(Some(&raw)),
                    None => 0.5,
                };
                Self {
                    score,
                    metadata: map,
                }
            }
            _ => Self::neutral(),
        }
    }

    /// Look up a string metadata field, lowercased and trimmed.
    pub fn meta_str(&self, key: &str) -> Option<String> {
        self.metadata
            .get(key)
            .and_then(Value::as_str)
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
    }

    /// Look up a boolean metadata field.
    pub fn meta_bool(&self, key: &str) -> Option<bool> {
        self.metadata.get(key).and_then(Value::as_bool)
    }
}

impl Default for SignalReport {
    fn default() -> Self {
        Self::neutral()
    }
}

/// The five signal reports for one qualification request.
///
/// One field per signal type, so a missing key is unrepresentable. Created
/// fresh per request and treated as immutable once handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalBundle {
    pub lead_id: i64,
    pub email: SignalReport,
    pub phone: SignalReport,
    pub name: SignalReport,
    pub company: SignalReport,
    pub message: SignalReport,
}

impl SignalBundle {
    /// A bundle where every signal carries the neutral default report.
    pub fn neutral(lead_id: i64) -> Self {
        Self {
            lead_id,
            email: SignalReport::neutral(),
            phone: SignalReport::neutral(),
            name: SignalReport::neutral(),
            company: SignalReport::neutral(),
            message: SignalReport::neutral(),
        }
    }

    pub fn report(&self, signal: SignalType) -> &SignalReport {
        match signal {
            SignalType::Email => &self.email,
            SignalType::Phone => &self.phone,
            SignalType::Name => &self.name,
            SignalType::Company => &self.company,
            SignalType::Message => &self.message,
        }
    }

    pub fn set_report(&mut self, signal: SignalType, report: SignalReport) {
        match signal {
            SignalType::Email => self.email = report,
            SignalType::Phone => self.phone = report,
            SignalType::Name => self.name = report,
            SignalType::Company => self.company = report,
            SignalType::Message => self.message = report,
        }
    }
}

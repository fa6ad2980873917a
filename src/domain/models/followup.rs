//! Follow-up action models.
//!
//! The dispatcher decides whether to contact a lead; these types carry the
//! request across the boundary and the outcome back. Delivery is modeled as
//! an explicit outcome value rather than exception suppression, so the
//! dispatcher can emit exactly one audit record per invocation.

use serde::{Deserialize, Serialize};

use super::aggregation::Decision;

/// Input to the follow-up generator: contact info, scoring outcome and the
/// context fields extracted from the raw signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUpRequest {
    pub lead_id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub score: f64,
    pub decision: Decision,
    pub confidence: f64,
    pub email_type: Option<String>,
    pub company_size: Option<String>,
    pub company_industry: Option<String>,
    pub message_intent: Option<String>,
}

/// A rendered message ready for the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUpMessage {
    pub lead_id: i64,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// What the transport reported for a delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryReceipt {
    Sent { to: String },
    Skipped { reason: String },
    Failed { reason: String },
}

/// Outcome of one follow-up decision, consumed by the dispatcher's audit
/// record. `Skipped` is an explicit no-action result, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FollowUpOutcome {
    Sent { to: String },
    Skipped { reason: String },
    Failed { reason: String },
}

impl FollowUpOutcome {
    /// Audit action tag for this outcome.
    pub fn audit_action(&self) -> &'static str {
        match self {
            Self::Sent { .. } => "followup_sent",
            Self::Skipped { .. } => "followup_skipped",
            Self::Failed { .. } => "followup_failed",
        }
    }
}

impl From<DeliveryReceipt> for FollowUpOutcome {
    fn from(receipt: DeliveryReceipt) -> Self {
        match receipt {
            DeliveryReceipt::Sent { to } => Self::Sent { to },
            DeliveryReceipt::Skipped { reason } => Self::Skipped { reason },
            DeliveryReceipt::Failed { reason } => Self::Failed { reason },
        }
    }
}

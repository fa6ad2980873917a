//! Lead domain model.
//!
//! A lead is created NEW on intake and transitions to exactly one decision
//! tier after each aggregation run. Status is overwritten, not accumulated:
//! the design is last-write-wins, not a merge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregation::Decision;

/// Lifecycle status of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadStatus {
    /// Freshly ingested, not yet qualified.
    New,
    Hot,
    Qualified,
    Warm,
    Nurture,
    Review,
    NotQualified,
}

impl Default for LeadStatus {
    fn default() -> Self {
        Self::New
    }
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
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
            "NEW" => Some(Self::New),
            "HOT" => Some(Self::Hot),
            "QUALIFIED" => Some(Self::Qualified),
            "WARM" => Some(Self::Warm),
            "NURTURE" => Some(Self::Nurture),
            "REVIEW" => Some(Self::Review),
            "NOT_QUALIFIED" => Some(Self::NotQualified),
            _ => None,
        }
    }
}

impl From<Decision> for LeadStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Hot => Self::Hot,
            Decision::Qualified => Self::Qualified,
            Decision::Warm => Self::Warm,
            Decision::Nurture => Self::Nurture,
            Decision::Review => Self::Review,
            Decision::NotQualified => Self::NotQualified,
        }
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inbound sales lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
    pub status: LeadStatus,
    /// Final aggregated score in [0, 1].
    pub score: f64,
    /// Confidence attached to the score in [0, 1].
    pub confidence: f64,
    pub risk_flags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw contact fields for a qualification request, before any evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadFields {
    pub lead_id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
}

impl LeadFields {
    pub fn from_lead(lead: &Lead) -> Self {
        Self {
            lead_id: lead.id,
            name: lead.name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            company: lead.company.clone(),
            message: lead.message.clone(),
        }
    }
}

//! Audit trail model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One audit record describing a pipeline outcome for a lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Uuid,
    pub lead_id: i64,
    /// Action tag, e.g. `qualification_completed`, `followup_sent`.
    pub action: String,
    pub details: serde_json::Value,
    pub recorded_at: DateTime<Utc>,
}

impl AuditRecord {
    pub fn new(lead_id: i64, action: impl Into<String>, details: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            lead_id,
            action: action.into(),
            details,
            recorded_at: Utc::now(),
        }
    }
}

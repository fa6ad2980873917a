//! Lead repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Lead, LeadStatus};

/// Fields accepted at lead intake.
#[derive(Debug, Clone, Default)]
pub struct NewLead {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
}

/// Repository port for lead persistence.
///
/// The status-update operations are the narrow state-update interface the
/// dispatcher writes through. Both must be idempotent when replayed with
/// identical arguments; the storage transaction is the only atomicity
/// boundary the core relies on.
#[async_trait]
pub trait LeadRepository: Send + Sync {
    /// Insert a new lead with status NEW; returns the assigned id.
    async fn insert(&self, lead: NewLead) -> DomainResult<i64>;

    /// Get a lead by id.
    async fn get(&self, id: i64) -> DomainResult<Option<Lead>>;

    /// List leads, most recent first.
    async fn list(&self, limit: i64) -> DomainResult<Vec<Lead>>;

    /// Overwrite status and score (last-write-wins, no merge).
    async fn update_status(&self, id: i64, status: LeadStatus, score: f64) -> DomainResult<()>;

    /// Overwrite confidence and risk flags (last-write-wins, no merge).
    async fn update_confidence_risk(
        &self,
        id: i64,
        confidence: f64,
        risk_flags: &[String],
    ) -> DomainResult<()>;
}

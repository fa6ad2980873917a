//! Audit log repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::AuditRecord;

/// Repository port for the per-lead audit trail.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Persist one audit record.
    async fn record(&self, record: &AuditRecord) -> DomainResult<()>;

    /// All records for a lead, oldest first.
    async fn for_lead(&self, lead_id: i64) -> DomainResult<Vec<AuditRecord>>;
}

//! SQLite implementation of the AuditLogRepository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::AuditRecord;
use crate::domain::ports::AuditLogRepository;

#[derive(Clone)]
pub struct SqliteAuditLogRepository {
    pool: SqlitePool,
}

impl SqliteAuditLogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for SqliteAuditLogRepository {
    async fn record(&self, record: &AuditRecord) -> DomainResult<()> {
        sqlx::query(
            r#"INSERT INTO audit_log (id, lead_id, action, details, recorded_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(record.id.to_string())
        .bind(record.lead_id)
        .bind(&record.action)
        .bind(serde_json::to_string(&record.details)?)
        .bind(record.recorded_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn for_lead(&self, lead_id: i64) -> DomainResult<Vec<AuditRecord>> {
        let rows: Vec<AuditRow> =
            sqlx::query_as("SELECT * FROM audit_log WHERE lead_id = ? ORDER BY recorded_at ASC")
                .bind(lead_id)
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(AuditRecord::try_from).collect()
    }
}

#[derive(sqlx::FromRow)]
struct AuditRow {
    id: String,
    lead_id: i64,
    action: String,
    details: String,
    recorded_at: String,
}

impl TryFrom<AuditRow> for AuditRecord {
    type Error = DomainError;

    fn try_from(row: AuditRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| DomainError::ValidationFailed(format!("bad audit id: {e}")))?;
        let recorded_at = chrono::DateTime::parse_from_rfc3339(&row.recorded_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| DomainError::ValidationFailed(format!("bad timestamp: {e}")))?;

        Ok(AuditRecord {
            id,
            lead_id: row.lead_id,
            action: row.action,
            details: serde_json::from_str(&row.details)?,
            recorded_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{LeadRepository, NewLead};
    use crate::infrastructure::database::connection::DatabaseConnection;
    use crate::infrastructure::database::lead_repository::SqliteLeadRepository;
    use serde_json::json;

    #[tokio::test]
    async fn test_record_and_query_in_order() {
        let connection = DatabaseConnection::new("sqlite::memory:", 1).await.unwrap();
        let leads = SqliteLeadRepository::new(connection.pool());
        let audit = SqliteAuditLogRepository::new(connection.pool());

        let lead_id = leads.insert(NewLead::default()).await.unwrap();

        audit
            .record(&AuditRecord::new(lead_id, "qualification_triggered", json!({})))
            .await
            .unwrap();
        audit
            .record(&AuditRecord::new(
                lead_id,
                "followup_sent",
                json!({"to": "ada@acme.com"}),
            ))
            .await
            .unwrap();

        let records = audit.for_lead(lead_id).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].action, "qualification_triggered");
        assert_eq!(records[1].action, "followup_sent");
    }
}

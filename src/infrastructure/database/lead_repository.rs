//! SQLite implementation of the LeadRepository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Lead, LeadStatus};
use crate::domain::ports::{LeadRepository, NewLead};

#[derive(Clone)]
pub struct SqliteLeadRepository {
    pool: SqlitePool,
}

impl SqliteLeadRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeadRepository for SqliteLeadRepository {
    async fn insert(&self, lead: NewLead) -> DomainResult<i64> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            r#"INSERT INTO leads (name, email, phone, company, message,
               status, score, confidence, risk_flags, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, 'NEW', 0.0, 0.0, '[]', ?, ?)"#,
        )
        .bind(&lead.name)
        .bind(&lead.email)
        .bind(&lead.phone)
        .bind(&lead.company)
        .bind(&lead.message)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Lead>> {
        let row: Option<LeadRow> = sqlx::query_as("SELECT * FROM leads WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Lead::try_from).transpose()
    }

    async fn list(&self, limit: i64) -> DomainResult<Vec<Lead>> {
        let rows: Vec<LeadRow> =
            sqlx::query_as("SELECT * FROM leads ORDER BY created_at DESC, id DESC LIMIT ?")
                .bind(limit)
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(Lead::try_from).collect()
    }

    async fn update_status(&self, id: i64, status: LeadStatus, score: f64) -> DomainResult<()> {
        let result = sqlx::query("UPDATE leads SET status = ?, score = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(score)
            .bind(Utc::now().to_rfc3339())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::LeadNotFound(id));
        }
        Ok(())
    }

    async fn update_confidence_risk(
        &self,
        id: i64,
        confidence: f64,
        risk_flags: &[String],
    ) -> DomainResult<()> {
        let flags_json = serde_json::to_string(risk_flags)?;
        let result =
            sqlx::query("UPDATE leads SET confidence = ?, risk_flags = ?, updated_at = ? WHERE id = ?")
                .bind(confidence)
                .bind(&flags_json)
                .bind(Utc::now().to_rfc3339())
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::LeadNotFound(id));
        }
        Ok(())
    }
}

/// Raw row shape; converted into the domain model at the boundary.
#[derive(sqlx::FromRow)]
struct LeadRow {
    id: i64,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    company: Option<String>,
    message: Option<String>,
    status: String,
    score: f64,
    confidence: f64,
    risk_flags: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<LeadRow> for Lead {
    type Error = DomainError;

    fn try_from(row: LeadRow) -> Result<Self, Self::Error> {
        let status = LeadStatus::from_str(&row.status).ok_or_else(|| {
            DomainError::ValidationFailed(format!("unknown lead status: {}", row.status))
        })?;
        let risk_flags: Vec<String> = serde_json::from_str(&row.risk_flags)?;

        let parse_ts = |value: &str| {
            chrono::DateTime::parse_from_rfc3339(value)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| DomainError::ValidationFailed(format!("bad timestamp: {e}")))
        };

        Ok(Lead {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            company: row.company,
            message: row.message,
            status,
            score: row.score,
            confidence: row.confidence,
            risk_flags,
            created_at: parse_ts(&row.created_at)?,
            updated_at: parse_ts(&row.updated_at)?,
        })
    }
}

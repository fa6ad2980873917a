//! SQLite connection pool management.

use anyhow::{Context, Result};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::str::FromStr;
use std::time::Duration;

/// Database connection pool manager.
///
/// `SQLite` with WAL mode for concurrent readers, foreign keys enabled and
/// a busy timeout so racing lead updates queue instead of erroring. The
/// pool is the only transaction boundary the core relies on.
pub struct DatabaseConnection {
    pool: SqlitePool,
}

impl DatabaseConnection {
    /// Create a new connection pool and apply the schema.
    ///
    /// # Arguments
    /// * `database_url` - `SQLite` URL (e.g. "sqlite:.leadgate/leadgate.db"
    ///   or "sqlite::memory:")
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .context("invalid database URL")?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .idle_timeout(Duration::from_secs(30))
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
            .context("failed to open database")?;

        let connection = Self { pool };
        connection.apply_schema().await?;
        Ok(connection)
    }

    pub fn pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// Create tables and indexes if they do not exist yet. Safe to run on
    /// every startup.
    async fn apply_schema(&self) -> Result<()> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS leads (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT,
                email TEXT,
                phone TEXT,
                company TEXT,
                message TEXT,
                status TEXT NOT NULL DEFAULT 'NEW',
                score REAL NOT NULL DEFAULT 0.0,
                confidence REAL NOT NULL DEFAULT 0.0,
                risk_flags TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await
        .context("failed to create leads table")?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS audit_log (
                id TEXT PRIMARY KEY,
                lead_id INTEGER NOT NULL REFERENCES leads(id),
                action TEXT NOT NULL,
                details TEXT NOT NULL,
                recorded_at TEXT NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await
        .context("failed to create audit_log table")?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_audit_log_lead ON audit_log(lead_id)")
            .execute(&self.pool)
            .await
            .context("failed to create audit_log index")?;

        Ok(())
    }
}

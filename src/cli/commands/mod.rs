pub mod init;
pub mod lead;
pub mod qualify;

use std::sync::Arc;

use anyhow::Result;

use crate::domain::models::Config;
use crate::infrastructure::database::{
    DatabaseConnection, SqliteAuditLogRepository, SqliteLeadRepository,
};

/// Open the configured database and build the repositories.
pub(crate) async fn open_repositories(
    config: &Config,
) -> Result<(Arc<SqliteLeadRepository>, Arc<SqliteAuditLogRepository>)> {
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let url = format!("sqlite:{}", config.database.path);
    let connection = DatabaseConnection::new(&url, config.database.max_connections).await?;
    let pool = connection.pool();
    Ok((
        Arc::new(SqliteLeadRepository::new(pool.clone())),
        Arc::new(SqliteAuditLogRepository::new(pool)),
    ))
}

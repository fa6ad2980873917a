pub mod audit_repository;
pub mod connection;
pub mod lead_repository;

pub use audit_repository::SqliteAuditLogRepository;
pub use connection::DatabaseConnection;
pub use lead_repository::SqliteLeadRepository;

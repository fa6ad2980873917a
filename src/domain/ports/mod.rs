pub mod audit_log_repository;
pub mod evaluator_client;
pub mod lead_repository;
pub mod message_transport;

pub use audit_log_repository::AuditLogRepository;
pub use evaluator_client::{EvaluatorClient, EvaluatorError};
pub use lead_repository::{LeadRepository, NewLead};
pub use message_transport::MessageTransport;

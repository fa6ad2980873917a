pub mod aggregation;
pub mod audit;
pub mod config;
pub mod followup;
pub mod lead;
pub mod signal;

pub use aggregation::{is_critical, AggregationResult, Decision, SignalScores};
pub use audit::AuditRecord;
pub use config::{Config, DatabaseConfig, EvaluatorConfig, FollowUpConfig, LoggingConfig};
pub use followup::{DeliveryReceipt, FollowUpMessage, FollowUpOutcome, FollowUpRequest};
pub use lead::{Lead, LeadFields, LeadStatus};
pub use signal::{safe_score, SignalBundle, SignalReport, SignalType};

//! Leadgate - lead scoring and qualification gate.
//!
//! Leadgate combines several independent, unreliable signal evaluations
//! into one qualification decision per inbound sales lead, then drives a
//! follow-up action from that decision.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture
//! principles:
//!
//! - **Domain Layer** (`domain`): Pure data models and port traits
//! - **Service Layer** (`services`): Aggregation engine, decision
//!   dispatcher and follow-up generator
//! - **Application Layer** (`application`): The qualification pipeline
//!   (concurrent evaluator fan-out and wiring)
//! - **Infrastructure Layer** (`infrastructure`): HTTP evaluator facade,
//!   webhook transport, SQLite repositories, config and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use leadgate::application::QualificationPipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Wire repositories, evaluators and dispatcher, then:
//!     // let outcome = pipeline.qualify(&fields).await?;
//!     Ok(())
//! }
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::{QualificationOutcome, QualificationPipeline};
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    AggregationResult, AuditRecord, Config, Decision, FollowUpOutcome, Lead, LeadFields,
    LeadStatus, SignalBundle, SignalReport, SignalType,
};
pub use domain::ports::{
    AuditLogRepository, EvaluatorClient, EvaluatorError, LeadRepository, MessageTransport, NewLead,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{AggregationEngine, DecisionDispatcher, FollowUpGenerator};

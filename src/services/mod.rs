pub mod aggregation_engine;
pub mod dispatcher;
pub mod followup;

pub use aggregation_engine::AggregationEngine;
pub use dispatcher::DecisionDispatcher;
pub use followup::FollowUpGenerator;

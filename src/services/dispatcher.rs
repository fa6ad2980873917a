//! Decision dispatcher: turns an aggregation result into lead-state
//! updates and at most one follow-up action per transition.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::{
    AggregationResult, AuditRecord, FollowUpOutcome, FollowUpRequest, LeadFields, LeadStatus,
    SignalBundle,
};
use crate::domain::ports::{AuditLogRepository, LeadRepository};
use crate::services::followup::FollowUpGenerator;

/// Consumes an `AggregationResult`, overwrites lead state and conditionally
/// triggers a follow-up.
///
/// The status update always happens, last-write-wins; follow-up delivery is
/// fire-and-forget from the dispatcher's perspective (an outcome value, not
/// an error path), and every invocation leaves exactly one audit record.
pub struct DecisionDispatcher {
    leads: Arc<dyn LeadRepository>,
    audit: Arc<dyn AuditLogRepository>,
    followup: Arc<FollowUpGenerator>,
}

impl DecisionDispatcher {
    pub fn new(
        leads: Arc<dyn LeadRepository>,
        audit: Arc<dyn AuditLogRepository>,
        followup: Arc<FollowUpGenerator>,
    ) -> Self {
        Self {
            leads,
            audit,
            followup,
        }
    }

    /// Apply one aggregation result to the lead and decide on follow-up.
    ///
    /// Persistence failures are surfaced to the caller; a follow-up failure
    /// is not an error here, it is recorded and returned as the outcome.
    pub async fn dispatch(
        &self,
        fields: &LeadFields,
        bundle: &SignalBundle,
        result: &AggregationResult,
    ) -> DomainResult<FollowUpOutcome> {
        let status = LeadStatus::from(result.decision);
        let flags: Vec<String> = result.risk_flags.iter().cloned().collect();

        self.leads
            .update_status(result.lead_id, status, result.total_score)
            .await?;
        self.leads
            .update_confidence_risk(result.lead_id, result.confidence, &flags)
            .await?;

        let outcome = if result.decision.triggers_followup() {
            let request = build_followup_request(fields, bundle, result);
            self.followup.run(&request).await
        } else {
            info!(
                lead_id = result.lead_id,
                decision = %result.decision,
                score = result.total_score,
                "decision below contact threshold, no follow-up"
            );
            FollowUpOutcome::Skipped {
                reason: format!("decision {} does not trigger follow-up", result.decision),
            }
        };

        if let FollowUpOutcome::Failed { reason } = &outcome {
            warn!(
                lead_id = result.lead_id,
                reason, "follow-up delivery failed, status update kept"
            );
        }

        let record = AuditRecord::new(
            result.lead_id,
            outcome.audit_action(),
            json!({
                "decision": result.decision,
                "score": result.total_score,
                "confidence": result.confidence,
                "risk_flags": &result.risk_flags,
                "outcome": &outcome,
            }),
        );
        self.audit.record(&record).await?;

        Ok(outcome)
    }
}

/// Extract the context fields the follow-up boundary wants from the raw
/// signals: email classification, company size/industry, message intent.
fn build_followup_request(
    fields: &LeadFields,
    bundle: &SignalBundle,
    result: &AggregationResult,
) -> FollowUpRequest {
    FollowUpRequest {
        lead_id: result.lead_id,
        name: fields.name.clone(),
        email: fields.email.clone(),
        company: fields.company.clone(),
        score: result.total_score,
        decision: result.decision,
        confidence: result.confidence,
        email_type: bundle.email.meta_str("type"),
        company_size: bundle.company.meta_str("size"),
        company_industry: bundle.company.meta_str("industry"),
        message_intent: bundle.message.meta_str("intent"),
    }
}

//! Follow-up action generator.
//!
//! Builds the outbound message for leads whose decision tier warrants
//! immediate contact and hands it to the transport. Tiers below contact
//! threshold, or leads without an email address, produce an explicit
//! no-action outcome rather than an error.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::models::{Decision, FollowUpMessage, FollowUpOutcome, FollowUpRequest};
use crate::domain::ports::MessageTransport;

/// Renders tier-specific messages and drives delivery.
pub struct FollowUpGenerator {
    transport: Arc<dyn MessageTransport>,
    from_name: String,
}

impl FollowUpGenerator {
    pub fn new(transport: Arc<dyn MessageTransport>, from_name: impl Into<String>) -> Self {
        Self {
            transport,
            from_name: from_name.into(),
        }
    }

    /// Produce and deliver a follow-up for one request.
    pub async fn run(&self, request: &FollowUpRequest) -> FollowUpOutcome {
        if !request.decision.triggers_followup() {
            return FollowUpOutcome::Skipped {
                reason: format!("decision {} does not trigger follow-up", request.decision),
            };
        }

        let Some(email) = request.email.as_deref().filter(|e| !e.trim().is_empty()) else {
            debug!(lead_id = request.lead_id, "no email address, skipping follow-up");
            return FollowUpOutcome::Skipped {
                reason: "no email address on lead".to_string(),
            };
        };

        let message = self.render(request, email);
        info!(
            lead_id = request.lead_id,
            to = %message.to,
            decision = %request.decision,
            "delivering follow-up"
        );
        self.transport.deliver(&message).await.into()
    }

    /// Render subject and body for one contact-worthy lead. Content varies
    /// by decision tier; HOT reads personal and urgent, WARM is a soft
    /// follow-up.
    fn render(&self, request: &FollowUpRequest, email: &str) -> FollowUpMessage {
        let name = request.name.as_deref().unwrap_or("there");
        let company = request.company.as_deref().unwrap_or("your company");

        let (subject, intro, urgency) = match request.decision {
            Decision::Hot => (
                format!("Exclusive opportunity for {company}"),
                format!(
                    "I noticed your inquiry and wanted to reach out personally. \
                     Based on your profile, I believe we have an exceptional \
                     opportunity that aligns with {company}'s needs."
                ),
                "I'd love to schedule a call this week to discuss how we can help.",
            ),
            Decision::Qualified => (
                format!("Great fit for {company} - let's connect"),
                format!(
                    "Thank you for your interest! I've reviewed your information \
                     and I'm excited to discuss how we can help {company} achieve \
                     its goals."
                ),
                "I'd like to schedule a brief call within the next few days.",
            ),
            _ => (
                format!("Following up on your inquiry - {company}"),
                format!(
                    "I wanted to follow up on your recent inquiry. I'd love to \
                     learn more about {company} and explore how we might be able \
                     to help."
                ),
                "Let's schedule a call when you have time.",
            ),
        };

        let score_pct = (request.score * 100.0).round() as i64;
        let confidence_pct = (request.confidence * 100.0).round() as i64;
        let body = format!(
            "Hi {name},\n\n\
             {intro}\n\n\
             Why we think this is a great fit:\n\
             - Match score: {score_pct}% ({decision} priority)\n\
             - Confidence level: {confidence_pct}%\n\n\
             {urgency}\n\n\
             Best regards,\n\
             {from}\n",
            decision = request.decision,
            from = self.from_name,
        );

        FollowUpMessage {
            lead_id: request.lead_id,
            to: email.to_string(),
            subject,
            body,
        }
    }
}

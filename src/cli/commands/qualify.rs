use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use console::style;

use crate::application::QualificationPipeline;
use crate::domain::models::{Config, FollowUpOutcome, LeadFields};
use crate::domain::ports::{LeadRepository, NewLead};
use crate::infrastructure::evaluators::{EvaluatorClientConfig, HttpEvaluatorClient};
use crate::infrastructure::transport::{WebhookTransport, WebhookTransportConfig};
use crate::services::{DecisionDispatcher, FollowUpGenerator};

#[derive(Args)]
pub struct QualifyArgs {
    /// Qualify a stored lead by id
    #[arg(long, conflicts_with_all = ["name", "email", "phone", "company", "message"])]
    pub id: Option<i64>,

    /// Ad-hoc lead fields; the lead is stored first, then qualified
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub message: Option<String>,
}

pub async fn execute(args: QualifyArgs, config: &Config, json: bool) -> Result<()> {
    let (leads, audit) = super::open_repositories(config).await?;

    let fields = match args.id {
        Some(id) => {
            let lead = leads
                .get(id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Lead {id} not found"))?;
            LeadFields::from_lead(&lead)
        }
        None => {
            if args.name.is_none()
                && args.email.is_none()
                && args.phone.is_none()
                && args.company.is_none()
                && args.message.is_none()
            {
                anyhow::bail!("provide --id or at least one lead field");
            }
            let lead_id = leads
                .insert(NewLead {
                    name: args.name.clone(),
                    email: args.email.clone(),
                    phone: args.phone.clone(),
                    company: args.company.clone(),
                    message: args.message.clone(),
                })
                .await
                .context("failed to store ad-hoc lead")?;
            LeadFields {
                lead_id,
                name: args.name,
                email: args.email,
                phone: args.phone,
                company: args.company,
                message: args.message,
            }
        }
    };

    let evaluators = Arc::new(
        HttpEvaluatorClient::new(EvaluatorClientConfig {
            base_url: config.evaluators.base_url.clone(),
            timeout_secs: config.evaluators.batch_timeout_secs,
        })
        .context("failed to build evaluator client")?,
    );

    let transport = Arc::new(
        WebhookTransport::new(WebhookTransportConfig {
            webhook_url: config.followup.webhook_url.clone(),
            timeout_secs: config.followup.delivery_timeout_secs,
        })
        .context("failed to build follow-up transport")?,
    );

    let generator = Arc::new(FollowUpGenerator::new(transport, config.followup.from_name.clone()));
    let dispatcher = Arc::new(DecisionDispatcher::new(leads, audit, generator));
    let pipeline = QualificationPipeline::new(
        evaluators,
        dispatcher,
        Duration::from_secs(config.evaluators.batch_timeout_secs),
    );

    let outcome = pipeline.qualify(&fields).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "result": outcome.result,
                "followup": outcome.followup,
            })
        );
    } else {
        let result = &outcome.result;
        println!(
            "Lead {} scored {:.2} -> {}",
            result.lead_id,
            result.total_score,
            style(result.decision.as_str()).bold()
        );
        println!("  Confidence: {:.2}", result.confidence);
        if result.risk_flags.is_empty() {
            println!("  Risk flags: none");
        } else {
            println!(
                "  Risk flags: {}",
                result
                    .risk_flags
                    .iter()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        match &outcome.followup {
            FollowUpOutcome::Sent { to } => println!("  Follow-up: sent to {to}"),
            FollowUpOutcome::Skipped { reason } => println!("  Follow-up: skipped ({reason})"),
            FollowUpOutcome::Failed { reason } => println!("  Follow-up: failed ({reason})"),
        }
    }

    Ok(())
}

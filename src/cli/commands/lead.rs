use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::cli::output::table::{format_audit_table, format_lead_table};
use crate::domain::models::Config;
use crate::domain::ports::{AuditLogRepository, LeadRepository, NewLead};

#[derive(Args)]
pub struct LeadArgs {
    #[command(subcommand)]
    pub command: LeadCommands,
}

#[derive(Subcommand)]
pub enum LeadCommands {
    /// Store a new lead with status NEW
    Add {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        message: Option<String>,
    },
    /// List stored leads, most recent first
    List {
        #[arg(long, default_value_t = 50)]
        limit: i64,
    },
    /// Show one lead
    Show { id: i64 },
    /// Show the audit trail for one lead
    Logs { id: i64 },
}

pub async fn execute(args: LeadArgs, config: &Config, json: bool) -> Result<()> {
    let (leads, audit) = super::open_repositories(config).await?;

    match args.command {
        LeadCommands::Add {
            name,
            email,
            phone,
            company,
            message,
        } => {
            let id = leads
                .insert(NewLead {
                    name,
                    email,
                    phone,
                    company,
                    message,
                })
                .await
                .context("failed to store lead")?;

            if json {
                println!("{}", serde_json::json!({ "lead_id": id }));
            } else {
                println!("Lead stored with id {id}");
            }
        }
        LeadCommands::List { limit } => {
            let rows = leads.list(limit).await.context("failed to list leads")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else if rows.is_empty() {
                println!("No leads found.");
            } else {
                println!("{}", format_lead_table(&rows));
                println!("\nShowing {} lead(s)", rows.len());
            }
        }
        LeadCommands::Show { id } => {
            let lead = leads
                .get(id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Lead {id} not found"))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&lead)?);
            } else {
                println!("Lead {}:", lead.id);
                println!("  Status: {}", lead.status);
                println!("  Score: {:.2}", lead.score);
                println!("  Confidence: {:.2}", lead.confidence);
                if !lead.risk_flags.is_empty() {
                    println!("  Risk flags: {}", lead.risk_flags.join(", "));
                }
                println!("  Name: {}", lead.name.as_deref().unwrap_or("-"));
                println!("  Email: {}", lead.email.as_deref().unwrap_or("-"));
                println!("  Phone: {}", lead.phone.as_deref().unwrap_or("-"));
                println!("  Company: {}", lead.company.as_deref().unwrap_or("-"));
                println!(
                    "  Created at: {}",
                    lead.created_at.format("%Y-%m-%d %H:%M:%S UTC")
                );
            }
        }
        LeadCommands::Logs { id } => {
            let records = audit.for_lead(id).await.context("failed to load audit trail")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else if records.is_empty() {
                println!("No audit records for lead {id}.");
            } else {
                println!("{}", format_audit_table(&records));
            }
        }
    }

    Ok(())
}

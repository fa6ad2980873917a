//! Command-line interface.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// Leadgate: score inbound leads and gate follow-up actions.
#[derive(Parser)]
#[command(name = "leadgate", version, about)]
pub struct Cli {
    /// Emit machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a config file (defaults to .leadgate/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scaffold .leadgate/ with a default config and database
    Init(commands::init::InitArgs),
    /// Manage stored leads
    Lead(commands::lead::LeadArgs),
    /// Run the qualification pipeline for a lead
    Qualify(commands::qualify::QualifyArgs),
}

/// Print an error the way the rest of the output is formatted, then exit
/// non-zero.
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    if json {
        let payload = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{payload}");
    } else {
        eprintln!("{} {err:#}", console::style("error:").red().bold());
    }
    std::process::exit(1);
}

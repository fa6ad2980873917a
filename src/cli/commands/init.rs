use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;

use crate::domain::models::Config;
use crate::infrastructure::database::DatabaseConnection;

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Create `.leadgate/` with a default config.yaml and an initialized
/// database.
pub async fn execute(args: InitArgs, json: bool) -> Result<()> {
    let dir = Path::new(".leadgate");
    std::fs::create_dir_all(dir).context("failed to create .leadgate directory")?;

    let config_path = dir.join("config.yaml");
    if config_path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    let config = Config::default();
    let yaml = serde_yaml::to_string(&config).context("failed to serialize default config")?;
    std::fs::write(&config_path, yaml).context("failed to write config file")?;

    let url = format!("sqlite:{}", config.database.path);
    DatabaseConnection::new(&url, config.database.max_connections)
        .await
        .context("failed to initialize database")?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "config": config_path.display().to_string(),
                "database": config.database.path,
            })
        );
    } else {
        println!("Initialized leadgate project");
        println!("  Config: {}", config_path.display());
        println!("  Database: {}", config.database.path);
    }

    Ok(())
}

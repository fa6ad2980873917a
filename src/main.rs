//! Leadgate CLI entry point.

use clap::Parser;

use leadgate::cli::{commands, Cli, Commands};
use leadgate::infrastructure::config::ConfigLoader;
use leadgate::infrastructure::logging::Logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => leadgate::cli::handle_error(err, cli.json),
    };

    let _logging = match Logging::init(&config.logging) {
        Ok(logging) => logging,
        Err(err) => leadgate::cli::handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Init(args) => commands::init::execute(args, cli.json).await,
        Commands::Lead(args) => commands::lead::execute(args, &config, cli.json).await,
        Commands::Qualify(args) => commands::qualify::execute(args, &config, cli.json).await,
    };

    if let Err(err) = result {
        leadgate::cli::handle_error(err, cli.json);
    }
}

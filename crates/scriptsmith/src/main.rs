//! Scriptsmith CLI binary.
//!
//! This binary provides command-line access to Scriptsmith's functionality:
//! - Generate scripts for open leads, from a title or a job posting
//! - Generate scripts for client engagements with research
//! - Generate from loose JSON field mappings
//! - Inspect the tier table

use clap::Parser;
use scriptsmith::{Credentials, ScriptsmithConfig, init_tracing};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, emit, run_active, run_fields, run_generate, run_lead, show_tiers};

    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config = match &cli.config {
        Some(path) => ScriptsmithConfig::from_file(path)?,
        None => ScriptsmithConfig::load()?,
    };

    // Execute the requested command
    let result = match cli.command {
        Commands::Tiers => {
            show_tiers(&config, cli.format)?;
            return Ok(());
        }
        Commands::Generate {
            title,
            options,
            description,
        } => {
            let credentials = Credentials::from_env()?;
            run_generate(&config, &credentials, &title, &description, &options).await?
        }
        Commands::Lead { path, words, tier } => {
            let credentials = Credentials::from_env()?;
            run_lead(&config, &credentials, path.as_deref(), words, tier).await?
        }
        Commands::Active {
            title,
            options,
            briefing,
        } => {
            let credentials = Credentials::from_env()?;
            run_active(&config, &credentials, &title, &briefing, &options).await?
        }
        Commands::Fields { path } => {
            let credentials = Credentials::from_env()?;
            run_fields(&config, &credentials, path.as_deref()).await?
        }
    };

    if !emit(&result, cli.format)? {
        std::process::exit(1);
    }
    Ok(())
}

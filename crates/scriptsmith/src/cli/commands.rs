//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use scriptsmith::QualityTier;
use std::path::PathBuf;

/// Scriptsmith - tiered YouTube script generation
#[derive(Parser, Debug)]
#[command(name = "scriptsmith")]
#[command(about = "Tiered YouTube script generation with model cascades", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file layered over the bundled defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a script for an open lead (no research)
    Generate {
        /// Script title
        #[arg(long)]
        title: String,

        #[command(flatten)]
        options: ScriptOptions,

        /// Free-form description of the video
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Generate the brief and script for an open-lead job posting (file or stdin)
    Lead {
        /// Path to the posting text; reads stdin when omitted
        path: Option<PathBuf>,

        /// Target length in words (clamped to 500-18000)
        #[arg(long, default_value_t = scriptsmith::DEFAULT_TARGET_WORDS)]
        words: u32,

        /// Quality tier (low/bronze, medium/silver, high/gold)
        #[arg(long)]
        tier: Option<QualityTier>,
    },

    /// Generate a script for a client engagement (research required)
    Active {
        /// Title supplied by the client
        #[arg(long)]
        title: String,

        #[command(flatten)]
        options: ScriptOptions,

        /// Client briefing
        #[arg(long, default_value = "")]
        briefing: String,
    },

    /// Generate from a JSON object of loose fields (file or stdin)
    Fields {
        /// Path to the JSON file; reads stdin when omitted
        path: Option<PathBuf>,
    },

    /// Show the tier table and workflows
    Tiers,
}

/// Options shared by the generating commands.
#[derive(Args, Debug)]
pub struct ScriptOptions {
    /// Comma-separated keywords
    #[arg(long, default_value = "")]
    pub keywords: String,

    /// Target length in words (clamped to 500-18000)
    #[arg(long, default_value_t = scriptsmith::DEFAULT_TARGET_WORDS)]
    pub words: u32,

    /// Quality tier (low/bronze, medium/silver, high/gold)
    #[arg(long)]
    pub tier: Option<QualityTier>,
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["scriptsmith", "generate", "--title", "Rust"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Human);
        match cli.command {
            Commands::Generate { title, options, description } => {
                assert_eq!(title, "Rust");
                assert_eq!(description, "");
                assert_eq!(options.words, 1000);
                assert!(options.tier.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_localized_tier_names_parse() {
        let cli = Cli::try_parse_from([
            "scriptsmith", "active", "--title", "Client title", "--tier", "gold", "--words", "2500",
            "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Active { options, .. } => {
                assert_eq!(options.tier, Some(QualityTier::High));
                assert_eq!(options.words, 2500);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_lead_reads_stdin_by_default() {
        let cli = Cli::try_parse_from(["scriptsmith", "lead", "--tier", "silver"]).unwrap();
        match cli.command {
            Commands::Lead { path, words, tier } => {
                assert!(path.is_none());
                assert_eq!(words, 1000);
                assert_eq!(tier, Some(QualityTier::Medium));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_title_is_required() {
        assert!(Cli::try_parse_from(["scriptsmith", "generate"]).is_err());
    }
}

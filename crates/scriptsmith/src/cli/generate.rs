//! Generation command handlers.

use super::{OutputFormat, ScriptOptions};
use scriptsmith::{
    ActiveEngagementWorkflow, ClientBrief, ConfigError, Credentials, GenerationRequest,
    GenerationResult, JobPosting, JsonError, OpenLeadWorkflow, QualityTier, SERPER_API_KEY,
    ScriptsmithConfig, ScriptsmithError, ScriptsmithResult, build_orchestrator,
    generate_from_fields, render_summary, research_backend, tier_overview,
};
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Run the open-lead workflow.
#[instrument(skip_all, fields(title = %title))]
pub async fn run_generate(
    config: &ScriptsmithConfig,
    credentials: &Credentials,
    title: &str,
    description: &str,
    options: &ScriptOptions,
) -> ScriptsmithResult<GenerationResult> {
    let orchestrator = build_orchestrator(config, credentials)?;
    let tier = options
        .tier
        .unwrap_or(*OpenLeadWorkflow::info().default_tier());
    let request = GenerationRequest::new(
        title,
        description,
        options.keywords.clone(),
        options.words,
        tier,
    );

    info!(tier = %tier, words = *request.target_word_count(), "Generating open-lead script");
    let outcome = OpenLeadWorkflow::new(&orchestrator).run(&request).await;
    Ok(outcome.into_result())
}

/// Run the client-engagement workflow.
///
/// # Errors
///
/// Returns a configuration error if no search key is configured.
#[instrument(skip_all, fields(title = %title))]
pub async fn run_active(
    config: &ScriptsmithConfig,
    credentials: &Credentials,
    title: &str,
    briefing: &str,
    options: &ScriptOptions,
) -> ScriptsmithResult<GenerationResult> {
    let research = research_backend(config, credentials)?
        .ok_or_else(|| ConfigError::missing_credential(SERPER_API_KEY))?;
    let orchestrator = build_orchestrator(config, credentials)?;
    let brief = ClientBrief::builder()
        .title(title)
        .briefing(briefing)
        .keywords(options.keywords.clone())
        .target_word_count(options.words)
        .quality_tier(
            options
                .tier
                .unwrap_or(*ActiveEngagementWorkflow::info().default_tier()),
        )
        .build()?;

    let outcome = ActiveEngagementWorkflow::new(&orchestrator, research)
        .run(&brief)
        .await;
    info!(hits = outcome.research().len(), "Client research used");
    Ok(outcome.into_result())
}

fn read_input(path: Option<&Path>) -> ScriptsmithResult<String> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!("Failed to read {}: {}", path.display(), e))
        })?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| ConfigError::new(format!("Failed to read stdin: {}", e)))?;
            buffer
        }
    };
    Ok(raw)
}

/// Generate the brief and script for a job posting.
#[instrument(skip(config, credentials))]
pub async fn run_lead(
    config: &ScriptsmithConfig,
    credentials: &Credentials,
    path: Option<&Path>,
    words: u32,
    tier: Option<QualityTier>,
) -> ScriptsmithResult<GenerationResult> {
    let posting = JobPosting::builder()
        .text(read_input(path)?)
        .target_word_count(words)
        .quality_tier(tier.unwrap_or(*OpenLeadWorkflow::info().default_tier()))
        .build()?;
    let orchestrator = build_orchestrator(config, credentials)?;

    let outcome = OpenLeadWorkflow::new(&orchestrator).run_posting(&posting).await;
    if let Some(brief) = outcome.lead_brief() {
        info!(
            title = %brief.title(),
            budget = %brief.job_details().budget(),
            hours = %brief.job_details().hours(),
            duration = %brief.job_details().duration(),
            review_score = ?brief.review_score(),
            "Lead brief generated"
        );
    }
    Ok(outcome.into_result())
}

/// Generate from a JSON object of loose fields.
#[instrument(skip(config, credentials))]
pub async fn run_fields(
    config: &ScriptsmithConfig,
    credentials: &Credentials,
    path: Option<&Path>,
) -> ScriptsmithResult<GenerationResult> {
    let raw = read_input(path)?;

    let fields: Map<String, Value> = serde_json::from_str(&raw).map_err(|e| {
        ScriptsmithError::from(JsonError::with_payload(
            format!("Expected a JSON object of fields: {}", e),
            &raw,
        ))
    })?;

    let orchestrator = build_orchestrator(config, credentials)?;
    Ok(generate_from_fields(&orchestrator, &fields).await)
}

/// Print the tier table and workflow descriptions.
pub fn show_tiers(config: &ScriptsmithConfig, format: OutputFormat) -> ScriptsmithResult<()> {
    let workflows = [OpenLeadWorkflow::info(), ActiveEngagementWorkflow::info()];
    match format {
        OutputFormat::Human => {
            println!("{}", tier_overview(config.tiers()));
            println!();
            for info in &workflows {
                println!(
                    "{}: {} (title {}, research {}, default tier {})",
                    info.workflow(),
                    info.description(),
                    info.title_source(),
                    if *info.research_required() { "required" } else { "off" },
                    info.default_tier()
                );
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "tiers": config.tiers(),
                "workflows": workflows,
            });
            println!("{}", to_pretty(&json)?);
        }
    }
    Ok(())
}

/// Print a result; returns whether it succeeded.
pub fn emit(result: &GenerationResult, format: OutputFormat) -> ScriptsmithResult<bool> {
    match format {
        OutputFormat::Human => println!("{}", render_summary(result)),
        OutputFormat::Json => println!("{}", to_pretty(result)?),
    }
    if !*result.success() {
        warn!(error = ?result.error(), "Generation did not succeed");
    }
    Ok(*result.success())
}

fn to_pretty<T: serde::Serialize>(value: &T) -> ScriptsmithResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| {
        ScriptsmithError::from(JsonError::new(format!("Failed to serialize output: {}", e)))
    })
}

//! Tests for orchestrator assembly and result rendering.

use anyhow::Result;
use scriptsmith::{
    BonusContent, CopyscapeCredentials, Credentials, GenerationResult, QualityTier,
    ScriptsmithConfig, TierTable, build_orchestrator, render_summary, tier_overview,
};

#[test]
fn test_orchestrator_without_optional_credentials() -> Result<()> {
    let orchestrator =
        build_orchestrator(&ScriptsmithConfig::default(), &Credentials::new("sk-or-test"))?;
    assert!(orchestrator.research_backend().is_none());
    assert!(orchestrator.originality_backend().is_none());
    assert_eq!(orchestrator.text_backend().provider_name(), "openrouter");
    Ok(())
}

#[test]
fn test_orchestrator_wires_optional_backends() -> Result<()> {
    let credentials = Credentials::new("sk-or-test")
        .with_serper("serper-test")
        .with_copyscape(CopyscapeCredentials::new("user", "key"));
    let orchestrator = build_orchestrator(&ScriptsmithConfig::default(), &credentials)?;
    assert!(orchestrator.research_backend().is_some());
    assert!(orchestrator.originality_backend().is_some());
    Ok(())
}

#[test]
fn test_summary_of_failure_is_the_error() {
    let result = GenerationResult::failure("Broken", QualityTier::Low, "premium backend down");
    let summary = render_summary(&result);
    assert!(summary.starts_with("Generation failed for \"Broken\""));
    assert!(summary.contains("premium backend down"));
}

#[test]
fn test_summary_includes_script_and_bonus() -> Result<()> {
    let result = GenerationResult::builder()
        .success(true)
        .script_title("The Future of AI")
        .word_count("1000")
        .quality_tier(QualityTier::High)
        .full_script("=== HOOK ===\nWhat if?")
        .viral_patterns(vec!["Secret reveal".to_string()])
        .bonus(Some(BonusContent::new("1. Robot | NOW", "All about AI")))
        .build()?;

    let summary = render_summary(&result);

    assert!(summary.contains("Tier:         high"));
    assert!(summary.contains("Patterns:     Secret reveal"));
    assert!(summary.contains("=== HOOK ===\nWhat if?"));
    assert!(summary.contains("=== THUMBNAIL IDEAS ===\n1. Robot | NOW"));
    Ok(())
}

#[test]
fn test_tier_overview_lists_every_tier() {
    let overview = tier_overview(&TierTable::default());
    let lines: Vec<&str> = overview.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("low"));
    assert!(lines[0].contains("$0.35"));
    assert!(!lines[0].contains("A/B testing"));
    assert!(lines[2].starts_with("high"));
    assert!(lines[2].contains("bonus"));
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_live_low_tier_generation() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = ScriptsmithConfig::load()?;
    let orchestrator = build_orchestrator(&config, &Credentials::from_env()?)?;
    let request = scriptsmith::GenerationRequest::new(
        "The Future of AI",
        "Exploring AI trends",
        "AI, future tech",
        500,
        QualityTier::Low,
    );

    let result = orchestrator.generate(&request).await;

    assert!(*result.success(), "generation failed: {:?}", result.error());
    assert_eq!(result.key_points().len(), 4);
    Ok(())
}

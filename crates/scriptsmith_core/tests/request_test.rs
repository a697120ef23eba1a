use scriptsmith_core::{
    GenerationRequest, QualityTier, ScriptsmithConfig, Section, SectionSet, plan,
};

#[test]
fn clamped_request_plans_within_budget() -> anyhow::Result<()> {
    let config = ScriptsmithConfig::default();
    let request = GenerationRequest::builder()
        .title("The Future of AI")
        .description("Exploring AI trends")
        .keywords("AI, machine learning")
        .target_word_count(100u32)
        .quality_tier(QualityTier::Low)
        .build()?;

    let inflated =
        (f64::from(*request.target_word_count()) * config.pipeline().target_inflation()) as u32;
    assert_eq!(inflated, 575);

    let distribution = plan(inflated);
    assert_eq!(distribution.target(Section::Hook), 100);
    assert!(distribution.total() <= 604);
    Ok(())
}

#[test]
fn section_set_round_trips_through_json() -> anyhow::Result<()> {
    let sections = SectionSet::new()
        .with(Section::Intro, "Welcome")
        .with(Section::Chapter3, "Do it");
    let json = serde_json::to_string(&sections)?;
    let parsed: SectionSet = serde_json::from_str(&json)?;
    assert_eq!(parsed, sections);
    Ok(())
}

#[test]
fn tiers_come_from_configuration() {
    let config = ScriptsmithConfig::default();
    let medium = config.tiers().get(QualityTier::Medium);
    assert_eq!(*medium.hook_count(), 5);
    assert!(*medium.enable_originality_check());
    assert!(!*medium.enable_viral_research());
}

#[test]
fn plan_stays_within_ten_percent_across_valid_targets() {
    let inflation = *ScriptsmithConfig::default().pipeline().target_inflation();
    for target in (500u32..=18_000).step_by(25) {
        let inflated = (f64::from(target) * inflation) as u32;
        let total = f64::from(plan(inflated).total());
        let drift = (total - f64::from(inflated)).abs() / f64::from(inflated);
        assert!(drift <= 0.10, "target {target}: planned {total} for {inflated}");
    }
}

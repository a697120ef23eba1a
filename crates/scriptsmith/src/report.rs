//! Human-readable rendering of results and tiers.

use scriptsmith_core::{GenerationResult, QualityTier, TierTable};
use strum::IntoEnumIterator;

/// Summary header followed by the full script.
///
/// A failed result renders as its error line only.
pub fn render_summary(result: &GenerationResult) -> String {
    if !*result.success() {
        return format!(
            "Generation failed for \"{}\": {}",
            result.script_title(),
            result.error().as_deref().unwrap_or("unknown error")
        );
    }

    let mut lines = vec![
        format!("Title:        {}", result.script_title()),
        format!("Tier:         {}", result.quality_tier()),
        format!("Words:        {}", result.word_count()),
        format!("Reading time: {} min", result.reading_time()),
        format!("Quality:      {}", result.quality_score()),
        format!(
            "Cost:         {} of {} ({} calls, {})",
            result.actual_api_cost(),
            result.budgeted_cost(),
            result.api_calls(),
            result.generation_time()
        ),
        format!("Originality:  {}", result.plagiarism_check().message()),
    ];
    if !result.viral_patterns().is_empty() {
        lines.push(format!("Patterns:     {}", result.viral_patterns().join(", ")));
    }
    lines.push(String::new());
    lines.push(result.full_script().clone());

    if let Some(bonus) = result.bonus() {
        lines.push(String::new());
        lines.push("=== THUMBNAIL IDEAS ===".to_string());
        lines.push(bonus.thumbnail_ideas().clone());
        lines.push(String::new());
        lines.push("=== VIDEO DESCRIPTION ===".to_string());
        lines.push(bonus.video_description().clone());
    }
    lines.join("\n")
}

/// One line per tier with its budget and enabled features.
pub fn tier_overview(tiers: &TierTable) -> String {
    QualityTier::iter()
        .map(|tier| {
            let config = tiers.get(tier);
            let features = [
                (*config.enable_second_opinion(), "second opinion"),
                (*config.enable_ab_testing(), "A/B testing"),
                (*config.enable_viral_research(), "viral research"),
                (*config.enable_originality_check(), "originality"),
                (*config.enable_bonus_content(), "bonus"),
            ]
            .into_iter()
            .filter_map(|(enabled, name)| enabled.then_some(name))
            .collect::<Vec<_>>()
            .join(", ");
            format!(
                "{:<6} {} budget, score {}, {} hooks, {} polish passes: {}",
                tier.to_string(),
                config.budget_label(),
                config.quality_score_label(),
                config.hook_count(),
                config.polish_pass_count(),
                features
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

//! Polish passes, the advisory quality gate and final trimming.

use crate::{ModelGateway, wrap_in_marker};
use scriptsmith_core::{BackendId, Section, SectionSet, word_count};
use scriptsmith_error::ScriptsmithResult;
use scriptsmith_interface::SectionExtractor;
use tracing::{debug, info, instrument, warn};

/// Focus of each polish pass, cycled in order.
pub const POLISH_FOCI: [&str; 3] = ["structure", "flow", "engagement"];

/// Sections shortened when a script runs long, in priority order.
pub const TRIM_ORDER: [Section; 3] = [Section::Conclusion, Section::Chapter3, Section::Intro];

const QUALITY_MAX_TOKENS: u32 = 200;
const QUALITY_SAMPLE_CHARS: usize = 300;

fn combine(sections: &SectionSet) -> String {
    sections
        .iter()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(section, text)| wrap_in_marker(section.marker(), text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

async fn polish_pass(
    gateway: &mut ModelGateway,
    extractor: &dyn SectionExtractor,
    sections: &SectionSet,
    focus: &str,
) -> ScriptsmithResult<SectionSet> {
    let combined = combine(sections);
    if combined.is_empty() {
        return Ok(sections.clone());
    }

    let prompt = format!(
        "Polish this script for better {focus}:\n\n\
         Requirements:\n\
         - Keep EXACT structure and markers\n\
         - Keep EXACT word counts\n\
         - Improve {focus}\n\
         - Maintain section separation\n\n\
         {combined}\n\n\
         Return polished version with same markers."
    );
    let max_tokens = gateway.cap_tokens(word_count(&combined) * 2);
    let polished = gateway
        .invoke_required(BackendId::Premium, "polish", &prompt, max_tokens)
        .await?;

    Ok(sections
        .iter()
        .map(|(section, previous)| {
            let extracted = extractor.extract(&polished, section.marker());
            if extracted.is_empty() {
                debug!(section = %section, "Polish dropped section, keeping previous text");
                (section, previous.to_string())
            } else {
                (section, extracted)
            }
        })
        .collect())
}

/// Apply `pass_count` polish passes, cycling through [`POLISH_FOCI`].
///
/// # Errors
///
/// Returns an error when a premium polish call fails.
#[instrument(skip(gateway, extractor, sections), fields(sections = sections.len()))]
pub async fn polish(
    gateway: &mut ModelGateway,
    extractor: &dyn SectionExtractor,
    sections: &SectionSet,
    pass_count: u32,
) -> ScriptsmithResult<SectionSet> {
    let mut current = sections.clone();
    for (pass, focus) in POLISH_FOCI.iter().cycle().take(pass_count as usize).enumerate() {
        current = polish_pass(gateway, extractor, &current, focus).await?;
        debug!(pass = pass + 1, pass_count, focus, "Polish pass applied");
    }
    Ok(current)
}

/// Ask the balanced backend for a PASS/FAIL verdict.
///
/// Advisory only: the sections are returned unchanged whatever the reply,
/// and a failed call is ignored.
#[instrument(skip(gateway, sections))]
pub async fn quality_gate(
    gateway: &mut ModelGateway,
    sections: &SectionSet,
    target_word_count: u32,
) -> SectionSet {
    let sample: String = sections
        .get(Section::Intro)
        .chars()
        .take(QUALITY_SAMPLE_CHARS)
        .collect();
    let prompt = format!(
        "Quality check this YouTube script:\n\n\
         Target: {target_word_count} words\n\
         Current: {} words\n\n\
         Check for:\n\
         1. Hook strength (1-10)\n\
         2. Value clarity (1-10)\n\
         3. Retention potential (1-10)\n\n\
         Sample: {sample}...\n\n\
         Reply with PASS or FAIL",
        sections.total_words()
    );

    let verdict = gateway
        .invoke(BackendId::Balanced, &prompt, QUALITY_MAX_TOKENS)
        .await
        .into_text_or_empty();
    if verdict.to_uppercase().contains("FAIL") {
        warn!("Quality check failed");
    } else {
        debug!("Quality check passed");
    }
    sections.clone()
}

/// Shorten an over-long script toward `target_word_count`.
///
/// Empty sections are dropped. Scripts within `tolerance` words of the
/// target, and scripts that are too short, are returned as they are.
/// Otherwise words are cut from the end of the sections in [`TRIM_ORDER`],
/// each losing at most a tenth of its length or a third of the remaining
/// overage.
///
/// # Examples
///
/// ```
/// use scriptsmith_core::{Section, SectionSet};
/// use scriptsmith_pipeline::trim_to_target;
///
/// let long = "word ".repeat(400);
/// let sections = SectionSet::new()
///     .with(Section::Intro, long.clone())
///     .with(Section::Chapter3, long.clone())
///     .with(Section::Conclusion, long);
///
/// let trimmed = trim_to_target(&sections, 1_000, 50);
/// assert_eq!(trimmed.words_in(Section::Conclusion), 360);
/// assert!(trimmed.total_words() < sections.total_words());
/// ```
pub fn trim_to_target(sections: &SectionSet, target_word_count: u32, tolerance: usize) -> SectionSet {
    let mut trimmed = sections.without_empty();
    let current = trimmed.total_words();
    let target = target_word_count as usize;

    if current.abs_diff(target) <= tolerance || current < target {
        return trimmed;
    }

    let mut to_cut = current - target;
    for section in TRIM_ORDER {
        if !trimmed.contains(section) {
            continue;
        }
        let words: Vec<&str> = trimmed.get(section).split_whitespace().collect();
        let cut = (words.len() / 10).min(to_cut / 3);
        if cut == 0 {
            continue;
        }
        let kept = words[..words.len() - cut].join(" ");
        trimmed.insert(section, kept);
        to_cut = to_cut.saturating_sub(cut);
        if to_cut == 0 {
            break;
        }
    }

    info!(
        before = current,
        after = trimmed.total_words(),
        target,
        "Trimmed script toward target"
    );
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["w"; n].join(" ")
    }

    #[test]
    fn test_within_tolerance_is_unchanged_and_idempotent() {
        let sections = SectionSet::new()
            .with(Section::Intro, words(300))
            .with(Section::Conclusion, words(220));
        let once = trim_to_target(&sections, 500, 50);
        assert_eq!(once, sections);
        assert_eq!(trim_to_target(&once, 500, 50), once);
    }

    #[test]
    fn test_drops_empty_sections() {
        let sections = SectionSet::new()
            .with(Section::Intro, words(500))
            .with(Section::Chapter2, "   ");
        let trimmed = trim_to_target(&sections, 500, 50);
        assert!(!trimmed.contains(Section::Chapter2));
    }

    #[test]
    fn test_never_expands() {
        let sections = SectionSet::new().with(Section::Intro, words(100));
        assert_eq!(trim_to_target(&sections, 1_000, 50).total_words(), 100);
    }

    #[test]
    fn test_cuts_in_priority_order() {
        // 1200 words against 1000: overage 200, each cut is min(len/10, remaining/3)
        let sections = SectionSet::new()
            .with(Section::Intro, words(400))
            .with(Section::Chapter3, words(400))
            .with(Section::Conclusion, words(400));
        let trimmed = trim_to_target(&sections, 1_000, 50);
        assert_eq!(trimmed.words_in(Section::Conclusion), 360);
        assert_eq!(trimmed.words_in(Section::Chapter3), 360);
        assert_eq!(trimmed.words_in(Section::Intro), 360);
        assert_eq!(trimmed.total_words(), 1_080);
    }

    #[test]
    fn test_combine_skips_empty_sections() {
        let sections = SectionSet::new()
            .with(Section::Intro, "Hello")
            .with(Section::Chapter1, "");
        assert_eq!(combine(&sections), "[INTRO]\nHello\n[/INTRO]");
    }
}

//! Section generation, with optional A/B comparison.

use crate::ModelGateway;
use scriptsmith_core::{BackendId, Section, SectionSet, WordDistribution};
use scriptsmith_error::ScriptsmithResult;
use scriptsmith_interface::SectionExtractor;
use tracing::{debug, info, instrument, warn};

/// Description suffix for the alternative A/B version.
pub const AB_VARIANT_SUFFIX: &str = "\nFocus on benefits over features, emotional over logical";

/// Word target for a regenerated section whose planned target is zero.
pub const FALLBACK_SECTION_WORDS: u32 = 200;

const COMPARISON_MAX_TOKENS: u32 = 100;
const COMPARISON_SAMPLE_CHARS: usize = 200;

/// Which of two generated versions the comparison picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum AbChoice {
    /// The standard version.
    A,
    /// The benefit-focused version.
    B,
}

impl AbChoice {
    /// Any reply containing `B` selects version B.
    ///
    /// # Examples
    ///
    /// ```
    /// use scriptsmith_pipeline::AbChoice;
    ///
    /// assert_eq!(AbChoice::from_reply(" b "), AbChoice::B);
    /// assert_eq!(AbChoice::from_reply("A"), AbChoice::A);
    /// assert_eq!(AbChoice::from_reply(""), AbChoice::A);
    /// ```
    pub fn from_reply(reply: &str) -> Self {
        if reply.trim().to_uppercase().contains('B') {
            Self::B
        } else {
            Self::A
        }
    }
}

/// The single prompt asking for all six body sections.
pub fn mega_prompt(
    title: &str,
    description: &str,
    keywords: &str,
    distribution: &WordDistribution,
) -> String {
    let markers = Section::BODY
        .iter()
        .map(|section| format!("[{0}]...[/{0}]", section.marker()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Create a complete YouTube script about: {title}\n\
         Description: {description}\n\
         Keywords: {keywords}\n\n\
         Structure with EXACT word counts:\n\n\
         1. INTRODUCTION ({intro} words)\n\
         - Relatable opening\n\
         - Establish importance\n\
         - Preview what's coming\n\n\
         2. KEY POINTS (exactly 4 points, 50 words each = 200 total)\n\
         - Actionable insights\n\
         - Clear value\n\n\
         3. CHAPTER 1: The Problem ({chapter_1} words)\n\
         - Define the challenge\n\
         - Why it matters\n\
         - Real examples\n\n\
         4. CHAPTER 2: The Solution ({chapter_2} words)\n\
         - Present the method\n\
         - How it works\n\
         - Benefits\n\n\
         5. CHAPTER 3: Implementation ({chapter_3} words)\n\
         - Action steps\n\
         - Practical tips\n\
         - Common mistakes\n\n\
         6. CONCLUSION ({conclusion} words)\n\
         - Summarize key insights\n\
         - Clear call-to-action\n\
         - Encourage engagement\n\n\
         Use these markers to separate sections:\n\
         {markers}\n\n\
         CRITICAL: Each section MUST have the EXACT word count specified!",
        intro = distribution.intro(),
        chapter_1 = distribution.chapter_1(),
        chapter_2 = distribution.chapter_2(),
        chapter_3 = distribution.chapter_3(),
        conclusion = distribution.conclusion(),
    )
}

fn single_section_prompt(section: Section, target_words: u32, title: &str) -> String {
    match section {
        Section::Intro => format!("Write a {target_words}-word introduction for: {title}"),
        Section::KeyPoints => {
            format!("Write exactly 4 key points (50 words each) about: {title}")
        }
        Section::Chapter1 => {
            format!("Write {target_words} words about the main problem/challenge of: {title}")
        }
        Section::Chapter2 => format!("Write {target_words} words about the solution for: {title}"),
        Section::Chapter3 => format!("Write {target_words} words about implementing: {title}"),
        Section::Conclusion => format!("Write a {target_words}-word conclusion for: {title}"),
        Section::Hook => format!("Write {target_words} words about {title}"),
    }
}

/// Regenerate one section on its own.
///
/// # Errors
///
/// Returns an error when the premium call fails.
pub async fn generate_single_section(
    gateway: &mut ModelGateway,
    section: Section,
    target_words: u32,
    title: &str,
) -> ScriptsmithResult<String> {
    let target_words = if target_words == 0 {
        FALLBACK_SECTION_WORDS
    } else {
        target_words
    };
    let prompt = single_section_prompt(section, target_words, title);
    gateway
        .invoke_required(
            BackendId::Premium,
            "section fallback",
            &prompt,
            target_words.saturating_mul(2),
        )
        .await
}

/// Generate the six body sections in one premium call.
///
/// Sections the extractor cannot find are regenerated individually, so
/// every section of the returned set is filled.
///
/// # Errors
///
/// Returns an error when any premium call fails.
#[instrument(skip(gateway, extractor, description, keywords, distribution), fields(title = %title))]
pub async fn generate_sections(
    gateway: &mut ModelGateway,
    extractor: &dyn SectionExtractor,
    title: &str,
    description: &str,
    keywords: &str,
    distribution: &WordDistribution,
) -> ScriptsmithResult<SectionSet> {
    let prompt = mega_prompt(title, description, keywords, distribution);
    let max_tokens = gateway.cap_tokens(distribution.body_total() as usize * 2);
    let content = gateway
        .invoke_required(BackendId::Premium, "section generation", &prompt, max_tokens)
        .await?;
    debug!(words = content.split_whitespace().count(), max_tokens, "Sections generated");

    let mut sections = SectionSet::new();
    for section in Section::BODY {
        let mut text = extractor.extract(&content, section.marker());
        if text.is_empty() {
            warn!(section = %section, "Section missing from response, regenerating");
            text = generate_single_section(gateway, section, distribution.target(section), title)
                .await?;
        }
        sections.insert(section, text);
    }
    Ok(sections)
}

/// Generate a standard and a benefit-focused version and keep the better.
///
/// # Errors
///
/// Returns an error when any premium call fails.
#[instrument(skip(gateway, extractor, description, keywords, distribution), fields(title = %title))]
pub async fn generate_with_ab_testing(
    gateway: &mut ModelGateway,
    extractor: &dyn SectionExtractor,
    title: &str,
    description: &str,
    keywords: &str,
    distribution: &WordDistribution,
) -> ScriptsmithResult<SectionSet> {
    let version_a =
        generate_sections(gateway, extractor, title, description, keywords, distribution).await?;

    let alternative = format!("{description}{AB_VARIANT_SUFFIX}");
    let version_b =
        generate_sections(gateway, extractor, title, &alternative, keywords, distribution).await?;

    let sample = |sections: &SectionSet| -> String {
        sections
            .get(Section::Intro)
            .chars()
            .take(COMPARISON_SAMPLE_CHARS)
            .collect()
    };
    let prompt = format!(
        "Compare these two script versions for YouTube retention:\n\n\
         VERSION A (sample):\n{}...\n\n\
         VERSION B (sample):\n{}...\n\n\
         Which has better:\n\
         - Hook strength\n\
         - Retention potential\n\
         - Emotional engagement\n\n\
         Reply with only: A or B",
        sample(&version_a),
        sample(&version_b)
    );
    let reply = gateway
        .invoke_required(BackendId::Premium, "A/B comparison", &prompt, COMPARISON_MAX_TOKENS)
        .await?;

    let choice = AbChoice::from_reply(&reply);
    info!(version = %choice, "A/B version selected");
    Ok(match choice {
        AbChoice::A => version_a,
        AbChoice::B => version_b,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptsmith_core::plan;

    #[test]
    fn test_mega_prompt_lists_targets_and_markers() {
        let distribution = plan(1150);
        let prompt = mega_prompt("Rust", "Systems", "safety", &distribution);
        assert!(prompt.contains("1. INTRODUCTION (200 words)"));
        assert!(prompt.contains("CHAPTER 1: The Problem (159 words)"));
        assert!(prompt.contains("[KEYPOINTS]...[/KEYPOINTS]"));
        assert!(prompt.contains("[CONCLUSION]...[/CONCLUSION]"));
        assert!(prompt.starts_with("Create a complete YouTube script about: Rust"));
    }

    #[test]
    fn test_single_section_prompts() {
        assert_eq!(
            single_section_prompt(Section::Conclusion, 150, "Rust"),
            "Write a 150-word conclusion for: Rust"
        );
        assert!(single_section_prompt(Section::KeyPoints, 200, "Rust").contains("exactly 4 key points"));
    }
}

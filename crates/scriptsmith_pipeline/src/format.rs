//! Assembly of the final script and result.

use regex::Regex;
use scriptsmith_core::{
    BonusContent, CHAPTER_TITLES, Chapter, GenerationResult, OriginalityReport, QualityTier,
    Section, SectionSet, TierConfig,
};
use scriptsmith_error::{BuilderError, ScriptsmithResult};
use std::sync::LazyLock;

/// Number of key points in every result.
pub const KEY_POINT_COUNT: usize = 4;
/// Longest key point, in characters.
pub const KEY_POINT_MAX_CHARS: usize = 100;
/// Words per minute used for the reading-time estimate.
pub const WORDS_PER_MINUTE: u32 = 200;

static LIST_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\s*").expect("valid regex"));
static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\d+\.\s*").expect("valid regex"));

const HEADINGS: [(Section, &str); 7] = [
    (Section::Hook, "HOOK"),
    (Section::Intro, "INTRODUCTION"),
    (Section::KeyPoints, "KEY POINTS"),
    (Section::Chapter1, "CHAPTER 1: THE PROBLEM"),
    (Section::Chapter2, "CHAPTER 2: THE SOLUTION"),
    (Section::Chapter3, "CHAPTER 3: IMPLEMENTATION"),
    (Section::Conclusion, "CONCLUSION"),
];

fn numbered_items(text: &str) -> Vec<String> {
    let Some(start) = LIST_START.find(text) else {
        return Vec::new();
    };
    LIST_ITEM
        .split(&text[start.end()..])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn bulleted_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim().trim_start_matches(['•', '-', '*']).trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split the key-points section into exactly four short points.
///
/// A numbered list is preferred, then non-empty lines with bullets removed.
/// Missing points are filled with a generic line about the title.
///
/// # Examples
///
/// ```
/// use scriptsmith_pipeline::parse_key_points;
///
/// let points = parse_key_points("1. Start small\n2. Measure\n3. Iterate", "Habits");
/// assert_eq!(points, vec![
///     "Start small",
///     "Measure",
///     "Iterate",
///     "Important insight about Habits",
/// ]);
/// ```
pub fn parse_key_points(text: &str, title: &str) -> Vec<String> {
    let mut points = numbered_items(text);
    if points.is_empty() {
        points = bulleted_lines(text);
    }
    points.truncate(KEY_POINT_COUNT);
    while points.len() < KEY_POINT_COUNT {
        points.push(format!("Important insight about {title}"));
    }
    points
        .into_iter()
        .map(|point| point.chars().take(KEY_POINT_MAX_CHARS).collect())
        .collect()
}

/// The complete script with a heading before every section.
pub fn build_full_script(hook: &str, sections: &SectionSet) -> String {
    HEADINGS
        .iter()
        .map(|(section, heading)| {
            let text = match section {
                Section::Hook => hook,
                other => sections.get(*other),
            };
            format!("=== {heading} ===\n{text}")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Everything the formatter needs from a finished run.
#[derive(Debug, Clone, derive_builder::Builder)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct ScriptDraft {
    /// Requested title.
    title: String,
    /// Clamped target word count.
    target_word_count: u32,
    /// Tier the run used.
    quality_tier: QualityTier,
    /// The selected hook.
    hook: String,
    /// Trimmed body sections.
    sections: SectionSet,
    /// Originality outcome.
    #[builder(default)]
    originality: OriginalityReport,
    /// Patterns found by research.
    #[builder(default)]
    viral_patterns: Vec<String>,
    /// Highest-tier extras.
    #[builder(default)]
    bonus: Option<BonusContent>,
}

impl ScriptDraft {
    /// Creates a new draft builder.
    pub fn builder() -> ScriptDraftBuilder {
        ScriptDraftBuilder::default()
    }

    /// Format the draft as a successful result.
    ///
    /// # Errors
    ///
    /// Returns an error if the result cannot be assembled.
    pub fn into_result(self, tier_config: &TierConfig) -> ScriptsmithResult<GenerationResult> {
        let sections = &self.sections;
        let chapters = [Section::Chapter1, Section::Chapter2, Section::Chapter3]
            .into_iter()
            .zip(CHAPTER_TITLES)
            .map(|(section, title)| Chapter::new(title, sections.get(section)))
            .collect::<Vec<_>>();

        let result = GenerationResult::builder()
            .success(true)
            .script_title(self.title.clone())
            .word_count(self.target_word_count.to_string())
            .quality_score(tier_config.quality_score_label())
            .reading_time((self.target_word_count / WORDS_PER_MINUTE).to_string())
            .executive_summary(self.hook.clone())
            .intro_text(sections.get(Section::Intro))
            .key_points(parse_key_points(sections.get(Section::KeyPoints), &self.title))
            .chapters(chapters)
            .conclusion_text(sections.get(Section::Conclusion))
            .full_script(build_full_script(&self.hook, sections))
            .originality_score(self.originality.originality_score())
            .plagiarism_check(self.originality)
            .viral_patterns(self.viral_patterns)
            .bonus(self.bonus)
            .quality_tier(self.quality_tier)
            .budgeted_cost(tier_config.budget_label())
            .build()
            .map_err(|e| BuilderError::new("GenerationResult", e))?;
        Ok(result)
    }
}

impl ScriptDraftBuilder {
    /// Build the draft.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing.
    pub fn build(&self) -> ScriptsmithResult<ScriptDraft> {
        Ok(self
            .build_internal()
            .map_err(|e| BuilderError::new("ScriptDraft", e))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptsmith_core::TierTable;

    #[test]
    fn test_numbered_points_span_lines() {
        let text = "Here you go:\n1. First point\ncontinues here\n2. Second\n3. Third\n4. Fourth\n5. Fifth";
        let points = parse_key_points(text, "T");
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], "First point\ncontinues here");
        assert_eq!(points[3], "Fourth");
    }

    #[test]
    fn test_bulleted_fallback_and_truncation() {
        let long = "x".repeat(150);
        let text = format!("- Alpha\n• Beta\n\n* {long}");
        let points = parse_key_points(&text, "Topic");
        assert_eq!(points[0], "Alpha");
        assert_eq!(points[1], "Beta");
        assert_eq!(points[2].chars().count(), 100);
        assert_eq!(points[3], "Important insight about Topic");
    }

    #[test]
    fn test_empty_key_points_are_filled() {
        assert_eq!(parse_key_points("", "T"), vec!["Important insight about T"; 4]);
    }

    #[test]
    fn test_full_script_headings_in_order() {
        let sections = SectionSet::new()
            .with(Section::Intro, "intro text")
            .with(Section::Conclusion, "bye");
        let script = build_full_script("hook text", &sections);
        assert!(script.starts_with("=== HOOK ===\nhook text\n\n=== INTRODUCTION ===\nintro text"));
        assert!(script.ends_with("=== CONCLUSION ===\nbye"));
        assert!(script.contains("=== CHAPTER 2: THE SOLUTION ===\n\n"));
    }

    #[test]
    fn test_draft_into_result() {
        let table = TierTable::default();
        let sections = SectionSet::new()
            .with(Section::Intro, "intro")
            .with(Section::KeyPoints, "1. a\n2. b\n3. c\n4. d")
            .with(Section::Chapter1, "one")
            .with(Section::Chapter2, "two")
            .with(Section::Chapter3, "three")
            .with(Section::Conclusion, "end");
        let result = ScriptDraft::builder()
            .title("Title")
            .target_word_count(1_000u32)
            .quality_tier(QualityTier::Medium)
            .hook("hook")
            .sections(sections)
            .build()
            .unwrap()
            .into_result(table.get(QualityTier::Medium))
            .unwrap();

        assert!(*result.success());
        assert_eq!(result.word_count(), "1000");
        assert_eq!(result.reading_time(), "5");
        assert_eq!(result.quality_score(), "9.5");
        assert_eq!(result.budgeted_cost(), "$0.63");
        assert_eq!(result.chapters()[2].title(), "Taking Action");
        assert_eq!(result.chapters()[2].text(), "three");
        assert_eq!(*result.originality_score(), 100.0);
        assert_eq!(result.key_points(), &vec!["a", "b", "c", "d"]);
    }
}

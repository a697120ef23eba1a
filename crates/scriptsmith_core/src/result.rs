//! The outward-facing result of a generation run.

use crate::{OriginalityReport, QualityTier};
use serde::{Deserialize, Serialize};

/// Fixed titles of the three chapters, in order.
pub const CHAPTER_TITLES: [&str; 3] = ["The Challenge", "The Solution", "Taking Action"];

/// A titled chapter of the finished script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Chapter {
    /// Display title.
    title: String,
    /// Chapter body.
    text: String,
}

impl Chapter {
    /// Create a chapter.
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Extras produced for the highest tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct BonusContent {
    /// Three thumbnail ideas, one `visual | text` line each.
    thumbnail_ideas: String,
    /// Video description with hashtags.
    video_description: String,
}

impl BonusContent {
    /// Create bonus content.
    pub fn new(thumbnail_ideas: impl Into<String>, video_description: impl Into<String>) -> Self {
        Self {
            thumbnail_ideas: thumbnail_ideas.into(),
            video_description: video_description.into(),
        }
    }
}

/// Result of a generation run, successful or not.
///
/// Failed runs carry `success == false`, an error message and zeroed
/// counters; they never carry partial script content.
///
/// # Examples
///
/// ```
/// use scriptsmith_core::{GenerationResult, QualityTier};
///
/// let failed = GenerationResult::failure("My Title", QualityTier::Low, "backend down");
/// assert!(!*failed.success());
/// assert_eq!(failed.word_count(), "0");
/// assert_eq!(failed.quality_score(), "0.0");
/// ```
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into), default)]
pub struct GenerationResult {
    /// Whether the run completed.
    success: bool,
    /// Error message of a failed run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    /// Script title as requested.
    script_title: String,
    /// Target word count (clamped).
    word_count: String,
    /// Advertised tier score, one decimal.
    quality_score: String,
    /// Reading time in minutes at 200 words per minute.
    reading_time: String,
    /// The selected hook.
    executive_summary: String,
    /// Introduction.
    intro_text: String,
    /// Exactly four key points, each at most 100 characters.
    key_points: Vec<String>,
    /// Exactly three chapters.
    chapters: Vec<Chapter>,
    /// Conclusion.
    conclusion_text: String,
    /// Assembled script with section headers.
    full_script: String,
    /// Originality report.
    plagiarism_check: OriginalityReport,
    /// `100 - match percentage`.
    originality_score: f64,
    /// Patterns found by viral research.
    viral_patterns: Vec<String>,
    /// Highest-tier extras.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bonus: Option<BonusContent>,
    /// Wall-clock duration, e.g. `"1.23s"`.
    generation_time: String,
    /// Tier the run used.
    quality_tier: QualityTier,
    /// Estimated spend, e.g. `"$0.12"`.
    actual_api_cost: String,
    /// Tier budget, e.g. `"$0.35"`.
    budgeted_cost: String,
    /// Number of model invocations.
    api_calls: u32,
}

impl GenerationResult {
    /// Creates a new result builder.
    pub fn builder() -> GenerationResultBuilder {
        GenerationResultBuilder::default()
    }

    /// The result of a failed run.
    pub fn failure(
        title: impl Into<String>,
        quality_tier: QualityTier,
        error: impl std::fmt::Display,
    ) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            script_title: title.into(),
            word_count: "0".to_string(),
            quality_score: "0.0".to_string(),
            reading_time: "0".to_string(),
            full_script: format!("Generation failed: {}", error),
            quality_tier,
            ..Self::default()
        }
    }

    /// Attach run metadata after formatting.
    pub fn with_run_metadata(
        mut self,
        generation_time: impl Into<String>,
        actual_api_cost: impl Into<String>,
        api_calls: u32,
    ) -> Self {
        self.generation_time = generation_time.into();
        self.actual_api_cost = actual_api_cost.into();
        self.api_calls = api_calls;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_has_no_script_content() {
        let result = GenerationResult::failure("T", QualityTier::High, "boom");
        assert_eq!(result.error().as_deref(), Some("boom"));
        assert!(result.intro_text().is_empty());
        assert!(result.chapters().is_empty());
        assert!(result.full_script().contains("boom"));
        assert_eq!(result.reading_time(), "0");
    }

    #[test]
    fn test_builder_fills_unset_fields_with_defaults() {
        let result = GenerationResult::builder()
            .success(true)
            .script_title("T")
            .build()
            .unwrap();
        assert!(*result.success());
        assert!(result.error().is_none());
        assert!(!result.plagiarism_check().checked());
    }

    #[test]
    fn test_serialization_omits_absent_bonus() {
        let result = GenerationResult::failure("T", QualityTier::Low, "x");
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("bonus").is_none());
        assert_eq!(json["quality_tier"], "low");
    }
}

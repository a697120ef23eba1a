//! The immutable input of a generation run.

use crate::QualityTier;
use scriptsmith_error::{BuilderError, ScriptsmithResult};
use serde::{Deserialize, Serialize};

/// Smallest accepted word target.
pub const MIN_TARGET_WORDS: u32 = 500;
/// Largest accepted word target.
pub const MAX_TARGET_WORDS: u32 = 18_000;
/// Word target used when the caller gives none.
pub const DEFAULT_TARGET_WORDS: u32 = 1_000;

/// Clamp a requested word count into `[MIN_TARGET_WORDS, MAX_TARGET_WORDS]`.
///
/// # Examples
///
/// ```
/// use scriptsmith_core::clamp_target_words;
///
/// assert_eq!(clamp_target_words(100), 500);
/// assert_eq!(clamp_target_words(2_000), 2_000);
/// assert_eq!(clamp_target_words(50_000), 18_000);
/// ```
pub fn clamp_target_words(requested: u32) -> u32 {
    requested.clamp(MIN_TARGET_WORDS, MAX_TARGET_WORDS)
}

/// A script generation request.
///
/// The word target is always clamped on construction, so a built request
/// never carries an out-of-range target.
///
/// # Examples
///
/// ```
/// use scriptsmith_core::{GenerationRequest, QualityTier};
///
/// let request = GenerationRequest::builder()
///     .title("Remote Work Productivity")
///     .description("Tips for staying focused at home")
///     .keywords("remote, focus")
///     .target_word_count(200u32)
///     .quality_tier(QualityTier::Medium)
///     .build()
///     .unwrap();
///
/// assert_eq!(*request.target_word_count(), 500);
/// assert_eq!(*request.quality_tier(), QualityTier::Medium);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct GenerationRequest {
    /// Script title.
    title: String,
    /// Free-form description of what the script should cover.
    #[builder(default)]
    description: String,
    /// Comma-separated keywords.
    #[builder(default)]
    keywords: String,
    /// Desired final length in words.
    #[builder(default = "DEFAULT_TARGET_WORDS")]
    target_word_count: u32,
    /// Requested quality tier.
    #[builder(default)]
    quality_tier: QualityTier,
}

impl GenerationRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    /// Construct a request directly, clamping the word target.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        keywords: impl Into<String>,
        target_word_count: u32,
        quality_tier: QualityTier,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            keywords: keywords.into(),
            target_word_count: clamp_target_words(target_word_count),
            quality_tier,
        }
    }
}

impl GenerationRequestBuilder {
    /// Build the request, clamping the word target.
    ///
    /// # Errors
    ///
    /// Returns an error if the title was never set.
    pub fn build(&self) -> ScriptsmithResult<GenerationRequest> {
        let mut request = self
            .build_internal()
            .map_err(|e| BuilderError::new("GenerationRequest", e))?;
        request.target_word_count = clamp_target_words(request.target_word_count);
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_clamps_both_ends() {
        let low = GenerationRequest::builder()
            .title("t")
            .target_word_count(1u32)
            .build()
            .unwrap();
        assert_eq!(*low.target_word_count(), MIN_TARGET_WORDS);

        let high = GenerationRequest::builder()
            .title("t")
            .target_word_count(90_000u32)
            .build()
            .unwrap();
        assert_eq!(*high.target_word_count(), MAX_TARGET_WORDS);
    }

    #[test]
    fn test_builder_defaults() {
        let request = GenerationRequest::builder().title("t").build().unwrap();
        assert_eq!(*request.target_word_count(), DEFAULT_TARGET_WORDS);
        assert_eq!(*request.quality_tier(), QualityTier::Low);
        assert!(request.description().is_empty());
    }

    #[test]
    fn test_missing_title_is_an_error() {
        assert!(GenerationRequest::builder().build().is_err());
    }

    #[test]
    fn test_new_clamps() {
        let request = GenerationRequest::new("t", "", "", 499, QualityTier::High);
        assert_eq!(*request.target_word_count(), 500);
    }
}

//! Results of external lookups: web search hits and originality reports.

use serde::{Deserialize, Serialize};

/// One organic web search result.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into), default)]
pub struct SearchHit {
    /// Result title.
    #[serde(default)]
    title: String,
    /// Result snippet.
    #[serde(default)]
    snippet: String,
    /// Result URL.
    #[serde(default, alias = "link")]
    url: String,
}

impl SearchHit {
    /// Creates a new search hit builder.
    pub fn builder() -> SearchHitBuilder {
        SearchHitBuilder::default()
    }
}

/// A web page the originality service matched against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct MatchedSource {
    /// Page URL.
    url: String,
    /// Page title.
    title: String,
    /// Share of the submitted text found on this page.
    match_percentage: f64,
}

impl MatchedSource {
    /// Create a matched source.
    pub fn new(url: impl Into<String>, title: impl Into<String>, match_percentage: f64) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            match_percentage,
        }
    }
}

/// Outcome of an originality (plagiarism) check.
///
/// The default is the "not checked" report, which counts as passed.
///
/// # Examples
///
/// ```
/// use scriptsmith_core::OriginalityReport;
///
/// let report = OriginalityReport::from_match(3.0, 5.0);
/// assert!(report.checked() && report.passed());
///
/// let failed = OriginalityReport::check_failed();
/// assert!(!failed.checked() && failed.passed());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginalityReport {
    checked: bool,
    passed: bool,
    match_percentage: f64,
    message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    sources: Vec<MatchedSource>,
}

impl Default for OriginalityReport {
    fn default() -> Self {
        Self::not_checked()
    }
}

impl OriginalityReport {
    /// No check was performed.
    pub fn not_checked() -> Self {
        Self {
            checked: false,
            passed: true,
            match_percentage: 0.0,
            message: "Not checked".to_string(),
            sources: Vec::new(),
        }
    }

    /// The check was attempted but could not complete.
    pub fn check_failed() -> Self {
        Self {
            checked: false,
            passed: true,
            match_percentage: 0.0,
            message: "Check failed".to_string(),
            sources: Vec::new(),
        }
    }

    /// The service found no matching sources.
    pub fn original() -> Self {
        Self {
            checked: true,
            passed: true,
            match_percentage: 0.0,
            message: "100% original".to_string(),
            sources: Vec::new(),
        }
    }

    /// The service reported a match; passes when strictly below `threshold`.
    pub fn from_match(match_percentage: f64, threshold: f64) -> Self {
        Self {
            checked: true,
            passed: match_percentage < threshold,
            match_percentage,
            message: format!("{}% match found", match_percentage),
            sources: Vec::new(),
        }
    }

    /// The text was too short to submit.
    pub fn too_short(min_chars: usize) -> Self {
        Self {
            message: format!("Text too short to check (min. {} characters)", min_chars),
            ..Self::not_checked()
        }
    }

    /// Attach the matched pages.
    pub fn with_sources(mut self, sources: Vec<MatchedSource>) -> Self {
        self.sources = sources;
        self
    }

    /// Whether the check ran.
    pub fn checked(&self) -> bool {
        self.checked
    }

    /// Whether the text is acceptable.
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Share of the text found elsewhere, 0-100.
    pub fn match_percentage(&self) -> f64 {
        self.match_percentage
    }

    /// Human-readable summary.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Pages the text was found on, best match first.
    pub fn sources(&self) -> &[MatchedSource] {
        &self.sources
    }

    /// `100 - match_percentage`.
    pub fn originality_score(&self) -> f64 {
        100.0 - self.match_percentage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(!OriginalityReport::from_match(5.0, 5.0).passed());
        assert!(OriginalityReport::from_match(4.9, 5.0).passed());
    }

    #[test]
    fn test_default_is_not_checked() {
        let report = OriginalityReport::default();
        assert!(!report.checked());
        assert!(report.passed());
        assert_eq!(report.message(), "Not checked");
        assert_eq!(report.originality_score(), 100.0);
    }

    #[test]
    fn test_search_hit_accepts_link_alias() {
        let hit: SearchHit =
            serde_json::from_str(r#"{"title":"T","link":"https://x.test"}"#).unwrap();
        assert_eq!(hit.url(), "https://x.test");
        assert!(hit.snippet().is_empty());
    }
}

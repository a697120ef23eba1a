//! Delimiter-based section extraction from model responses.
//!
//! Generation and polish prompts ask the model to wrap each section in
//! `[MARKER]...[/MARKER]` pairs. Model output is free text, so extraction
//! is tolerant: markers match case-insensitively, content may span lines,
//! and anything outside the first matching pair is ignored.

use regex::RegexBuilder;
use scriptsmith_interface::SectionExtractor;
use tracing::{trace, warn};

/// Extracts the text between the first `[MARKER]` and `[/MARKER]` pair.
///
/// An empty return value means the section was not found; callers treat it
/// as the signal to regenerate the section on its own.
///
/// # Examples
///
/// ```
/// use scriptsmith_interface::SectionExtractor;
/// use scriptsmith_pipeline::MarkerExtractor;
///
/// let response = "Sure!\n[intro]\nWelcome back.\nToday we dig in.\n[/INTRO]\n[CONCLUSION]Bye[/CONCLUSION]";
/// assert_eq!(MarkerExtractor.extract(response, "INTRO"), "Welcome back.\nToday we dig in.");
/// assert_eq!(MarkerExtractor.extract(response, "CHAPTER1"), "");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerExtractor;

impl SectionExtractor for MarkerExtractor {
    fn extract(&self, content: &str, marker: &str) -> String {
        let marker = regex::escape(marker);
        let pattern = format!(r"\[{marker}\](.*?)\[/{marker}\]");

        let regex = match RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
        {
            Ok(regex) => regex,
            Err(e) => {
                warn!(error = %e, marker = %marker, "Invalid section marker");
                return String::new();
            }
        };

        match regex.captures(content).and_then(|caps| caps.get(1)) {
            Some(found) => found.as_str().trim().to_string(),
            None => {
                trace!(marker = %marker, "Section marker not found");
                String::new()
            }
        }
    }
}

/// Wrap text in a section's delimiter pair.
pub fn wrap_in_marker(marker: &str, text: &str) -> String {
    format!("[{marker}]\n{text}\n[/{marker}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_multiline_case_insensitive() {
        let body = "Line one.\n\nLine two with [brackets] inside.";
        let wrapped = wrap_in_marker("chapter2", body);
        assert_eq!(MarkerExtractor.extract(&wrapped, "CHAPTER2"), body);
        assert_eq!(MarkerExtractor.extract(&wrapped, "Chapter2"), body);
    }

    #[test]
    fn test_first_pair_wins() {
        let content = "[HOOK]first[/HOOK] [HOOK]second[/HOOK]";
        assert_eq!(MarkerExtractor.extract(content, "HOOK"), "first");
    }

    #[test]
    fn test_unclosed_marker_is_empty() {
        assert_eq!(MarkerExtractor.extract("[INTRO] never closed", "INTRO"), "");
    }

    #[test]
    fn test_marker_is_escaped() {
        let content = "[A.B]x[/A.B] [AXB]y[/AXB]";
        assert_eq!(MarkerExtractor.extract(content, "A.B"), "x");
    }
}

//! Viral-pattern research and keyword harvesting from search hits.

use crate::ModelGateway;
use scriptsmith_core::{ResearchSettings, SearchHit};
use scriptsmith_interface::ResearchBackend;
use tracing::{debug, instrument, warn};

/// Title signals and the pattern each one suggests.
pub const VIRAL_SIGNALS: [(&str, &str); 3] = [
    ("SHOCKING", "SHOCKING opener"),
    ("SECRET", "Secret reveal"),
    ("MISTAKE", "Mistake correction"),
];

/// Hits scanned when deriving keywords for a client brief.
pub const KEYWORD_HIT_LIMIT: usize = 3;
/// Keywords kept for a client brief.
pub const KEYWORD_LIMIT: usize = 5;
/// Shortest word length (exclusive) that counts as a keyword.
pub const KEYWORD_MIN_CHARS: usize = 4;

/// Scan hit titles for viral signals.
///
/// # Examples
///
/// ```
/// use scriptsmith_core::SearchHit;
/// use scriptsmith_pipeline::viral_patterns_from_hits;
///
/// let hits = vec![
///     SearchHit::builder().title("The SECRET nobody tells you").build().unwrap(),
///     SearchHit::builder().title("My biggest mistake").build().unwrap(),
/// ];
/// assert_eq!(
///     viral_patterns_from_hits(&hits, 5, 3),
///     vec!["Secret reveal".to_string(), "Mistake correction".to_string()]
/// );
/// ```
pub fn viral_patterns_from_hits(hits: &[SearchHit], scan_limit: usize, max_patterns: usize) -> Vec<String> {
    let mut patterns: Vec<String> = hits
        .iter()
        .take(scan_limit)
        .flat_map(|hit| {
            let title = hit.title().to_uppercase();
            VIRAL_SIGNALS
                .iter()
                .filter(move |(signal, _)| title.contains(signal))
                .map(|(_, pattern)| pattern.to_string())
        })
        .collect();
    patterns.truncate(max_patterns);
    patterns
}

/// Search for viral videos on the topic and derive opener patterns.
///
/// The search is charged to the run's ledger before it is made. A missing
/// backend or a failed search yields no patterns.
#[instrument(skip(gateway, research, settings, keywords), fields(title = %title))]
pub async fn collect_viral_patterns(
    gateway: &mut ModelGateway,
    research: Option<&dyn ResearchBackend>,
    settings: &ResearchSettings,
    title: &str,
    keywords: &str,
) -> Vec<String> {
    let Some(research) = research else {
        debug!("No research backend, skipping viral research");
        return Vec::new();
    };

    gateway.record_research(*settings.cost_per_search());
    let query = format!("{title} viral YouTube video {keywords}");
    match research.search(&query).await {
        Ok(hits) => {
            let patterns =
                viral_patterns_from_hits(&hits, *settings.pattern_scan_limit(), *settings.max_patterns());
            debug!(hits = hits.len(), patterns = patterns.len(), "Viral research completed");
            patterns
        }
        Err(e) => {
            warn!(error = %e, "Viral research failed");
            Vec::new()
        }
    }
}

/// Harvest keywords from the first few hits of a client-title search.
///
/// Words are lower-cased, must be purely alphabetic and longer than
/// [`KEYWORD_MIN_CHARS`]; duplicates are dropped and first-seen order kept.
///
/// # Examples
///
/// ```
/// use scriptsmith_core::SearchHit;
/// use scriptsmith_pipeline::keywords_from_hits;
///
/// let hits = vec![SearchHit::builder()
///     .title("Rust Ownership explained")
///     .snippet("Ownership rules, borrowing and lifetimes in 2025")
///     .build()
///     .unwrap()];
/// assert_eq!(
///     keywords_from_hits(&hits),
///     vec!["ownership", "explained", "borrowing", "lifetimes"]
/// );
/// ```
pub fn keywords_from_hits(hits: &[SearchHit]) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for hit in hits.iter().take(KEYWORD_HIT_LIMIT) {
        let text = format!("{} {}", hit.title(), hit.snippet()).to_lowercase();
        for word in text.split_whitespace() {
            if keywords.len() == KEYWORD_LIMIT {
                return keywords;
            }
            let is_keyword = word.chars().count() > KEYWORD_MIN_CHARS
                && word.chars().all(char::is_alphabetic);
            if is_keyword && !keywords.iter().any(|k| k == word) {
                keywords.push(word.to_string());
            }
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: &str) -> SearchHit {
        SearchHit::builder().title(title).build().unwrap()
    }

    #[test]
    fn test_patterns_capped_and_scan_limited() {
        let hits = vec![
            hit("SHOCKING secret mistake"),
            hit("another shocking one"),
            hit("plain"),
            hit("plain"),
            hit("plain"),
            hit("SECRET past the scan limit"),
        ];
        assert_eq!(
            viral_patterns_from_hits(&hits, 5, 3),
            vec!["SHOCKING opener", "Secret reveal", "Mistake correction"]
        );
        assert!(viral_patterns_from_hits(&hits[2..], 3, 3).is_empty());
    }

    #[test]
    fn test_keywords_skip_punctuated_and_short_words() {
        let hits = vec![hit("Rust, lifetimes: rustaceans love lifetimes")];
        assert_eq!(keywords_from_hits(&hits), vec!["rustaceans", "lifetimes"]);
    }

    #[test]
    fn test_keywords_limited_to_five() {
        let hits = vec![hit("alpha bravo charlie delta echoes foxtrot golfer hotel")];
        assert_eq!(keywords_from_hits(&hits).len(), 5);
    }
}
